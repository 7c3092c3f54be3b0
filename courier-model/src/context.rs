//! Ambient "current instance" lookup for collaborators such as a client handle.
//!
//! Prefer passing the handle explicitly; [`resolve`] only falls back to the
//! process-wide slot when none was given.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::{ModelError, ModelResult};

/// A single, lock-guarded slot holding the current instance of `T`.
#[derive(Debug)]
pub struct CurrentSlot<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> CurrentSlot<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Installs `instance`, returning the one it replaced.
    pub fn set_current(&self, instance: Arc<T>) -> Option<Arc<T>> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(instance)
    }

    #[must_use]
    pub fn get_current(&self) -> Option<Arc<T>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Empties the slot.
    pub fn reset(&self) -> Option<Arc<T>> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<T> Default for CurrentSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A type with a process-wide current instance.
///
/// Implementors own a `static` [`CurrentSlot`] and return it from [`slot`](Self::slot).
pub trait ContextInstance: Send + Sync + Sized + 'static {
    /// Name used in configuration errors.
    const NAME: &'static str;

    fn slot() -> &'static CurrentSlot<Self>;

    fn set_current(instance: Arc<Self>) -> Option<Arc<Self>> {
        debug!(context = Self::NAME, "Current instance set");
        Self::slot().set_current(instance)
    }

    fn get_current() -> Option<Arc<Self>> {
        Self::slot().get_current()
    }

    fn reset_current() -> Option<Arc<Self>> {
        Self::slot().reset()
    }

    /// The current instance, or `NotConfigured` with a hint on how to set one.
    fn require_current() -> ModelResult<Arc<Self>> {
        Self::get_current().ok_or_else(|| ModelError::NotConfigured {
            what: Self::NAME,
            hint: format!(
                "pass one explicitly or set the current instance with `{}::set_current(instance)`",
                Self::NAME
            ),
        })
    }
}

/// Uses `explicit` when given, the current instance otherwise.
pub fn resolve<T: ContextInstance>(explicit: Option<Arc<T>>) -> ModelResult<Arc<T>> {
    match explicit {
        Some(instance) => Ok(instance),
        None => T::require_current(),
    }
}
