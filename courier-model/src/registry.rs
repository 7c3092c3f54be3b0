//! Process-wide registry of every finalized type, keyed by name.
//!
//! Written when a schema is built, read when a payload names its type at
//! runtime. The last registration under a name wins.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::schema::Schema;

static TYPES: LazyLock<RwLock<HashMap<String, Arc<Schema>>>> = LazyLock::new(Default::default);

/// Records `schema` under its name, replacing any earlier type of that name.
pub fn register(schema: Arc<Schema>) {
    let name = schema.name().to_owned();
    let mut types = TYPES.write().unwrap_or_else(PoisonError::into_inner);
    match types.insert(name.clone(), schema) {
        Some(_) => warn!(type_name = %name, "Replaced previously registered type"),
        None => debug!(type_name = %name, "Type registered"),
    }
}

/// Looks up a registered type by name.
#[must_use]
pub fn lookup(name: &str) -> Option<Arc<Schema>> {
    TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}

#[must_use]
pub fn is_registered(name: &str) -> bool {
    TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Names of all registered types, sorted.
#[must_use]
pub fn type_names() -> Vec<String> {
    let mut names: Vec<String> = TYPES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}
