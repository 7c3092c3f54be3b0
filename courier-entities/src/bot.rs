use std::fmt;

use courier_model::{ContextInstance, CurrentSlot};

use crate::error::{EntityError, EntityResult};

static CURRENT: CurrentSlot<Bot> = CurrentSlot::new();

/// Client handle for the remote API.
///
/// Only the token is held here; transport lives elsewhere. Objects that need
/// a client take one explicitly or fall back to [`Bot::get_current`].
#[derive(Clone, PartialEq, Eq)]
pub struct Bot {
    id: i64,
    token: String,
}

impl Bot {
    /// Validates a `<id>:<secret>` token.
    pub fn new(token: impl Into<String>) -> EntityResult<Self> {
        let token = token.into();
        let id = match token.split_once(':') {
            Some((id, secret))
                if !secret.is_empty() && !secret.chars().any(char::is_whitespace) =>
            {
                id.parse::<i64>().ok()
            }
            _ => None,
        };
        let id = id.ok_or_else(|| EntityError::InvalidToken(mask(&token)))?;
        Ok(Self { id, token })
    }

    /// Numeric id embedded in the token.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("id", &self.id)
            .field("token", &mask(&self.token))
            .finish()
    }
}

impl ContextInstance for Bot {
    const NAME: &'static str = "Bot";

    fn slot() -> &'static CurrentSlot<Self> {
        &CURRENT
    }
}

/// Keeps the id prefix, hides the secret.
fn mask(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{id}:***"),
        None => "***".to_owned(),
    }
}
