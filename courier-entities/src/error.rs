//! Error types for the entity layer.

use courier_model::ModelError;
use thiserror::Error;

/// Result type for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Errors that can occur when working with concrete entity types.
#[derive(Debug, Error)]
pub enum EntityError {
    /// Bot token is not of the form `<id>:<secret>`.
    #[error("invalid bot token: {0}")]
    InvalidToken(String),

    /// Entity type tag outside the known set.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// Error from the mapping layer.
    #[error(transparent)]
    Model(#[from] ModelError),
}
