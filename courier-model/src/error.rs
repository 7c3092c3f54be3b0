//! Error types for the object-mapping layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building, reading or writing structured objects.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Item access with a key the schema does not declare.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Construction input was not a keyed mapping.
    #[error("expected a mapping for {type_name}, got {found}")]
    NotAMapping { type_name: String, found: &'static str },

    /// A nested field received an object of a different type.
    #[error("field {alias} expects {expected}, got {found}")]
    TypeMismatch {
        alias: String,
        expected: String,
        found: String,
    },

    /// An object is not of the requested type or one of its subtypes.
    #[error("expected an object of type {expected}, got {found}")]
    WrongType { expected: String, found: String },

    /// An ambient collaborator was required but never set.
    #[error("{what} is not configured: {hint}")]
    NotConfigured { what: &'static str, hint: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
