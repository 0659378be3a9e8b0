//! Error types for schema storage.

use docgen_core::SchemaError;

/// Error type for schema store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A schema with this name is already stored
    #[error("schema '{0}' already exists")]
    AlreadyExists(String),

    /// The name cannot be used as a storage key
    #[error("invalid schema name '{0}'")]
    InvalidName(String),

    /// The schema request was rejected
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Error reading or writing the store
    #[error("Schema store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding or decoding a stored schema
    #[error("Failed to (de)serialize stored schema: {0}")]
    Json(#[from] serde_json::Error),
}
