//! Error types for document export.

use docgen_generator::GenerateError;
use thiserror::Error;

/// Errors that can occur while exporting documents.
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document could not be generated.
    #[error("Generator error: {0}")]
    Generate(#[from] GenerateError),
}
