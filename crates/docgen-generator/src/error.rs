//! Error types for document generation.

/// Failure while synthesizing the value of a single field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// A recognized type was given a semantically invalid option value
    #[error("invalid option '{option}' for type '{tag}': {reason}")]
    InvalidOption {
        tag: String,
        option: String,
        reason: String,
    },

    /// A dependent type was evaluated before the field it depends on
    #[error("type '{tag}' requires a '{depends_on}' field to be generated first")]
    MissingDependency { tag: String, depends_on: String },

    /// The type tag is not registered
    #[error("unsupported type: {0}")]
    UnknownType(String),
}

impl SynthesisError {
    /// Shorthand for [`SynthesisError::InvalidOption`].
    pub fn invalid_option(
        tag: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            tag: tag.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Error type for document and batch generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// Batch size is not a positive integer
    #[error("count must be a positive integer, got {0}")]
    InvalidCount(String),

    /// A field failed; the document it belonged to was discarded
    #[error("failed to generate field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: SynthesisError,
    },
}

impl GenerateError {
    /// The synthesis error behind a field failure, if any.
    pub fn synthesis_error(&self) -> Option<&SynthesisError> {
        match self {
            Self::Field { source, .. } => Some(source),
            Self::InvalidCount(_) => None,
        }
    }
}
