use esri_geometry::GeometryError;
use thiserror::Error;

/// Error returned by the readers and writers of this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Input value is empty.
    #[error("input value is empty")]
    MissingArgument,

    /// Input is well formed but has an unexpected shape or value type.
    #[error("invalid format: {0}")]
    Format(String),

    /// Input is not valid JSON.
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        /// Byte offset in the input.
        position: usize,
        /// Description of the problem.
        message: String,
    },

    /// Geometry model rejected the decoded values.
    #[error(transparent)]
    Geometry(GeometryError),
}

/// Shape errors of the model are reported as [`CodecError::Format`].
impl From<GeometryError> for CodecError {
    fn from(error: GeometryError) -> Self {
        match error {
            GeometryError::Format(message) => Self::Format(message),
            other => Self::Geometry(other),
        }
    }
}

impl CodecError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}
