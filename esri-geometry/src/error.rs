//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Coordinate array or ordinate list of unexpected shape.
    #[error("invalid format: {0}")]
    Format(String),

    /// Operation is not valid for the given arguments.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Geometry has no vertices to work with.
    #[error("geometry is empty")]
    EmptyGeometry,

    /// Conversion or algorithm is not available for the geometry kind.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
