//! Error types for the render crate.

use thiserror::Error;

use crate::validator::ValidationReport;

/// Errors that can occur while building, drawing on, or persisting a surface.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A region was asked to perform an operation it does not support.
    #[error("unknown drawing operation: {operation:?}")]
    UnknownOperation { operation: String },

    /// Invalid surface dimensions (zero rows or columns).
    #[error("invalid surface dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A region outside the surface grid was addressed.
    #[error("region ({row}, {col}) is outside the surface grid")]
    RegionOutOfBounds { row: usize, col: usize },

    /// The validator rejected the assembled surface.
    #[error("surface failed validation: {0}")]
    Validation(ValidationReport),

    /// Failed to write a saved surface.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize a surface snapshot.
    #[error("failed to serialize surface: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
