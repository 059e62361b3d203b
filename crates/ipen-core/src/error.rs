//! Error types for ink operations.

use thiserror::Error;

/// Errors reported by ink operations.
///
/// None of these are fatal: the operation that produced one has left the
/// document exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InkError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("a stroke is already in progress")]
    StrokeInProgress,
    #[error("unknown palette color: {0}")]
    UnknownColor(String),
    #[error("invalid stroke width: {0}")]
    InvalidStrokeWidth(f64),
}

/// Result type for ink operations.
pub type InkResult<T> = Result<T, InkError>;
