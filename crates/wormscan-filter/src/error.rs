//! Error types for filtering operations

use thiserror::Error;

/// Errors raised by thresholding and integral-table operations.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Error from core operations
    #[error("core error: {0}")]
    Core(#[from] wormscan_core::Error),

    /// Invalid filter parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
