//! Error types for morphology operations

use thiserror::Error;

/// Errors raised by morphology, thinning and skeleton repair.
#[derive(Error, Debug)]
pub enum MorphError {
    /// Error from core operations
    #[error("core error: {0}")]
    Core(#[from] wormscan_core::Error),

    /// A 3x3 pattern string could not be parsed
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for morphology operations
pub type MorphResult<T> = Result<T, MorphError>;
