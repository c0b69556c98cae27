//! Error types for measurement operations

use thiserror::Error;

/// Errors raised by length tracing and line detection.
#[derive(Error, Debug)]
pub enum MeasureError {
    /// Error from core operations
    #[error("core error: {0}")]
    Core(#[from] wormscan_core::Error),

    /// Calibration scales must be finite and positive
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for measurement operations
pub type MeasureResult<T> = Result<T, MeasureError>;
