//! Error types for the detection pipeline

use thiserror::Error;

/// Errors raised by the detection pipeline and its configuration.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Error from core operations
    #[error("core error: {0}")]
    Core(#[from] wormscan_core::Error),

    /// Error from thresholding
    #[error("filter error: {0}")]
    Filter(#[from] wormscan_filter::FilterError),

    /// Error from labeling or statistics
    #[error("region error: {0}")]
    Region(#[from] wormscan_region::RegionError),

    /// Error from morphology or skeleton repair
    #[error("morphology error: {0}")]
    Morph(#[from] wormscan_morph::MorphError),

    /// Error from length measurement
    #[error("measurement error: {0}")]
    Measure(#[from] wormscan_measure::MeasureError),

    /// A detection condition fails its range checks
    #[error("invalid detection condition: {0}")]
    InvalidCondition(String),

    /// A preset profile line does not follow the expected format
    #[error("preset syntax error at line {line}: {message}")]
    PresetSyntax { line: usize, message: String },

    /// No preset section with the requested title exists
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// I/O error while writing a report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for detection operations
pub type DetectResult<T> = Result<T, DetectError>;
