//! Error types for region operations

use thiserror::Error;

/// Errors raised by flood fill, labeling and statistics.
#[derive(Error, Debug)]
pub enum RegionError {
    /// Error from core operations
    #[error("core error: {0}")]
    Core(#[from] wormscan_core::Error),

    /// Seed coordinates outside the grid
    #[error("seed coordinates ({x}, {y}) outside grid")]
    InvalidSeed { x: u32, y: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
