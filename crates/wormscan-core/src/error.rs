//! Error types shared across the wormscan crates

use thiserror::Error;

/// Errors raised by the core grid containers and propagated by every
/// downstream crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Grid dimensions are invalid (zero width or height)
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Coordinate lies outside the grid
    #[error("coordinate ({x}, {y}) outside {width}x{height} grid")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// Two grids that must agree in size do not
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Backing buffer length does not match width * height
    #[error("buffer length {len} does not match {width}x{height}")]
    BadBufferLength { len: usize, width: u32, height: u32 },

    /// A parameter value is out of its legal range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
