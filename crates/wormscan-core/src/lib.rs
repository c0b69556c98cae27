//! Wormscan Core - grid containers for the morphometry pipeline
//!
//! This crate provides the data structures shared by every wormscan stage:
//!
//! - [`PixelGrid`] - 8-bit grayscale/binary sample grid
//! - [`LabelMap`] - connected-component label grid (0 = background)
//! - [`Rect`] - integer rectangle for bounding boxes and crops
//! - [`Error`] / [`Result`] - the shared error vocabulary
//!
//! Binary grids use the [`FOREGROUND`]/[`BACKGROUND`] sample values
//! throughout the workspace.

pub mod error;
pub mod grid;
pub mod rect;

pub use error::{Error, Result};
pub use grid::{BACKGROUND, FOREGROUND, LabelMap, PixelGrid};
pub use rect::Rect;
