//! Wormscan Filter - adaptive thresholding
//!
//! Converts grayscale specimen frames to binary foreground/background grids
//! using a locally normalized comparison backed by a summed-area table:
//!
//! - [`IntegralImage`] - O(1) box sums after one O(W·H) build
//! - [`adaptive_threshold`] - local-mean threshold with glare ceiling

pub mod error;
pub mod integral;
pub mod threshold;

pub use error::{FilterError, FilterResult};
pub use integral::IntegralImage;
pub use threshold::{
    AdaptiveThresholdOptions, DEFAULT_BOX_SIZE, DEFAULT_CEILING, DEFAULT_TOLERANCE,
    adaptive_threshold,
};
