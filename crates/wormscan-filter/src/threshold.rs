//! Locally adaptive thresholding
//!
//! Separates specimen foreground from a plate background whose brightness
//! drifts across the frame. Each pixel is compared against the mean gray
//! value of the square box centered on it (O(1) per pixel via
//! [`IntegralImage`]): the pixel becomes foreground only when it is darker
//! than its neighborhood by the configured tolerance fraction AND darker
//! than an absolute ceiling. The ceiling keeps glare reflections out of the
//! foreground even where they are locally dark.
//!
//! Deterministic, single pass, O(W·H) time and space.

use crate::error::{FilterError, FilterResult};
use crate::integral::IntegralImage;
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// Default box size for the local mean
pub const DEFAULT_BOX_SIZE: u32 = 15;

/// Default darkness tolerance fraction
pub const DEFAULT_TOLERANCE: f64 = 0.15;

/// Default absolute gray ceiling
pub const DEFAULT_CEILING: u8 = 230;

/// Parameters for [`adaptive_threshold`].
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveThresholdOptions {
    /// Side of the square neighborhood (odd, >= 3)
    pub box_size: u32,
    /// Required darkness relative to the local mean, in (0, 1)
    pub tolerance: f64,
    /// Absolute gray ceiling; samples at or above it are never foreground
    pub ceiling: u8,
}

impl Default for AdaptiveThresholdOptions {
    fn default() -> Self {
        Self {
            box_size: DEFAULT_BOX_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl AdaptiveThresholdOptions {
    pub fn with_box_size(mut self, box_size: u32) -> Self {
        self.box_size = box_size;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_ceiling(mut self, ceiling: u8) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Validate parameter ranges.
    pub fn validate(&self) -> FilterResult<()> {
        if self.box_size < 3 || self.box_size % 2 == 0 {
            return Err(FilterError::InvalidParameters(format!(
                "box_size must be odd and >= 3, got {}",
                self.box_size
            )));
        }
        if self.tolerance <= 0.0 || self.tolerance >= 1.0 {
            return Err(FilterError::InvalidParameters(format!(
                "tolerance must be in (0, 1), got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Convert a grayscale grid to a binary grid.
///
/// A pixel becomes [`FOREGROUND`] iff
/// `sample < local_mean * (1 - tolerance)` and `sample < ceiling`;
/// otherwise [`BACKGROUND`]. Always produces a grid of the input
/// dimensions.
pub fn adaptive_threshold(
    gray: &PixelGrid,
    options: &AdaptiveThresholdOptions,
) -> FilterResult<PixelGrid> {
    options.validate()?;

    let (width, height) = gray.dimensions();
    let integral = IntegralImage::build(gray);
    let mut binary = PixelGrid::new(width, height)?;

    let factor = 1.0 - options.tolerance;
    let out = binary.data_mut();
    for y in 0..height {
        let row = gray.row(y).unwrap_or(&[]);
        let base = y as usize * width as usize;
        for (x, &sample) in row.iter().enumerate() {
            if sample >= options.ceiling {
                continue;
            }
            let mean = integral.mean_box(x as u32, y, options.box_size);
            if (sample as f64) < mean * factor {
                out[base + x] = FOREGROUND;
            }
        }
    }

    Ok(binary)
}
