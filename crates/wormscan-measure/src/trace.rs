//! Skeleton length tracing
//!
//! Walks a unit-width skeleton from tip to tip, accumulating a calibrated
//! step cost per move: the horizontal scale for a purely horizontal step,
//! the vertical scale for a purely vertical one, and the diagonal of the
//! two for a diagonal step. The walk consumes a template copy so it never
//! revisits a pixel.
//!
//! A meaningful measurement needs a single open strand: exactly two
//! endpoints and no branch points. Any other topology produces the
//! [`INVALID_LENGTH`] sentinel and the caller rejects the region.

use crate::error::{MeasureError, MeasureResult};
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};
use wormscan_morph::topology::{branch_points, endpoints};

/// Sentinel length for a skeleton whose topology cannot be traced.
pub const INVALID_LENGTH: f64 = -1.0;

/// Default stage scale in units per pixel.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Physical units per pixel along each image axis.
///
/// Values come from stage calibration (steps per pixel converted to the
/// output unit) and are usually close to each other but not identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale_x: DEFAULT_SCALE,
            scale_y: DEFAULT_SCALE,
        }
    }
}

impl Calibration {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }

    pub fn with_scale_x(mut self, scale_x: f64) -> Self {
        self.scale_x = scale_x;
        self
    }

    pub fn with_scale_y(mut self, scale_y: f64) -> Self {
        self.scale_y = scale_y;
        self
    }

    /// Cost of one diagonal step.
    pub fn diagonal(&self) -> f64 {
        (self.scale_x * self.scale_x + self.scale_y * self.scale_y).sqrt()
    }

    pub fn validate(&self) -> MeasureResult<()> {
        for (name, value) in [("scale_x", self.scale_x), ("scale_y", self.scale_y)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MeasureError::InvalidCalibration(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Everything the validity gates need to know about one skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonMeasurement {
    /// Calibrated tip-to-tip length, or [`INVALID_LENGTH`].
    pub true_length: f64,
    /// Foreground pixel count of the skeleton.
    pub pixel_length: u32,
    pub endpoints: usize,
    pub branches: usize,
}

impl SkeletonMeasurement {
    pub fn is_traceable(&self) -> bool {
        self.true_length >= 0.0
    }
}

/// Classifies the skeleton topology and, when it is a single open strand,
/// traces its calibrated length.
pub fn measure_skeleton(
    skeleton: &PixelGrid,
    calibration: &Calibration,
) -> MeasureResult<SkeletonMeasurement> {
    calibration.validate()?;
    let tips = endpoints(skeleton);
    let branches = branch_points(skeleton);
    let pixel_length = skeleton.count_value(FOREGROUND);

    let true_length = if tips.len() == 2 && branches.is_empty() {
        trace_length(skeleton, tips[0], calibration)
    } else {
        INVALID_LENGTH
    };

    Ok(SkeletonMeasurement {
        true_length,
        pixel_length,
        endpoints: tips.len(),
        branches: branches.len(),
    })
}

/// Tip-to-tip walk. Returns a partial length if the strand dead-ends
/// before every pixel is consumed, which a clean skeleton never does.
fn trace_length(skeleton: &PixelGrid, start: (u32, u32), calibration: &Calibration) -> f64 {
    let width = skeleton.dimensions().0;
    let mut template = skeleton.clone();
    let total = template.count_value(FOREGROUND);
    let diagonal = calibration.diagonal();

    let mut cx = start.0 as i64;
    let mut cy = start.1 as i64;
    let mut visited = 1u32;
    let mut length = 0.0;

    'walk: while visited < total {
        template.data_mut()[(cy as u32 * width + cx as u32) as usize] = BACKGROUND;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) == (0, 0) {
                    continue;
                }
                let nx = cx + dx;
                let ny = cy + dy;
                if template.get_or(nx, ny, BACKGROUND) != FOREGROUND {
                    continue;
                }
                length += if dy == 0 {
                    calibration.scale_x
                } else if dx == 0 {
                    calibration.scale_y
                } else {
                    diagonal
                };
                cx = nx;
                cy = ny;
                visited += 1;
                continue 'walk;
            }
        }
        break;
    }
    length
}
