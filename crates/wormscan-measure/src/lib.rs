//! wormscan-measure - Calibrated skeleton measurement
//!
//! This crate turns finalized skeletons into numbers:
//!
//! - Length tracing: tip-to-tip walk with per-axis stage calibration
//! - Topology summary consumed by the validity gates
//! - Hough line detection for locating the stage calibration line

mod error;
pub mod hough;
pub mod trace;

pub use error::{MeasureError, MeasureResult};

pub use hough::{HoughLine, HoughTransform, THETA_BINS};
pub use trace::{
    Calibration, DEFAULT_SCALE, INVALID_LENGTH, SkeletonMeasurement, measure_skeleton,
};
