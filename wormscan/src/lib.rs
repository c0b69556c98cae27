//! Wormscan - binary-image morphometry for lab-specimen measurement
//!
//! Wormscan turns a grayscale frame of a specimen plate into calibrated
//! per-specimen measurements:
//!
//! - Spatially adaptive thresholding with glare exclusion
//! - Connected-component labeling and blob statistics
//! - Skeletonization with spur pruning, junction trimming and gap bridging
//! - Calibrated tip-to-tip length tracing and topology gating
//! - Preset-driven validity filtering and tab-separated reporting
//!
//! The same stages serve the three surrounding assays: elongated-worm
//! length measurement, ring-landmark detection for calibration masks, and
//! larva counting.
//!
//! # Example
//!
//! ```
//! use wormscan::detect::{DetectionCondition, detect_in_binary};
//! use wormscan::measure::Calibration;
//! use wormscan::{FOREGROUND, PixelGrid};
//!
//! // a 40x3 specimen bar on an empty 64x16 frame
//! let mut frame = PixelGrid::new(64, 16).unwrap();
//! for y in 6..9 {
//!     for x in 10..50 {
//!         frame.set(x, y, FOREGROUND).unwrap();
//!     }
//! }
//!
//! let condition = DetectionCondition::default()
//!     .with_area(50, 1000)
//!     .with_bounding_size(10, 60)
//!     .with_spur_threshold(3)
//!     .with_mean_fat(1.0, 10.0)
//!     .with_true_length(40.0, 200.0);
//! let worms = detect_in_binary(
//!     &frame,
//!     &condition,
//!     &Calibration::new(2.0, 2.0),
//!     0,
//! )
//! .unwrap();
//! assert_eq!(worms.len(), 1);
//! ```

// Re-export core types (grid containers used everywhere)
pub use wormscan_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use wormscan_detect as detect;
pub use wormscan_filter as filter;
pub use wormscan_io as io;
pub use wormscan_measure as measure;
pub use wormscan_morph as morph;
pub use wormscan_region as region;
