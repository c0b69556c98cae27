//! Wormscan Region - flood fill, labeling and blob statistics
//!
//! Region-level analysis of binary grids:
//!
//! - [`flood_fill`] / [`fill_holes`] - tolerance-bounded 4-connected fill,
//!   hole closing, exclusion masking
//! - [`label_components`] - two-pass union-find connected-component labeling
//! - [`region_stats`] - per-label centroid, bounding box, pixel count and
//!   average radius
//! - [`colorize_labels`] - deterministic debug rendering of a label map

pub mod colorize;
pub mod error;
pub mod floodfill;
pub mod label;
pub mod stats;

pub use colorize::{RGB_BYTES, colorize_labels, label_colors};
pub use error::{RegionError, RegionResult};
pub use floodfill::{fill_holes, flood_fill};
pub use label::{ConnectivityType, LabelOptions, Labeling, label_components};
pub use stats::{RegionStat, region_stats};
