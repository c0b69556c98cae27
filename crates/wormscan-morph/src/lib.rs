//! wormscan-morph - Binary morphology and skeleton repair
//!
//! This crate provides the morphological half of the measurement pipeline:
//!
//! - Binary morphology: erosion, dilation, opening, closing with a 3x3 brick
//! - Zhang-Suen thinning down to unit-width skeletons
//! - Skeleton topology: endpoint and branch-point classification
//! - Spur pruning with endpoint regrowth
//! - Pattern-driven junction and corner trimming
//! - Gap bridging for skeletons broken by binarization noise
//! - 3x3 pattern strings shared by the trim rules

pub mod binary;
pub mod bridge;
mod error;
pub mod pattern;
pub mod prune;
pub mod thin;
pub mod topology;
pub mod trim;

pub use error::{MorphError, MorphResult};

pub use binary::{close, dilate, erode, open};
pub use bridge::{BRIDGE_MARKER, BRIDGE_STEP, TAIL_LENGTH, bridge_gaps};
pub use pattern::{Pattern, Requirement};
pub use prune::prune_spurs;
pub use thin::thin;
pub use topology::{
    BRANCH_MERGE_RADIUS, branch_points, endpoints, is_endpoint, neighborhood_count,
};
pub use trim::{apply_patterns, corner_patterns, junction_patterns, trim};
