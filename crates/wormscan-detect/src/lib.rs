//! wormscan-detect - Specimen detection and reporting
//!
//! This crate strings the measurement stages into the full detection
//! pipeline and owns everything around it:
//!
//! - [`DetectionCondition`] - the nine validity thresholds, with strict
//!   inequality gates
//! - [`preset`] - the `#TITLE` / `key=value` / `}` profile format
//! - [`detect_worms`] / [`detect_in_binary`] - grayscale or binary frame
//!   to accepted [`Detection`]s
//! - [`run_batch`] - per-clip outcomes that survive individual failures
//! - [`WormRecord`], [`CountOverride`], [`write_report`] - tab-separated
//!   results files

pub mod batch;
pub mod condition;
mod error;
pub mod pipeline;
pub mod preset;
pub mod record;
pub mod report;

pub use error::{DetectError, DetectResult};

pub use batch::{ClipOutcome, run_batch, total_accepted};
pub use condition::{DetectionCondition, mark_valid};
pub use pipeline::{CROP_MARGIN, Detection, OVERLAY_BODY, detect_in_binary, detect_worms};
pub use preset::{NamedPreset, find_preset, format_preset, parse_presets};
pub use record::{CountOverride, WormRecord};
pub use report::{format_record_line, report_to_string, write_report};
