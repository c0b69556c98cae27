//! Batch processing across clips
//!
//! A directory run hands every decoded frame to the pipeline under one
//! condition snapshot. A failed clip never aborts the run; its error is
//! kept in the outcome list next to the successes.

use crate::condition::DetectionCondition;
use crate::error::DetectResult;
use crate::pipeline::{Detection, detect_worms};
use log::warn;
use wormscan_core::PixelGrid;
use wormscan_filter::AdaptiveThresholdOptions;
use wormscan_measure::Calibration;

/// Result of one clip in a batch run.
#[derive(Debug)]
pub struct ClipOutcome {
    pub clip_id: u32,
    pub result: DetectResult<Vec<Detection>>,
}

impl ClipOutcome {
    /// Number of accepted regions, 0 for a failed clip.
    pub fn accepted(&self) -> usize {
        self.result.as_ref().map_or(0, Vec::len)
    }
}

/// Run the pipeline over every `(clip_id, grid)` item.
///
/// Clips are consumed by value so each frame's buffers are released
/// before the next frame is processed. The condition snapshot is shared
/// read-only across the whole run.
pub fn run_batch<I>(
    clips: I,
    condition: &DetectionCondition,
    calibration: &Calibration,
    threshold: &AdaptiveThresholdOptions,
) -> Vec<ClipOutcome>
where
    I: IntoIterator<Item = (u32, PixelGrid)>,
{
    let mut outcomes = Vec::new();
    for (clip_id, gray) in clips {
        let result = detect_worms(&gray, condition, calibration, threshold, clip_id);
        if let Err(e) = &result {
            warn!("clip {}: {}", clip_id, e);
        }
        outcomes.push(ClipOutcome { clip_id, result });
    }
    outcomes
}

/// Total accepted regions across a run, the value a report header carries
/// when no manual overrides are applied.
pub fn total_accepted(outcomes: &[ClipOutcome]) -> usize {
    outcomes.iter().map(ClipOutcome::accepted).sum()
}
