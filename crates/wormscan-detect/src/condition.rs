//! Detection condition thresholds
//!
//! The nine validity thresholds for one processing session, loaded from a
//! named preset (see [`crate::preset`]) and passed read-only through the
//! pipeline. Every comparison is a strict inequality: a value exactly on a
//! bound is rejected.

use crate::error::{DetectError, DetectResult};
use wormscan_region::RegionStat;

/// Validity thresholds for one processing session.
///
/// The defaults are the stock worm-assay profile. A condition is
/// immutable for the duration of one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionCondition {
    /// Region pixel count must exceed this
    pub min_area: u32,
    /// Region pixel count must stay below this
    pub max_area: u32,
    /// Larger bounding-box dimension must exceed this
    pub min_bounding_size: u32,
    /// Larger bounding-box dimension must stay below this
    pub max_bounding_size: u32,
    /// Spur erosion/regrowth iteration count for the pruner
    pub spur_threshold: u32,
    /// Fatness (area / skeleton pixel length) must exceed this
    pub min_mean_fat: f64,
    /// Fatness must stay below this
    pub max_mean_fat: f64,
    /// Calibrated length must exceed this
    pub min_true_length: f64,
    /// Calibrated length must stay below this
    pub max_true_length: f64,
}

impl Default for DetectionCondition {
    fn default() -> Self {
        Self {
            min_area: 350,
            max_area: 8000,
            min_bounding_size: 45,
            max_bounding_size: 250,
            spur_threshold: 6,
            min_mean_fat: 8.0,
            max_mean_fat: 45.0,
            min_true_length: 250.0,
            max_true_length: 2000.0,
        }
    }
}

impl DetectionCondition {
    pub fn with_area(mut self, min: u32, max: u32) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    pub fn with_bounding_size(mut self, min: u32, max: u32) -> Self {
        self.min_bounding_size = min;
        self.max_bounding_size = max;
        self
    }

    pub fn with_spur_threshold(mut self, spur_threshold: u32) -> Self {
        self.spur_threshold = spur_threshold;
        self
    }

    pub fn with_mean_fat(mut self, min: f64, max: f64) -> Self {
        self.min_mean_fat = min;
        self.max_mean_fat = max;
        self
    }

    pub fn with_true_length(mut self, min: f64, max: f64) -> Self {
        self.min_true_length = min;
        self.max_true_length = max;
        self
    }

    /// Validate threshold ranges.
    pub fn validate(&self) -> DetectResult<()> {
        if self.min_area >= self.max_area {
            return Err(DetectError::InvalidCondition(format!(
                "area range is empty: {}..{}",
                self.min_area, self.max_area
            )));
        }
        if self.min_bounding_size >= self.max_bounding_size {
            return Err(DetectError::InvalidCondition(format!(
                "bounding size range is empty: {}..{}",
                self.min_bounding_size, self.max_bounding_size
            )));
        }
        if !self.min_mean_fat.is_finite()
            || !self.max_mean_fat.is_finite()
            || self.min_mean_fat < 0.0
            || self.min_mean_fat >= self.max_mean_fat
        {
            return Err(DetectError::InvalidCondition(format!(
                "mean fat range is empty: {}..{}",
                self.min_mean_fat, self.max_mean_fat
            )));
        }
        if !self.min_true_length.is_finite()
            || !self.max_true_length.is_finite()
            || self.min_true_length < 0.0
            || self.min_true_length >= self.max_true_length
        {
            return Err(DetectError::InvalidCondition(format!(
                "true length range is empty: {}..{}",
                self.min_true_length, self.max_true_length
            )));
        }
        Ok(())
    }

    /// First-pass gate: region pixel count.
    pub fn area_accepts(&self, pixel_count: u32) -> bool {
        self.min_area < pixel_count && pixel_count < self.max_area
    }

    /// First-pass gate: larger bounding-box dimension.
    pub fn bounding_accepts(&self, max_dim: u32) -> bool {
        self.min_bounding_size < max_dim && max_dim < self.max_bounding_size
    }

    /// Final gate: fatness = region area / skeleton pixel length.
    pub fn fatness_accepts(&self, fatness: f64) -> bool {
        self.min_mean_fat < fatness && fatness < self.max_mean_fat
    }

    /// Final gate: calibrated length. The sentinel -1 never passes.
    pub fn length_accepts(&self, true_length: f64) -> bool {
        self.min_true_length < true_length && true_length < self.max_true_length
    }
}

/// Apply the first-pass area and bounding gates, flipping `valid` on every
/// region that passes both.
pub fn mark_valid(stats: &mut [RegionStat], condition: &DetectionCondition) {
    for stat in stats {
        stat.valid =
            condition.area_accepts(stat.pixel_count) && condition.bounding_accepts(stat.max_dim());
    }
}
