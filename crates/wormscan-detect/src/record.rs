//! Accepted-region records and manual overrides

/// One accepted specimen region.
///
/// Created only for regions that pass every validity gate; position and
/// size are the unpadded bounding box in full-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WormRecord {
    /// Bounding-box left edge
    pub position_x: u32,
    /// Bounding-box top edge
    pub position_y: u32,
    pub width: u32,
    pub height: u32,
    /// Calibrated tip-to-tip length in physical units
    pub true_length: f64,
    /// Skeleton foreground pixel count
    pub pixel_length: u32,
    /// Identifier of the source clip
    pub clip_id: u32,
}

/// Manual-inspection override attached to a record after detection.
///
/// An overridden record never changes its measured fields; the override
/// only adjusts how the record contributes to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountOverride {
    /// Keep the record as detected
    #[default]
    Unchanged,
    /// The inspector rejected the record
    Deleted,
    /// The region actually holds this many specimens (e.g. an overlap)
    OverriddenCount(u32),
}

impl CountOverride {
    /// How many specimens this record contributes to the report total.
    pub fn count(&self) -> u32 {
        match self {
            CountOverride::Unchanged => 1,
            CountOverride::Deleted => 0,
            CountOverride::OverriddenCount(n) => *n,
        }
    }

    /// Whether the record's line appears in the report body.
    pub fn keeps_line(&self) -> bool {
        *self != CountOverride::Deleted
    }
}
