//! The per-region detection pipeline
//!
//! One call takes a frame from grayscale samples to accepted
//! [`WormRecord`]s:
//!
//! threshold → label (8-way) → statistics → size gates → per region:
//! padded mask crop → close → fill holes → thin → prune spurs → trim →
//! bridge gaps → trim → measure → fatness/length/topology gates.
//!
//! Gate rejections are not errors; a rejected region is skipped with a
//! `debug!` note. Errors abort the whole frame and are reported per clip
//! by the batch driver.

use crate::condition::{DetectionCondition, mark_valid};
use crate::error::DetectResult;
use crate::record::WormRecord;
use log::{debug, trace};
use wormscan_core::{FOREGROUND, LabelMap, PixelGrid, Rect};
use wormscan_filter::{AdaptiveThresholdOptions, adaptive_threshold};
use wormscan_measure::{Calibration, SkeletonMeasurement, measure_skeleton};
use wormscan_morph::{bridge_gaps, close, prune_spurs, thin, trim};
use wormscan_region::{LabelOptions, RegionStat, fill_holes, label_components, region_stats};

/// Padding around a region's bounding box when cropping its mask
pub const CROP_MARGIN: i32 = 3;

/// Gray value of the body mask in [`Detection::skeleton_overlay`]
pub const OVERLAY_BODY: u8 = 128;

/// One accepted region with its intermediate artifacts.
///
/// The artifacts let the surrounding application emit its per-region side
/// images without re-running any stage.
#[derive(Debug, Clone)]
pub struct Detection {
    pub record: WormRecord,
    /// Padded crop rectangle in full-image coordinates
    pub crop: Rect,
    /// Closed, hole-filled body mask within the crop
    pub mask: PixelGrid,
    /// Final repaired skeleton within the crop
    pub skeleton: PixelGrid,
    pub measurement: SkeletonMeasurement,
}

impl Detection {
    /// Render the per-region side artifact: body at [`OVERLAY_BODY`],
    /// skeleton at full foreground.
    pub fn skeleton_overlay(&self) -> PixelGrid {
        let mut overlay = self.mask.clone();
        for v in overlay.data_mut() {
            if *v == FOREGROUND {
                *v = OVERLAY_BODY;
            }
        }
        let out = overlay.data_mut();
        for (i, &s) in self.skeleton.data().iter().enumerate() {
            if s == FOREGROUND {
                out[i] = FOREGROUND;
            }
        }
        overlay
    }
}

/// Run the full pipeline on a grayscale frame.
pub fn detect_worms(
    gray: &PixelGrid,
    condition: &DetectionCondition,
    calibration: &Calibration,
    threshold: &AdaptiveThresholdOptions,
    clip_id: u32,
) -> DetectResult<Vec<Detection>> {
    let binary = adaptive_threshold(gray, threshold)?;
    detect_in_binary(&binary, condition, calibration, clip_id)
}

/// Run the pipeline on an already-binarized frame.
///
/// Entry point for callers that binarize elsewhere (ring masks, trap
/// frames with their own thresholding).
pub fn detect_in_binary(
    binary: &PixelGrid,
    condition: &DetectionCondition,
    calibration: &Calibration,
    clip_id: u32,
) -> DetectResult<Vec<Detection>> {
    condition.validate()?;
    calibration.validate()?;

    let labeling = label_components(binary, &LabelOptions::default())?;
    let mut stats = region_stats(&labeling.map, labeling.count)?;
    mark_valid(&mut stats, condition);

    let candidates = stats.iter().filter(|s| s.valid).count();
    debug!(
        "clip {}: {} of {} regions pass the size gates",
        clip_id, candidates, labeling.count
    );

    let mut detections = Vec::new();
    for stat in stats.iter().filter(|s| s.valid) {
        if let Some(detection) =
            process_region(&labeling.map, stat, condition, calibration, clip_id)?
        {
            detections.push(detection);
        }
    }

    debug!("clip {}: {} regions accepted", clip_id, detections.len());
    Ok(detections)
}

/// Crop, repair and measure one size-gated region.
///
/// Returns `Ok(None)` when a final gate rejects the region.
fn process_region(
    labels: &LabelMap,
    stat: &RegionStat,
    condition: &DetectionCondition,
    calibration: &Calibration,
    clip_id: u32,
) -> DetectResult<Option<Detection>> {
    let (width, height) = labels.dimensions();
    let Some(crop) = stat.bounds().expand(CROP_MARGIN).clip_to(width, height) else {
        return Ok(None);
    };

    let mask = labels.mask_of(stat.id, &crop)?;
    let mask = fill_holes(&close(&mask)?)?;

    let skeleton = thin(&mask);
    let skeleton = prune_spurs(&skeleton, condition.spur_threshold);
    let skeleton = trim(&skeleton)?;
    // bridging can reintroduce trim-eligible corners, so trim again after
    let skeleton = bridge_gaps(&skeleton, &mask)?;
    let skeleton = trim(&skeleton)?;

    let measurement = measure_skeleton(&skeleton, calibration)?;
    trace!(
        "region {}: {} skeleton px, true length {:.1}, {} endpoints / {} branches",
        stat.id,
        measurement.pixel_length,
        measurement.true_length,
        measurement.endpoints,
        measurement.branches
    );

    if !measurement.is_traceable() {
        debug!(
            "region {}: topology {} endpoints / {} branches, skipped",
            stat.id, measurement.endpoints, measurement.branches
        );
        return Ok(None);
    }
    // a zero-length skeleton must never reach the fatness divisor
    if measurement.pixel_length == 0 {
        return Ok(None);
    }
    let fatness = stat.pixel_count as f64 / measurement.pixel_length as f64;
    if !condition.fatness_accepts(fatness) {
        debug!("region {}: fatness {:.2} out of range, skipped", stat.id, fatness);
        return Ok(None);
    }
    if !condition.length_accepts(measurement.true_length) {
        debug!(
            "region {}: true length {:.1} out of range, skipped",
            stat.id, measurement.true_length
        );
        return Ok(None);
    }

    Ok(Some(Detection {
        record: WormRecord {
            position_x: stat.min_x,
            position_y: stat.min_y,
            width: stat.width(),
            height: stat.height(),
            true_length: measurement.true_length,
            pixel_length: measurement.pixel_length,
            clip_id,
        },
        crop,
        mask,
        skeleton,
        measurement,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wormscan_core::BACKGROUND;

    /// Condition sized for the small synthetic fixtures below.
    fn bar_condition() -> DetectionCondition {
        DetectionCondition::default()
            .with_area(50, 1000)
            .with_bounding_size(10, 60)
            .with_spur_threshold(3)
            .with_mean_fat(1.0, 10.0)
            .with_true_length(40.0, 200.0)
    }

    fn bar_frame() -> PixelGrid {
        // 40x3 bar at (10, 6)
        let mut binary = PixelGrid::new(64, 16).unwrap();
        for y in 6..9 {
            for x in 10..50 {
                binary.set(x, y, FOREGROUND).unwrap();
            }
        }
        binary
    }

    #[test]
    fn test_detect_bar_end_to_end() {
        let binary = bar_frame();
        let calibration = Calibration::new(2.0, 2.0);
        let detections =
            detect_in_binary(&binary, &bar_condition(), &calibration, 5).unwrap();
        assert_eq!(detections.len(), 1);

        let d = &detections[0];
        assert_eq!(d.record.position_x, 10);
        assert_eq!(d.record.position_y, 6);
        assert_eq!(d.record.width, 40);
        assert_eq!(d.record.height, 3);
        assert_eq!(d.record.clip_id, 5);

        // the bridger extends the thinned line to both mask edges, so the
        // skeleton spans the full 40-pixel body width
        assert_eq!(d.measurement.endpoints, 2);
        assert_eq!(d.measurement.branches, 0);
        assert_eq!(d.record.pixel_length, 40);
        assert!((d.record.true_length - 78.0).abs() < 1e-9);

        assert_eq!(d.crop, Rect::new(7, 3, 46, 9).unwrap());
        assert_eq!(d.mask.dimensions(), (46, 9));
        assert_eq!(d.skeleton.dimensions(), (46, 9));
        assert_eq!(d.mask.count_value(FOREGROUND), 120);
    }

    #[test]
    fn test_skeleton_overlay_values() {
        let binary = bar_frame();
        let calibration = Calibration::new(2.0, 2.0);
        let detections =
            detect_in_binary(&binary, &bar_condition(), &calibration, 0).unwrap();
        let overlay = detections[0].skeleton_overlay();

        assert_eq!(overlay.count_value(FOREGROUND), 40);
        assert_eq!(overlay.count_value(OVERLAY_BODY), 80);
        assert_eq!(
            overlay.count_value(BACKGROUND),
            46 * 9 - 120
        );
    }

    #[test]
    fn test_speck_rejected_by_size_gates() {
        let mut binary = PixelGrid::new(64, 16).unwrap();
        for y in 4..7 {
            for x in 20..23 {
                binary.set(x, y, FOREGROUND).unwrap();
            }
        }
        let detections = detect_in_binary(
            &binary,
            &bar_condition(),
            &Calibration::new(2.0, 2.0),
            0,
        )
        .unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_branched_region_rejected() {
        // a cross thins to a skeleton with branch points
        let mut binary = PixelGrid::new(32, 32).unwrap();
        for y in 14..17 {
            for x in 6..26 {
                binary.set(x, y, FOREGROUND).unwrap();
            }
        }
        for y in 6..26 {
            for x in 14..17 {
                binary.set(x, y, FOREGROUND).unwrap();
            }
        }
        let detections = detect_in_binary(
            &binary,
            &bar_condition(),
            &Calibration::new(2.0, 2.0),
            0,
        )
        .unwrap();
        assert!(detections.is_empty());
    }

    #[test]
    fn test_invalid_condition_fails_fast() {
        let binary = PixelGrid::new(8, 8).unwrap();
        let condition = DetectionCondition::default().with_area(500, 100);
        let result = detect_in_binary(
            &binary,
            &condition,
            &Calibration::new(1.0, 1.0),
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_worms_from_grayscale() {
        // dark bar on a bright field; adaptive thresholding recovers it
        let mut gray = PixelGrid::filled(64, 16, 200).unwrap();
        for y in 6..9 {
            for x in 10..50 {
                gray.set(x, y, 20).unwrap();
            }
        }
        let detections = detect_worms(
            &gray,
            &bar_condition(),
            &Calibration::new(2.0, 2.0),
            &AdaptiveThresholdOptions::default(),
            9,
        )
        .unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].record.width, 40);
        assert_eq!(detections[0].record.clip_id, 9);
    }
}
