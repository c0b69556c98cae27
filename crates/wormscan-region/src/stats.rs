//! Per-label blob statistics
//!
//! Three passes over a label map: accumulate sums and bounding boxes,
//! divide for centroids, then revisit each region's bounding box to average
//! member-pixel distance to the centroid. The statistics are pure numbers;
//! validity thresholds are applied by callers so the same engine serves
//! ring detection, circle detection and worm-candidate filtering.

use crate::error::RegionResult;
use wormscan_core::{LabelMap, Rect};

/// Aggregate statistics for one labeled region.
#[derive(Debug, Clone)]
pub struct RegionStat {
    /// Label this region carries in the map
    pub id: u32,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub pixel_count: u32,
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
    /// Mean Euclidean distance of member pixels to the centroid
    pub average_radius: f64,
    /// Set later by the caller's threshold gates; starts false
    pub valid: bool,
}

impl RegionStat {
    /// Bounding box as a rectangle (inclusive min/max converted to w/h).
    pub fn bounds(&self) -> Rect {
        Rect::from_min_max(self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Larger bounding-box dimension.
    pub fn max_dim(&self) -> u32 {
        self.width().max(self.height())
    }
}

#[derive(Clone)]
struct Accum {
    count: u32,
    sum_x: u64,
    sum_y: u64,
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl Default for Accum {
    fn default() -> Self {
        Self {
            count: 0,
            sum_x: 0,
            sum_y: 0,
            min_x: u32::MAX,
            max_x: 0,
            min_y: u32::MAX,
            max_y: 0,
        }
    }
}

/// Compute statistics for every label `1..=count` in the map.
///
/// Regions are returned in label order. `valid` starts `false` everywhere.
pub fn region_stats(labels: &LabelMap, count: u32) -> RegionResult<Vec<RegionStat>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    let (width, height) = labels.dimensions();
    let mut accums = vec![Accum::default(); count as usize];

    for y in 0..height {
        for x in 0..width {
            let label = labels.get_or_zero(x as i64, y as i64);
            if label == 0 || label > count {
                continue;
            }
            let a = &mut accums[(label - 1) as usize];
            a.count += 1;
            a.sum_x += x as u64;
            a.sum_y += y as u64;
            a.min_x = a.min_x.min(x);
            a.max_x = a.max_x.max(x);
            a.min_y = a.min_y.min(y);
            a.max_y = a.max_y.max(y);
        }
    }

    let mut stats: Vec<RegionStat> = accums
        .iter()
        .enumerate()
        .map(|(i, a)| RegionStat {
            id: i as u32 + 1,
            centroid_x: if a.count > 0 {
                a.sum_x as f64 / a.count as f64
            } else {
                0.0
            },
            centroid_y: if a.count > 0 {
                a.sum_y as f64 / a.count as f64
            } else {
                0.0
            },
            pixel_count: a.count,
            min_x: a.min_x.min(a.max_x),
            max_x: a.max_x,
            min_y: a.min_y.min(a.max_y),
            max_y: a.max_y,
            average_radius: 0.0,
            valid: false,
        })
        .collect();

    // radius pass, restricted to each region's bounding box
    for stat in &mut stats {
        if stat.pixel_count == 0 {
            continue;
        }
        let mut sum_dist = 0.0f64;
        for y in stat.min_y..=stat.max_y {
            for x in stat.min_x..=stat.max_x {
                if labels.get_or_zero(x as i64, y as i64) == stat.id {
                    let dx = x as f64 - stat.centroid_x;
                    let dy = y as f64 - stat.centroid_y;
                    sum_dist += (dx * dx + dy * dy).sqrt();
                }
            }
        }
        stat.average_radius = sum_dist / stat.pixel_count as f64;
    }

    Ok(stats)
}
