//! Skeleton topology
//!
//! Endpoint and branch classification over the 3x3 neighborhood,
//! foreground count including the pixel itself:
//!
//! - count 2: endpoint (one connected neighbor)
//! - count 1 or 2: spur candidate (isolated pixel or endpoint)
//! - count >= 4: branch point (three or more connected neighbors)
//!
//! Thinning tends to smear a physical junction across adjacent pixels, so
//! branch points within Chebyshev distance 2 of each other collapse into a
//! single representative before they are counted for gating.

use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// Chebyshev radius inside which branch points merge
pub const BRANCH_MERGE_RADIUS: i64 = 2;

/// Foreground count of the 3x3 neighborhood including (x, y) itself.
#[inline]
pub fn neighborhood_count(grid: &PixelGrid, x: i64, y: i64) -> u32 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if grid.get_or(x + dx, y + dy, BACKGROUND) == FOREGROUND {
                count += 1;
            }
        }
    }
    count
}

/// Whether (x, y) is a foreground pixel with exactly one neighbor.
#[inline]
pub fn is_endpoint(grid: &PixelGrid, x: i64, y: i64) -> bool {
    grid.get_or(x, y, BACKGROUND) == FOREGROUND && neighborhood_count(grid, x, y) == 2
}

/// All endpoints in raster order.
pub fn endpoints(grid: &PixelGrid) -> Vec<(u32, u32)> {
    let (width, height) = grid.dimensions();
    let mut points = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if is_endpoint(grid, x as i64, y as i64) {
                points.push((x, y));
            }
        }
    }
    points
}

/// Branch points in raster order, deduplicated within
/// [`BRANCH_MERGE_RADIUS`]: the first candidate of each cluster stands for
/// the whole junction.
pub fn branch_points(grid: &PixelGrid) -> Vec<(u32, u32)> {
    let (width, height) = grid.dimensions();
    let mut representatives: Vec<(u32, u32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) != Some(FOREGROUND) {
                continue;
            }
            if neighborhood_count(grid, x as i64, y as i64) < 4 {
                continue;
            }
            let near_existing = representatives.iter().any(|&(rx, ry)| {
                (rx as i64 - x as i64).abs() <= BRANCH_MERGE_RADIUS
                    && (ry as i64 - y as i64).abs() <= BRANCH_MERGE_RADIUS
            });
            if !near_existing {
                representatives.push((x, y));
            }
        }
    }
    representatives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(rows: &[&str]) -> PixelGrid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let data: Vec<u8> = rows
            .iter()
            .flat_map(|r| r.bytes())
            .map(|b| if b == b'#' { FOREGROUND } else { BACKGROUND })
            .collect();
        PixelGrid::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_line_has_two_endpoints_no_branches() {
        let g = binary(&[
            ".....",
            ".###.",
            ".....",
        ]);
        assert_eq!(endpoints(&g), vec![(1, 1), (3, 1)]);
        assert!(branch_points(&g).is_empty());
    }

    #[test]
    fn test_isolated_pixel_is_not_endpoint() {
        let g = binary(&[
            "...",
            ".#.",
            "...",
        ]);
        // count 1: spur candidate but not an endpoint
        assert_eq!(neighborhood_count(&g, 1, 1), 1);
        assert!(endpoints(&g).is_empty());
    }

    #[test]
    fn test_cross_center_is_branch() {
        let g = binary(&[
            "..#..",
            "..#..",
            "#####",
            "..#..",
            "..#..",
        ]);
        assert_eq!(neighborhood_count(&g, 2, 2), 5);
        assert_eq!(endpoints(&g), vec![(2, 0), (0, 2), (4, 2), (2, 4)]);
        // every pixel adjacent to the junction qualifies; the raster-first
        // one (2, 1) stands for the cluster
        assert_eq!(branch_points(&g), vec![(2, 1)]);
    }

    #[test]
    fn test_adjacent_branch_pixels_deduplicate() {
        // Y junction thinned onto two adjacent rows: both qualify, one
        // representative survives
        let g = binary(&[
            "#.#..",
            ".#...",
            ".#...",
            "#.#..",
        ]);
        let pts: Vec<(u32, u32)> = {
            let mut all = Vec::new();
            for y in 0..4i64 {
                for x in 0..5i64 {
                    if g.get_or(x, y, BACKGROUND) == FOREGROUND
                        && neighborhood_count(&g, x, y) >= 4
                    {
                        all.push((x as u32, y as u32));
                    }
                }
            }
            all
        };
        assert_eq!(pts, vec![(1, 1), (1, 2)]);
        assert_eq!(branch_points(&g), vec![(1, 1)]);
    }

    #[test]
    fn test_distant_branches_stay_separate() {
        let g = binary(&[
            ".#....#.",
            "###..###",
            ".#....#.",
        ]);
        assert_eq!(branch_points(&g), vec![(1, 1), (6, 1)]);
    }
}
