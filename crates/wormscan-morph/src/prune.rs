//! Spur removal
//!
//! Two-phase prune for thinned skeletons. Erosion eats every spur point
//! (3x3 foreground count of 1 or 2, the pixel included) for a fixed number
//! of iterations, which consumes whiskers from their free tip inward but
//! also shortens the genuine tips of the body. Regrowth then walks each
//! surviving endpoint back out along the pre-erosion template, stopping at
//! an original endpoint, so true tips recover their full length while
//! whiskers shorter than the iteration count stay gone.
//!
//! Erosion stalls one pixel short of a junction (that pixel sees the
//! through-line in its neighborhood); the trim pass picks up the leftover
//! stub afterwards.

use crate::topology::{endpoints, neighborhood_count};
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// Erodes spur points `iterations` times, then regrows genuine tips.
///
/// Each erosion pass collects every spur point against the same snapshot
/// and erases them together, so the scan order never influences the result.
pub fn prune_spurs(skeleton: &PixelGrid, iterations: u32) -> PixelGrid {
    let (width, height) = skeleton.dimensions();
    let mut out = skeleton.clone();

    let mut to_clear: Vec<(u32, u32)> = Vec::new();
    for _ in 0..iterations {
        to_clear.clear();
        for y in 0..height {
            for x in 0..width {
                if out.get(x, y) != Some(FOREGROUND) {
                    continue;
                }
                if neighborhood_count(&out, x as i64, y as i64) <= 2 {
                    to_clear.push((x, y));
                }
            }
        }
        if to_clear.is_empty() {
            break;
        }
        for &(x, y) in &to_clear {
            out.data_mut()[(y * width + x) as usize] = BACKGROUND;
        }
    }

    let mut original_tip = vec![false; (width as usize) * (height as usize)];
    for (x, y) in endpoints(skeleton) {
        original_tip[(y * width + x) as usize] = true;
    }

    for (start_x, start_y) in endpoints(&out) {
        let mut cx = start_x as i64;
        let mut cy = start_y as i64;
        'walk: for _ in 0..iterations {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if (dx, dy) == (0, 0) {
                        continue;
                    }
                    let nx = cx + dx;
                    let ny = cy + dy;
                    if skeleton.get_or(nx, ny, BACKGROUND) == FOREGROUND
                        && out.get_or(nx, ny, FOREGROUND) == BACKGROUND
                    {
                        let idx = (ny as u32 * width + nx as u32) as usize;
                        out.data_mut()[idx] = FOREGROUND;
                        if original_tip[idx] {
                            break 'walk;
                        }
                        cx = nx;
                        cy = ny;
                        continue 'walk;
                    }
                }
            }
            // template exhausted around the cursor
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::branch_points;

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

    fn line(width: u32, height: u32, y: u32, x0: u32, x1: u32) -> PixelGrid {
        let mut g = PixelGrid::new(width, height).unwrap();
        for x in x0..=x1 {
            g.set(x, y, FOREGROUND).unwrap();
        }
        g
    }

    #[test]
    fn test_prune_restores_clean_line() {
        let g = line(26, 7, 3, 2, 23);
        let pruned = prune_spurs(&g, 6);
        assert_eq!(pruned.data(), g.data());
    }

    #[test]
    fn test_prune_eats_whisker_down_to_stub() {
        // three-pixel whisker hanging off the middle of a line; erosion
        // consumes it until the junction-adjacent pixel stalls at count 4
        let mut g = line(26, 8, 5, 2, 23);
        for y in 2..=4 {
            g.set(10, y, FOREGROUND).unwrap();
        }
        let pruned = prune_spurs(&g, 6);

        assert_eq!(pruned.get(10, 2), Some(BACKGROUND));
        assert_eq!(pruned.get(10, 3), Some(BACKGROUND));
        assert_eq!(pruned.get(10, 4), Some(FOREGROUND));
        // body fully regrown
        for x in 2..=23 {
            assert_eq!(pruned.get(x, 5), Some(FOREGROUND), "body pixel {x}");
        }
    }

    #[test]
    fn test_prune_keeps_whisker_longer_than_iterations() {
        let mut g = line(26, 12, 9, 2, 23);
        for y in 2..=8 {
            g.set(10, y, FOREGROUND).unwrap();
        }
        let pruned = prune_spurs(&g, 4);
        // a seven-pixel arm survives a four-iteration prune: its stump
        // remains an endpoint and regrows
        assert_eq!(pruned.get(10, 2), Some(FOREGROUND));
        assert_eq!(branch_points(&pruned).len(), 1);
    }

    #[test]
    fn test_prune_removes_isolated_speck() {
        let mut g = line(20, 9, 4, 3, 16);
        g.set(1, 1, FOREGROUND).unwrap();
        let pruned = prune_spurs(&g, 2);
        assert_eq!(pruned.get(1, 1), Some(BACKGROUND));
        assert_eq!(pruned.count_value(FOREGROUND), 14);
    }

    #[test]
    fn test_prune_consumes_short_object_entirely() {
        let g = line(12, 5, 2, 4, 7);
        let pruned = prune_spurs(&g, 6);
        assert_eq!(pruned.count_value(FOREGROUND), 0);
    }

    #[test]
    fn test_prune_zero_iterations_is_identity() {
        let g = binary(&[
            "........",
            ".######.",
            "...#....",
            "........",
        ]);
        let pruned = prune_spurs(&g, 0);
        assert_eq!(pruned.data(), g.data());
    }
}
