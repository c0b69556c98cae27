//! Tolerance-bounded flood fill
//!
//! The fill is 4-connected and seed-relative: a candidate pixel joins the
//! region iff its value differs from the *seed's original value* by at most
//! the tolerance, so a slow gradient cannot chain the fill arbitrarily far
//! from the seed's gray level. A separate "done" membership grid
//! distinguishes filled-or-queued pixels from untouched ones and prevents
//! duplicate enqueueing.
//!
//! Hole filling reuses the same traversal from the border inward: whatever
//! background the border flood cannot reach is an enclosed hole.

use std::collections::VecDeque;

use crate::error::{RegionError, RegionResult};
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// 4-connected neighbor offsets (up, left, right, down)
const NEIGHBORS_4: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Flood-fill from a seed, returning a new grid.
///
/// Pixels 4-connected to the seed whose value lies within `tolerance` of
/// the seed's original value are set to `fill_value`; everything else is
/// copied unchanged. A seed outside the grid is a precondition violation
/// and fails fast.
pub fn flood_fill(
    grid: &PixelGrid,
    seed_x: u32,
    seed_y: u32,
    fill_value: u8,
    tolerance: u8,
) -> RegionResult<PixelGrid> {
    let Some(seed_value) = grid.get(seed_x, seed_y) else {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    };

    let (width, height) = grid.dimensions();
    let mut out = grid.clone();
    let mut done = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();

    done[seed_y as usize * width as usize + seed_x as usize] = true;
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        out.data_mut()[y as usize * width as usize + x as usize] = fill_value;

        for (dx, dy) in NEIGHBORS_4 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let Some(value) = grid.get_signed(nx, ny) else {
                continue;
            };
            let idx = ny as usize * width as usize + nx as usize;
            if done[idx] {
                continue;
            }
            if (value as i32 - seed_value as i32).unsigned_abs() <= tolerance as u32 {
                done[idx] = true;
                queue.push_back((nx as u32, ny as u32));
            }
        }
    }

    Ok(out)
}

/// Fill enclosed holes in a binary grid.
///
/// Background is flooded 4-connectedly from all four border lines; any
/// background pixel the flood never reaches is enclosed by foreground and
/// becomes [`FOREGROUND`] in the output.
pub fn fill_holes(binary: &PixelGrid) -> RegionResult<PixelGrid> {
    let (width, height) = binary.dimensions();
    let mut reached = vec![false; width as usize * height as usize];
    let mut queue = VecDeque::new();

    let mut seed = |x: u32, y: u32, reached: &mut Vec<bool>, queue: &mut VecDeque<(u32, u32)>| {
        let idx = y as usize * width as usize + x as usize;
        if !reached[idx] && binary.get(x, y) == Some(BACKGROUND) {
            reached[idx] = true;
            queue.push_back((x, y));
        }
    };
    for x in 0..width {
        seed(x, 0, &mut reached, &mut queue);
        seed(x, height - 1, &mut reached, &mut queue);
    }
    for y in 0..height {
        seed(0, y, &mut reached, &mut queue);
        seed(width - 1, y, &mut reached, &mut queue);
    }

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS_4 {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if binary.get_signed(nx, ny) != Some(BACKGROUND) {
                continue;
            }
            let idx = ny as usize * width as usize + nx as usize;
            if !reached[idx] {
                reached[idx] = true;
                queue.push_back((nx as u32, ny as u32));
            }
        }
    }

    let mut out = PixelGrid::new(width, height)?;
    let data = out.data_mut();
    for (idx, was_reached) in reached.iter().enumerate() {
        data[idx] = if *was_reached { BACKGROUND } else { FOREGROUND };
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&[u8]]) -> PixelGrid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let data: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        PixelGrid::from_raw(width, height, data).unwrap()
    }

    const F: u8 = FOREGROUND;
    const B: u8 = BACKGROUND;

    #[test]
    fn test_seed_out_of_bounds_fails_fast() {
        let g = PixelGrid::new(4, 4).unwrap();
        assert!(matches!(
            flood_fill(&g, 4, 0, 128, 0),
            Err(RegionError::InvalidSeed { x: 4, y: 0 })
        ));
        assert!(flood_fill(&g, 0, 17, 128, 0).is_err());
    }

    #[test]
    fn test_tolerance_zero_fills_one_component() {
        // plus-shaped component plus a diagonal-only pixel at (3,3)
        let g = grid_from(&[
            &[B, F, B, B],
            &[F, F, F, B],
            &[B, F, B, B],
            &[B, B, B, F],
        ]);
        let filled = flood_fill(&g, 1, 1, 128, 0).unwrap();
        assert_eq!(filled.count_value(128), 5);
        // diagonal neighbor is not 4-connected, so it keeps its value
        assert_eq!(filled.get(3, 3), Some(F));
        // background untouched
        assert_eq!(filled.get(0, 0), Some(B));
    }

    #[test]
    fn test_tolerance_is_seed_relative() {
        // 10 -> 12 passes (diff 2), but 14 differs from the *seed* by 4
        let g = grid_from(&[&[10, 12, 14, 30]]);
        let filled = flood_fill(&g, 0, 0, 99, 2).unwrap();
        assert_eq!(filled.get(0, 0), Some(99));
        assert_eq!(filled.get(1, 0), Some(99));
        assert_eq!(filled.get(2, 0), Some(14));
        assert_eq!(filled.get(3, 0), Some(30));
    }

    #[test]
    fn test_input_grid_unchanged() {
        let g = grid_from(&[&[F, F, B]]);
        let _ = flood_fill(&g, 0, 0, 7, 0).unwrap();
        assert_eq!(g.get(0, 0), Some(F));
    }

    #[test]
    fn test_fill_holes_closes_ring() {
        let g = grid_from(&[
            &[B, B, B, B, B],
            &[B, F, F, F, B],
            &[B, F, B, F, B],
            &[B, F, F, F, B],
            &[B, B, B, B, B],
        ]);
        let filled = fill_holes(&g).unwrap();
        assert_eq!(filled.get(2, 2), Some(F));
        assert_eq!(filled.get(0, 0), Some(B));
        assert_eq!(filled.count_value(F), 9);
    }

    #[test]
    fn test_fill_holes_keeps_open_cavity() {
        // C shape: the cavity is 4-connected to the border through the gap
        let g = grid_from(&[
            &[F, F, F],
            &[F, B, B],
            &[F, F, F],
        ]);
        let filled = fill_holes(&g).unwrap();
        assert_eq!(filled.get(1, 1), Some(B));
        assert_eq!(filled.get(2, 1), Some(B));
    }
}
