//! Skeletonization
//!
//! Zhang-Suen thinning: two sub-iterations per round, each collecting
//! deletable contour pixels against the previous state and erasing them in
//! one batch. Rounds repeat until a full round deletes nothing, so the
//! result is an 8-connected skeleton one pixel wide along straight runs.

use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

// p2..p9 clockwise from north
const RING: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

fn ring_values(grid: &PixelGrid, x: i64, y: i64) -> [bool; 8] {
    let mut v = [false; 8];
    for (i, (dx, dy)) in RING.iter().enumerate() {
        v[i] = grid.get_or(x + dx, y + dy, BACKGROUND) == FOREGROUND;
    }
    v
}

/// 0-to-1 transitions around the ring p2, p3, ..., p9, p2.
fn transitions(ring: &[bool; 8]) -> u32 {
    let mut count = 0;
    for i in 0..8 {
        if !ring[i] && ring[(i + 1) % 8] {
            count += 1;
        }
    }
    count
}

fn deletable(ring: &[bool; 8], second_pass: bool) -> bool {
    let neighbors = ring.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&neighbors) {
        return false;
    }
    if transitions(ring) != 1 {
        return false;
    }
    let (p2, p4, p6, p8) = (ring[0], ring[2], ring[4], ring[6]);
    if second_pass {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    } else {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    }
}

/// Thins foreground down to a unit-width skeleton.
///
/// Line segments already one pixel wide pass through unchanged: their
/// endpoints have a single neighbor and interior pixels fail the
/// transition test.
pub fn thin(grid: &PixelGrid) -> PixelGrid {
    let (width, height) = grid.dimensions();
    let mut out = grid.clone();
    let mut to_clear: Vec<(u32, u32)> = Vec::new();
    // convergence bound; each round removes at least one contour layer
    let max_rounds = width.max(height).max(1);
    for _ in 0..max_rounds {
        let mut changed = false;
        for second_pass in [false, true] {
            to_clear.clear();
            for y in 0..height {
                for x in 0..width {
                    if out.get(x, y) != Some(FOREGROUND) {
                        continue;
                    }
                    let ring = ring_values(&out, x as i64, y as i64);
                    if deletable(&ring, second_pass) {
                        to_clear.push((x, y));
                    }
                }
            }
            for &(x, y) in &to_clear {
                out.data_mut()[(y * width + x) as usize] = BACKGROUND;
            }
            changed |= !to_clear.is_empty();
        }
        if !changed {
            break;
        }
    }
    out
}
