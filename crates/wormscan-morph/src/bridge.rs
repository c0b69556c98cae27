//! Gap bridging
//!
//! Local binarization noise can break one worm skeleton into two strands.
//! For every skeleton endpoint that sits in the interior of the source
//! mask (not against the shape boundary), the bridger walks a ten-pixel
//! tail back along the strand, derives the strand's outgoing direction
//! from it, and extends the skeleton forward in fifth-pixel steps until
//! the extension leaves the mask or the image. Extending both broken ends
//! this way reconnects them across the gap.
//!
//! Visited tail pixels carry an intermediate marker so a strand is not
//! processed twice in one sweep; markers revert to plain foreground before
//! the function returns.

use std::collections::VecDeque;

use crate::error::MorphResult;
use crate::topology::is_endpoint;
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// Intermediate value for tail pixels during one sweep.
pub const BRIDGE_MARKER: u8 = 128;

/// Tail pixels collected behind an endpoint before extending.
pub const TAIL_LENGTH: usize = 10;

/// Forward step size in pixels.
pub const BRIDGE_STEP: f64 = 0.2;

// a tail point with this many other tail points pressed against it means
// the walk doubled back over a branch, not a strand
const BIFURCATION_LIMIT: usize = 4;

/// Extends every qualifying endpoint of `skeleton` along its strand
/// direction until the extension hits a background pixel of `mask` or
/// leaves the image.
pub fn bridge_gaps(skeleton: &PixelGrid, mask: &PixelGrid) -> MorphResult<PixelGrid> {
    skeleton.check_same_dimensions(mask)?;
    let (width, height) = skeleton.dimensions();
    let mut out = skeleton.clone();

    for y in 0..height {
        for x in 0..width {
            if out.get(x, y) != Some(FOREGROUND) || !is_endpoint(&out, x as i64, y as i64) {
                continue;
            }
            if touches_value(&out, x, y, BRIDGE_MARKER) {
                continue;
            }
            // an endpoint against the mask boundary ends where the shape
            // ends; there is no gap to cross
            if touches_background(mask, x, y) {
                continue;
            }
            if let Some(tail) = collect_tail(&mut out, x, y) {
                extend(&mut out, mask, &tail);
            }
        }
    }

    for value in out.data_mut() {
        if *value == BRIDGE_MARKER {
            *value = FOREGROUND;
        }
    }
    Ok(out)
}

fn touches_value(grid: &PixelGrid, x: u32, y: u32, value: u8) -> bool {
    for dy in -1..=1i64 {
        for dx in -1..=1i64 {
            if (dx, dy) == (0, 0) {
                continue;
            }
            if grid.get_or(x as i64 + dx, y as i64 + dy, BACKGROUND) == value {
                return true;
            }
        }
    }
    false
}

fn touches_background(mask: &PixelGrid, x: u32, y: u32) -> bool {
    for dy in -1..=1i64 {
        for dx in -1..=1i64 {
            if (dx, dy) == (0, 0) {
                continue;
            }
            if mask.get_or(x as i64 + dx, y as i64 + dy, BACKGROUND) == BACKGROUND {
                return true;
            }
        }
    }
    false
}

/// Breadth-first walk from the endpoint along foreground pixels, marking
/// the visited tail. Returns the tail only if it reaches full length; a
/// shorter strand is left marked but not extended.
fn collect_tail(grid: &mut PixelGrid, x: u32, y: u32) -> Option<Vec<(u32, u32)>> {
    let width = grid.dimensions().0;
    let mut tail: Vec<(u32, u32)> = Vec::with_capacity(TAIL_LENGTH);
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    queue.push_back((x, y));
    grid.data_mut()[(y * width + x) as usize] = BRIDGE_MARKER;
    while let Some((cx, cy)) = queue.pop_front() {
        tail.push((cx, cy));
        if tail.len() == TAIL_LENGTH {
            break;
        }
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                if (dx, dy) == (0, 0) {
                    continue;
                }
                let nx = cx as i64 + dx;
                let ny = cy as i64 + dy;
                if grid.get_or(nx, ny, BACKGROUND) == FOREGROUND {
                    grid.data_mut()[(ny as u32 * width + nx as u32) as usize] = BRIDGE_MARKER;
                    queue.push_back((nx as u32, ny as u32));
                }
            }
        }
    }
    if tail.len() == TAIL_LENGTH && !is_bifurcated(&tail) {
        Some(tail)
    } else {
        None
    }
}

fn is_bifurcated(tail: &[(u32, u32)]) -> bool {
    tail.iter().enumerate().any(|(i, &(px, py))| {
        let pressed = tail
            .iter()
            .enumerate()
            .filter(|&(j, &(qx, qy))| {
                i != j
                    && (px as i64 - qx as i64).abs() <= 1
                    && (py as i64 - qy as i64).abs() <= 1
            })
            .count();
        pressed >= BIFURCATION_LIMIT
    })
}

/// Steps forward from the tail head along the averaged strand direction,
/// lighting up background pixels until the walk leaves the mask or the
/// image.
fn extend(grid: &mut PixelGrid, mask: &PixelGrid, tail: &[(u32, u32)]) {
    let (head_x, head_y) = tail[0];
    let rest = &tail[1..];
    let sum = rest.iter().fold((0.0f64, 0.0f64), |(sx, sy), &(px, py)| {
        (sx + px as f64, sy + py as f64)
    });
    let n = rest.len() as f64;
    let dir_x = head_x as f64 - sum.0 / n;
    let dir_y = head_y as f64 - sum.1 / n;
    let norm = (dir_x * dir_x + dir_y * dir_y).sqrt();
    if norm < f64::EPSILON {
        return;
    }
    let step_x = dir_x / norm * BRIDGE_STEP;
    let step_y = dir_y / norm * BRIDGE_STEP;

    let width = grid.dimensions().0;
    let mut fx = head_x as f64;
    let mut fy = head_y as f64;
    loop {
        fx += step_x;
        fy += step_y;
        let px = fx.round() as i64;
        let py = fy.round() as i64;
        if !grid.contains(px, py) {
            break;
        }
        if mask.get_or(px, py, BACKGROUND) == BACKGROUND {
            break;
        }
        let idx = (py as u32 * width + px as u32) as usize;
        if grid.data()[idx] == BACKGROUND {
            grid.data_mut()[idx] = FOREGROUND;
        }
    }
}
