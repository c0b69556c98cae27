//! Junction and corner trimming
//!
//! Pattern-driven cleanup after thinning. Spur erosion leaves a one-pixel
//! stub against every through-line (see `prune`), and thinning itself
//! leaves staircase corners that inflate traced length. Two pattern
//! families handle these:
//!
//! - mode 1: the pixel's three foreground neighbors form a consecutive arc
//!   of the 8-ring, so the pixel is an appendage on a T or L junction and
//!   its neighbors stay connected without it
//! - mode 2: exactly two adjacent orthogonal neighbors are foreground, so
//!   the pixel is a corner that can be cut, the two neighbors being
//!   mutually diagonal
//!
//! Every pattern is connectivity-safe in isolation. Matches are collected
//! in one scan and erased together.

use crate::error::MorphResult;
use crate::pattern::Pattern;
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// Appendage arm of a T junction, pointing up; rotations cover the
/// other three directions.
const JUNCTION_ARM: &str = "ooo\noCo\nxxx";

/// Appendage in the south-east corner of an L junction.
const JUNCTION_CORNER: &str = "ooo\noCx\noxx";

/// North-east staircase corner; the flanking diagonals are free, the
/// opposite diagonal must be empty or it would be orphaned.
const STAIR_CORNER: &str = " x \noCx\noo ";

/// The eight T/L junction patterns.
pub fn junction_patterns() -> MorphResult<Vec<Pattern>> {
    let mut patterns = Vec::with_capacity(8);
    patterns.extend(Pattern::parse(JUNCTION_ARM)?.rotations());
    patterns.extend(Pattern::parse(JUNCTION_CORNER)?.rotations());
    Ok(patterns)
}

/// The four staircase corner patterns.
pub fn corner_patterns() -> MorphResult<Vec<Pattern>> {
    Ok(Pattern::parse(STAIR_CORNER)?.rotations().into())
}

/// One collect-then-erase sweep of a pattern family. Returns the number
/// of pixels erased.
pub fn apply_patterns(grid: &mut PixelGrid, patterns: &[Pattern]) -> usize {
    let (width, height) = grid.dimensions();
    let mut to_clear: Vec<(u32, u32)> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) != Some(FOREGROUND) {
                continue;
            }
            if patterns.iter().any(|p| p.matches(grid, x, y)) {
                to_clear.push((x, y));
            }
        }
    }
    for &(x, y) in &to_clear {
        grid.data_mut()[(y * width + x) as usize] = BACKGROUND;
    }
    to_clear.len()
}

/// Full trim: the (junction, corner) sweep sequence, run twice, since
/// removing an appendage can expose a cuttable corner and vice versa.
pub fn trim(skeleton: &PixelGrid) -> MorphResult<PixelGrid> {
    let junctions = junction_patterns()?;
    let corners = corner_patterns()?;
    let mut out = skeleton.clone();
    for _ in 0..2 {
        apply_patterns(&mut out, &junctions);
        apply_patterns(&mut out, &corners);
    }
    Ok(out)
}
