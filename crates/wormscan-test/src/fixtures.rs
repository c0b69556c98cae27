//! ASCII-art grid fixtures
//!
//! Regression tests describe small binary and grayscale images as string
//! rows, which keeps the expected shape visible right next to the
//! assertions.

use wormscan_core::{FOREGROUND, PixelGrid};

/// Build a binary grid from ASCII rows.
///
/// `'#'` marks a foreground pixel; every other character is background.
/// All rows must be the same length.
///
/// # Panics
///
/// Panics on empty or ragged input; fixtures are literals, so malformed
/// art is a bug in the test itself.
pub fn binary_grid(rows: &[&str]) -> PixelGrid {
    grid_from_rows(rows, |ch| if ch == b'#' { FOREGROUND } else { 0 })
}

/// Build a grayscale grid from ASCII rows.
///
/// Digits `'0'`-`'9'` map to samples 0, 28, 56, ... 252; `' '` and `'.'`
/// map to 0. All rows must be the same length.
///
/// # Panics
///
/// Panics on empty, ragged, or non-digit input.
pub fn gray_grid(rows: &[&str]) -> PixelGrid {
    grid_from_rows(rows, |ch| match ch {
        b'0'..=b'9' => (ch - b'0') * 28,
        b' ' | b'.' => 0,
        _ => panic!("gray fixture contains non-digit {:?}", ch as char),
    })
}

fn grid_from_rows(rows: &[&str], sample: impl Fn(u8) -> u8) -> PixelGrid {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    assert!(width > 0 && height > 0, "fixture must be non-empty");

    let mut data = Vec::with_capacity(width * height);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width, "fixture row {} has a different length", y);
        data.extend(row.bytes().map(&sample));
    }

    match PixelGrid::from_raw(width as u32, height as u32, data) {
        Ok(grid) => grid,
        Err(e) => panic!("fixture construction failed: {}", e),
    }
}
