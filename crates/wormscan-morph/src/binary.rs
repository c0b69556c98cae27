//! Binary morphology with a 3x3 brick
//!
//! The per-region pipeline only ever needs the 3x3 structuring element:
//! closing seals the pinholes adaptive thresholding leaves inside a
//! specimen body before thinning. Positions outside the grid read as
//! background, so erosion eats the image border and dilation never wraps.

use crate::error::MorphResult;
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// Dilate with a 3x3 brick: a pixel is foreground if any pixel of its
/// 3x3 neighborhood (including itself) is foreground.
pub fn dilate(binary: &PixelGrid) -> MorphResult<PixelGrid> {
    let (width, height) = binary.dimensions();
    let mut out = PixelGrid::new(width, height)?;
    let data = out.data_mut();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            'probe: for dy in -1..=1 {
                for dx in -1..=1 {
                    if binary.get_or(x + dx, y + dy, BACKGROUND) == FOREGROUND {
                        data[y as usize * width as usize + x as usize] = FOREGROUND;
                        break 'probe;
                    }
                }
            }
        }
    }
    Ok(out)
}

/// Erode with a 3x3 brick: a pixel stays foreground only if its whole
/// 3x3 neighborhood is foreground.
pub fn erode(binary: &PixelGrid) -> MorphResult<PixelGrid> {
    let (width, height) = binary.dimensions();
    let mut out = PixelGrid::new(width, height)?;
    let data = out.data_mut();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut keep = binary.get_or(x, y, BACKGROUND) == FOREGROUND;
            'probe: for dy in -1..=1 {
                for dx in -1..=1 {
                    if binary.get_or(x + dx, y + dy, BACKGROUND) != FOREGROUND {
                        keep = false;
                        break 'probe;
                    }
                }
            }
            if keep {
                data[y as usize * width as usize + x as usize] = FOREGROUND;
            }
        }
    }
    Ok(out)
}

/// Opening: erosion then dilation. Removes isolated specks smaller than
/// the brick.
pub fn open(binary: &PixelGrid) -> MorphResult<PixelGrid> {
    dilate(&erode(binary)?)
}

/// Closing: dilation then erosion. Seals holes and slits smaller than
/// the brick.
pub fn close(binary: &PixelGrid) -> MorphResult<PixelGrid> {
    erode(&dilate(binary)?)
}
