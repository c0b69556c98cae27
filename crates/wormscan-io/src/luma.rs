//! Grayscale reduction
//!
//! Color sources carry no extra information for the measurement pipeline,
//! so every decoder reduces to 8-bit luma on the way in using the ITU-R
//! BT.601 weights.

use crate::error::{IoError, IoResult};
use wormscan_core::PixelGrid;

/// BT.601 luma of one RGB triple.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Reduces a packed `channels`-per-pixel byte buffer (RGB-first layouts)
/// to a grayscale grid. One- and two-channel layouts take the first
/// channel as gray, three and four reduce by luma.
pub fn gray_from_channels(
    width: u32,
    height: u32,
    channels: usize,
    data: &[u8],
) -> IoResult<PixelGrid> {
    let pixels = width as usize * height as usize;
    if channels == 0 || channels > 4 {
        return Err(IoError::InvalidData(format!(
            "unsupported channel count {channels}"
        )));
    }
    if data.len() < pixels * channels {
        return Err(IoError::InvalidData(format!(
            "pixel buffer holds {} bytes, need {}",
            data.len(),
            pixels * channels
        )));
    }
    let mut gray = Vec::with_capacity(pixels);
    for chunk in data[..pixels * channels].chunks_exact(channels) {
        let value = match channels {
            1 | 2 => chunk[0],
            _ => luma(chunk[0], chunk[1], chunk[2]),
        };
        gray.push(value);
    }
    Ok(PixelGrid::from_raw(width, height, gray)?)
}
