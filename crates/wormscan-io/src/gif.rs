//! GIF image format support
//!
//! Some stage cameras archive clips as single-frame GIFs. Only the first
//! frame is decoded; it is composed onto the logical screen and reduced
//! to grayscale through the palette.

use crate::error::{IoError, IoResult};
use crate::luma::luma;
use gif::{ColorOutput, DecodeOptions, Encoder, Frame};
use std::io::{Read, Write};
use wormscan_core::PixelGrid;

/// Read the first frame of a GIF, reduced to 8-bit grayscale.
pub fn read_gif<R: Read>(reader: R) -> IoResult<PixelGrid> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    let mut decoder = options
        .read_info(reader)
        .map_err(|e| IoError::DecodeError(format!("GIF decode error: {e}")))?;

    let screen_width = decoder.width() as u32;
    let screen_height = decoder.height() as u32;
    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);

    let frame = decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {e}")))?
        .ok_or_else(|| IoError::InvalidData("GIF contains no frames".to_string()))?;

    let palette: &[u8] = match (&frame.palette, &global_palette) {
        (Some(local), _) => local,
        (None, Some(global)) => global,
        (None, None) => {
            return Err(IoError::InvalidData("GIF frame has no palette".to_string()));
        }
    };

    let mut canvas = PixelGrid::new(screen_width, screen_height)?;
    for y in 0..frame.height as u32 {
        for x in 0..frame.width as u32 {
            let index = frame.buffer[(y * frame.width as u32 + x) as usize] as usize;
            let rgb = palette.get(index * 3..index * 3 + 3).ok_or_else(|| {
                IoError::InvalidData(format!("palette index {index} out of range"))
            })?;
            let gray = luma(rgb[0], rgb[1], rgb[2]);
            let cx = frame.left as u32 + x;
            let cy = frame.top as u32 + y;
            if cx < screen_width && cy < screen_height {
                canvas.set(cx, cy, gray)?;
            }
        }
    }
    Ok(canvas)
}

/// Write a grid as a single-frame grayscale GIF.
pub fn write_gif<W: Write>(grid: &PixelGrid, writer: &mut W) -> IoResult<()> {
    let (width, height) = grid.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "{width}x{height} exceeds the GIF dimension limit"
        )));
    }

    // identity gray ramp, pixel values double as palette indices
    let mut palette = Vec::with_capacity(256 * 3);
    for v in 0..=255u8 {
        palette.extend_from_slice(&[v, v, v]);
    }

    let mut encoder = Encoder::new(&mut *writer, width as u16, height as u16, &palette)
        .map_err(|e| IoError::EncodeError(format!("GIF header error: {e}")))?;
    let frame = Frame::from_indexed_pixels(width as u16, height as u16, grid.data(), None);
    encoder
        .write_frame(&frame)
        .map_err(|e| IoError::EncodeError(format!("GIF frame error: {e}")))?;
    Ok(())
}
