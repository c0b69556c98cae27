//! PNG image format support

use crate::error::{IoError, IoResult};
use crate::luma::gray_from_channels;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use wormscan_core::PixelGrid;

/// Read a PNG image, reduced to 8-bit grayscale.
///
/// Palette and low-bit-depth images are normalized to 8-bit channels by
/// the decoder; 16-bit samples keep their high byte.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {e}")))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {e}")))?;
    let data = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::DecodeError(
                "palette PNG not expanded by decoder".to_string(),
            ));
        }
    };

    match info.bit_depth {
        BitDepth::Eight => gray_from_channels(info.width, info.height, channels, data),
        BitDepth::Sixteen => {
            // big-endian samples; keep the high byte
            let high: Vec<u8> = data.iter().step_by(2).copied().collect();
            gray_from_channels(info.width, info.height, channels, &high)
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "PNG bit depth {other:?} after normalization"
        ))),
    }
}

/// Write a grid as an 8-bit grayscale PNG.
pub fn write_png<W: Write>(grid: &PixelGrid, writer: W) -> IoResult<()> {
    let (width, height) = grid.dimensions();
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {e}")))?;
    writer
        .write_image_data(grid.data())
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {e}")))?;
    Ok(())
}

/// Write a packed RGB buffer as a PNG, used for label overlays.
pub fn write_rgb_png<W: Write>(
    width: u32,
    height: u32,
    rgb: &[u8],
    writer: W,
) -> IoResult<()> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(IoError::InvalidData(format!(
            "RGB buffer holds {} bytes, {expected} required for {width}x{height}",
            rgb.len()
        )));
    }
    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {e}")))?;
    writer
        .write_image_data(rgb)
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {e}")))?;
    Ok(())
}
