//! JPEG image format support

use crate::error::{IoError, IoResult};
use crate::luma::gray_from_channels;
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};
use wormscan_core::PixelGrid;

/// Default encode quality for measurement clips.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image, reduced to 8-bit grayscale.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {e}")))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    match info.pixel_format {
        PixelFormat::L8 => gray_from_channels(width, height, 1, &data),
        PixelFormat::L16 => {
            let high: Vec<u8> = data.iter().step_by(2).copied().collect();
            gray_from_channels(width, height, 1, &high)
        }
        PixelFormat::RGB24 => gray_from_channels(width, height, 3, &data),
        PixelFormat::CMYK32 => Err(IoError::UnsupportedFormat(
            "CMYK JPEG is not supported".to_string(),
        )),
    }
}

/// Write a grid as a grayscale JPEG at the given quality.
pub fn write_jpeg<W: Write>(grid: &PixelGrid, writer: &mut W, quality: u8) -> IoResult<()> {
    let (width, height) = grid.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "{width}x{height} exceeds the JPEG dimension limit"
        )));
    }
    let mut encoded = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut encoded, quality);
    encoder
        .encode(
            grid.data(),
            width as u16,
            height as u16,
            jpeg_encoder::ColorType::Luma,
        )
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {e}")))?;
    writer.write_all(&encoded)?;
    Ok(())
}
