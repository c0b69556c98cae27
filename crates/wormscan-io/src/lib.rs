//! wormscan-io - Image decode/encode boundary
//!
//! Everything inside the engine works on grayscale [`PixelGrid`]s; this
//! crate converts between those grids and the clip files the acquisition
//! tools produce. Binary PGM is hand-parsed and always available; PNG,
//! JPEG and GIF support sit behind feature flags mapped onto the
//! respective codec crates.
//!
//! Reading identifies the format from the file's magic bytes first and
//! the extension second; writing goes by extension.

mod error;
pub mod format;
pub mod luma;

#[cfg(feature = "gif-format")]
pub mod gif;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "pgm")]
pub mod pgm;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::ImageFormat;
pub use luma::{gray_from_channels, luma};

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use wormscan_core::PixelGrid;

/// Read an image file into a grayscale grid.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let format = ImageFormat::sniff(&bytes)
        .or_else(|| ImageFormat::from_path(path))
        .ok_or_else(|| {
            IoError::UnsupportedFormat(format!("cannot identify format of {}", path.display()))
        })?;
    decode_image(&bytes, format)
}

/// Decode in-memory image bytes of a known format into a grayscale grid.
pub fn decode_image(bytes: &[u8], format: ImageFormat) -> IoResult<PixelGrid> {
    match format {
        #[cfg(feature = "pgm")]
        ImageFormat::Pgm => pgm::read_pgm(&mut Cursor::new(bytes)),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(bytes)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(bytes)),
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gif::read_gif(Cursor::new(bytes)),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support is not enabled"
        ))),
    }
}

/// Write a grayscale grid to a file, format chosen by extension.
pub fn write_image<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("cannot pick a format for {}", path.display()))
    })?;
    let mut writer = BufWriter::new(File::create(path)?);
    encode_image(grid, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Encode a grayscale grid into a writer in the given format.
pub fn encode_image<W: Write>(
    grid: &PixelGrid,
    format: ImageFormat,
    writer: &mut W,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "pgm")]
        ImageFormat::Pgm => pgm::write_pgm(grid, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(grid, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(grid, writer, jpeg::DEFAULT_JPEG_QUALITY),
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gif::write_gif(grid, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support is not enabled"
        ))),
    }
}

/// Write a packed RGB buffer (label overlays and similar diagnostics) as
/// a PNG file.
#[cfg(feature = "png-format")]
pub fn write_rgb_image<P: AsRef<Path>>(
    width: u32,
    height: u32,
    rgb: &[u8],
    path: P,
) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    png::write_rgb_png(width, height, rgb, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dispatches_by_magic() {
        let grid = PixelGrid::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();

        let mut pgm_bytes = Vec::new();
        encode_image(&grid, ImageFormat::Pgm, &mut pgm_bytes).unwrap();
        assert_eq!(ImageFormat::sniff(&pgm_bytes), Some(ImageFormat::Pgm));
        let decoded = decode_image(&pgm_bytes, ImageFormat::Pgm).unwrap();
        assert_eq!(decoded.data(), grid.data());

        let mut png_bytes = Vec::new();
        encode_image(&grid, ImageFormat::Png, &mut png_bytes).unwrap();
        assert_eq!(ImageFormat::sniff(&png_bytes), Some(ImageFormat::Png));
        let decoded = decode_image(&png_bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.data(), grid.data());
    }

    #[test]
    fn test_read_write_files() {
        let dir = std::env::temp_dir().join("wormscan_io_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("lattice.pgm");

        let grid = PixelGrid::from_raw(3, 3, (0u8..9).map(|v| v * 25).collect()).unwrap();
        write_image(&grid, &path).unwrap();
        let back = read_image(&path).unwrap();
        assert_eq!(back.dimensions(), (3, 3));
        assert_eq!(back.data(), grid.data());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let grid = PixelGrid::new(2, 2).unwrap();
        assert!(write_image(&grid, "clip.tiff").is_err());
    }
}
