//! Binary PGM (P5) support
//!
//! The acquisition rigs dump raw 8-bit grayscale frames as binary PGM, so
//! this codec is hand-written and always available. ASCII PGM (P2) and
//! 16-bit samples are not supported.

use crate::error::{IoError, IoResult};
use std::io::{Read, Write};
use wormscan_core::PixelGrid;

const MAX_SAMPLE: u32 = 255;

/// Read a binary PGM image.
pub fn read_pgm<R: Read>(reader: &mut R) -> IoResult<PixelGrid> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut pos = 0usize;
    let magic = [next_header_byte(&bytes, &mut pos)?, next_header_byte(&bytes, &mut pos)?];
    if &magic != b"P5" {
        return Err(IoError::InvalidData(format!(
            "not a binary PGM, magic {:?}",
            String::from_utf8_lossy(&magic)
        )));
    }

    let width = read_header_number(&bytes, &mut pos)?;
    let height = read_header_number(&bytes, &mut pos)?;
    let maxval = read_header_number(&bytes, &mut pos)?;
    if maxval == 0 || maxval > MAX_SAMPLE {
        return Err(IoError::UnsupportedFormat(format!(
            "PGM maxval {maxval}, only 8-bit samples are supported"
        )));
    }
    // the single whitespace byte after maxval was consumed by the tokenizer

    let pixels = width as usize * height as usize;
    let data = bytes
        .get(pos..pos + pixels)
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PGM truncated: {} pixel bytes present, {} required",
                bytes.len().saturating_sub(pos),
                pixels
            ))
        })?
        .to_vec();
    Ok(PixelGrid::from_raw(width, height, data)?)
}

/// Write a grid as binary PGM.
pub fn write_pgm<W: Write>(grid: &PixelGrid, writer: &mut W) -> IoResult<()> {
    let (width, height) = grid.dimensions();
    write!(writer, "P5\n{width} {height}\n{MAX_SAMPLE}\n")?;
    writer.write_all(grid.data())?;
    Ok(())
}

fn next_header_byte(bytes: &[u8], pos: &mut usize) -> IoResult<u8> {
    let b = *bytes
        .get(*pos)
        .ok_or_else(|| IoError::InvalidData("PGM header ended early".into()))?;
    *pos += 1;
    Ok(b)
}

/// Next decimal header token, skipping whitespace and `#` comment lines,
/// consuming the single whitespace byte that terminates it.
fn read_header_number(bytes: &[u8], pos: &mut usize) -> IoResult<u32> {
    loop {
        match next_header_byte(bytes, pos)? {
            b'#' => {
                while next_header_byte(bytes, pos)? != b'\n' {}
            }
            b if b.is_ascii_whitespace() => {}
            b if b.is_ascii_digit() => {
                let mut value = (b - b'0') as u32;
                loop {
                    let next = next_header_byte(bytes, pos)?;
                    if next.is_ascii_digit() {
                        value = value
                            .checked_mul(10)
                            .and_then(|v| v.checked_add((next - b'0') as u32))
                            .ok_or_else(|| {
                                IoError::InvalidData("PGM header number overflow".into())
                            })?;
                    } else if next.is_ascii_whitespace() {
                        return Ok(value);
                    } else {
                        return Err(IoError::InvalidData(format!(
                            "unexpected byte {next:#04x} in PGM header"
                        )));
                    }
                }
            }
            other => {
                return Err(IoError::InvalidData(format!(
                    "unexpected byte {other:#04x} in PGM header"
                )));
            }
        }
    }
}
