//! Pixel grid containers
//!
//! Every stage of the morphometry pipeline consumes and produces one of two
//! containers:
//!
//! - [`PixelGrid`] - W×H 8-bit samples, grayscale (0-255) or binary
//!   ([`BACKGROUND`]/[`FOREGROUND`])
//! - [`LabelMap`] - W×H `u32` region labels, 0 = background
//!
//! Both own their dimensions and centralize bounds checking: `get` returns
//! `Option`, `set` returns `Result`, and the signed accessors let
//! neighborhood scans probe outside the grid without per-call-site index
//! arithmetic.

use crate::error::{Error, Result};
use crate::rect::Rect;

/// Sample value of a binary foreground pixel
pub const FOREGROUND: u8 = 255;

/// Sample value of a binary background pixel
pub const BACKGROUND: u8 = 0;

/// W×H grid of 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid filled with [`BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, BACKGROUND)
    }

    /// Create a grid filled with `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major sample buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != width as usize * height as usize {
            return Err(Error::BadBufferLength {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether a signed coordinate lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Sample at (x, y), or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[self.index(x, y)])
        } else {
            None
        }
    }

    /// Signed-coordinate sample probe for neighborhood scans.
    #[inline]
    pub fn get_signed(&self, x: i64, y: i64) -> Option<u8> {
        if self.contains(x, y) {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Signed-coordinate probe with a default for out-of-bounds positions.
    ///
    /// Morphology treats everything beyond the edge as background, so the
    /// common call is `get_or(x, y, BACKGROUND)`.
    #[inline]
    pub fn get_or(&self, x: i64, y: i64, default: u8) -> u8 {
        self.get_signed(x, y).unwrap_or(default)
    }

    /// Store `value` at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Overwrite every sample with `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Row `y` as a slice, or `None` outside the grid.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.data[start..start + self.width as usize])
    }

    /// Full row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable row-major sample buffer.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Number of samples equal to `value`.
    pub fn count_value(&self, value: u8) -> u32 {
        self.data.iter().filter(|&&v| v == value).count() as u32
    }

    /// Copy out the sub-grid covered by `rect`.
    ///
    /// The rectangle must lie entirely inside the grid; callers clip first
    /// (see [`Rect::clip_to`]).
    pub fn crop(&self, rect: &Rect) -> Result<PixelGrid> {
        if rect.x < 0
            || rect.y < 0
            || rect.right() > self.width as i32
            || rect.bottom() > self.height as i32
        {
            return Err(Error::InvalidParameter(format!(
                "crop rectangle ({}, {}, {}x{}) exceeds {}x{} grid",
                rect.x, rect.y, rect.w, rect.h, self.width, self.height
            )));
        }
        let mut out = PixelGrid::new(rect.w as u32, rect.h as u32)?;
        for dy in 0..rect.h as u32 {
            let src = ((rect.y as u32 + dy) as usize) * self.width as usize + rect.x as usize;
            let dst = dy as usize * rect.w as usize;
            out.data[dst..dst + rect.w as usize]
                .copy_from_slice(&self.data[src..src + rect.w as usize]);
        }
        Ok(out)
    }

    /// Error unless `other` has the same dimensions.
    pub fn check_same_dimensions(&self, other: &PixelGrid) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

/// W×H grid of `u32` region labels; 0 means "not part of any region".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl LabelMap {
    /// Create a map with every cell unlabeled.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Label at (x, y), or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Signed-coordinate label probe; out of bounds reads as unlabeled.
    #[inline]
    pub fn get_or_zero(&self, x: i64, y: i64) -> u32 {
        if x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64 {
            self.data[y as usize * self.width as usize + x as usize]
        } else {
            0
        }
    }

    /// Store `label` at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, label: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = label;
        Ok(())
    }

    /// Full row-major label buffer.
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Mutable row-major label buffer.
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Number of cells holding `label`.
    pub fn count_label(&self, label: u32) -> u32 {
        self.data.iter().filter(|&&v| v == label).count() as u32
    }

    /// Extract a binary mask of one label over `rect`.
    ///
    /// Cells holding `label` become [`FOREGROUND`], everything else
    /// [`BACKGROUND`]. The rectangle must lie inside the map.
    pub fn mask_of(&self, label: u32, rect: &Rect) -> Result<PixelGrid> {
        if rect.x < 0
            || rect.y < 0
            || rect.right() > self.width as i32
            || rect.bottom() > self.height as i32
        {
            return Err(Error::InvalidParameter(format!(
                "mask rectangle ({}, {}, {}x{}) exceeds {}x{} map",
                rect.x, rect.y, rect.w, rect.h, self.width, self.height
            )));
        }
        let mut mask = PixelGrid::new(rect.w as u32, rect.h as u32)?;
        for dy in 0..rect.h as u32 {
            let src = ((rect.y as u32 + dy) as usize) * self.width as usize + rect.x as usize;
            let dst_row = dy as usize * rect.w as usize;
            let out = mask.data_mut();
            for dx in 0..rect.w as usize {
                if self.data[src + dx] == label {
                    out[dst_row + dx] = FOREGROUND;
                }
            }
        }
        Ok(mask)
    }
}
