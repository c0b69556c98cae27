//! Integer rectangle used for bounding boxes and crop geometry

use crate::error::{Error, Result};

/// Axis-aligned integer rectangle.
///
/// `x`/`y` is the top-left corner; `w`/`h` are strictly positive.
/// `right()` and `bottom()` are exclusive, so a rectangle covers the
/// half-open ranges `x..right()` and `y..bottom()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Create a rectangle, validating that both dimensions are positive.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w <= 0 || h <= 0 {
            return Err(Error::InvalidParameter(format!(
                "rectangle dimensions must be positive: {w}x{h}"
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Rectangle spanning min/max pixel coordinates (inclusive on both ends).
    pub fn from_min_max(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x as i32,
            y: min_y as i32,
            w: (max_x - min_x + 1) as i32,
            h: (max_y - min_y + 1) as i32,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Number of cells covered.
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Larger of the two dimensions.
    pub fn max_dim(&self) -> i32 {
        self.w.max(self.h)
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection of two rectangles, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect {
            x,
            y,
            w: right - x,
            h: bottom - y,
        })
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Grow by `margin` on every side.
    pub fn expand(&self, margin: i32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2 * margin,
            h: self.h + 2 * margin,
        }
    }

    /// Clip to a `width`x`height` grid, or `None` if nothing remains.
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Rect> {
        self.intersect(&Rect {
            x: 0,
            y: 0,
            w: width as i32,
            h: height as i32,
        })
    }
}
