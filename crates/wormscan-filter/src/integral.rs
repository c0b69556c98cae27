//! Summed-area table
//!
//! One O(W·H) build pays for O(1) box sums afterwards, which is what makes
//! the adaptive thresholder linear in the image size regardless of box
//! size. The table is padded by one zero row and column so the four-corner
//! lookup needs no edge special-casing.

use wormscan_core::PixelGrid;

/// Summed-area (integral) table over an 8-bit grid.
///
/// `sum_rect` corners are inclusive pixel coordinates.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: u32,
    height: u32,
    // (width + 1) * (height + 1), row-major, first row/column zero
    data: Vec<u64>,
}

impl IntegralImage {
    /// Build the table in a single pass over the grid.
    pub fn build(grid: &PixelGrid) -> Self {
        let (width, height) = grid.dimensions();
        let stride = width as usize + 1;
        let mut data = vec![0u64; stride * (height as usize + 1)];

        for y in 0..height as usize {
            let row = grid.row(y as u32).unwrap_or(&[]);
            let mut row_sum = 0u64;
            let above = y * stride;
            let current = (y + 1) * stride;
            for (x, &sample) in row.iter().enumerate() {
                row_sum += sample as u64;
                data[current + x + 1] = data[above + x + 1] + row_sum;
            }
        }

        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn at(&self, x: u32, y: u32) -> u64 {
        self.data[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Sum of samples over the rectangle with inclusive corners
    /// (x0, y0)-(x1, y1). Corners are clamped to the grid.
    pub fn sum_rect(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
        if self.width == 0 || self.height == 0 || x0 > x1 || y0 > y1 {
            return 0;
        }
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        self.at(x1 + 1, y1 + 1) + self.at(x0, y0) - self.at(x1 + 1, y0) - self.at(x0, y1 + 1)
    }

    /// Mean sample value of the `box_size` square centered on (cx, cy),
    /// clipped at the grid edges.
    pub fn mean_box(&self, cx: u32, cy: u32, box_size: u32) -> f64 {
        let half = box_size / 2;
        let x0 = cx.saturating_sub(half);
        let y0 = cy.saturating_sub(half);
        let x1 = (cx + half).min(self.width - 1);
        let y1 = (cy + half).min(self.height - 1);
        let count = ((x1 - x0 + 1) as u64) * ((y1 - y0 + 1) as u64);
        self.sum_rect(x0, y0, x1, y1) as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> PixelGrid {
        // 4x3 grid with sample = x + 4*y
        let data: Vec<u8> = (0..12).collect();
        PixelGrid::from_raw(4, 3, data).unwrap()
    }

    #[test]
    fn test_single_pixel_sums() {
        let g = ramp_grid();
        let it = IntegralImage::build(&g);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(it.sum_rect(x, y, x, y), (x + 4 * y) as u64);
            }
        }
    }

    #[test]
    fn test_full_sum() {
        let g = ramp_grid();
        let it = IntegralImage::build(&g);
        assert_eq!(it.sum_rect(0, 0, 3, 2), (0..12u64).sum::<u64>());
    }

    #[test]
    fn test_interior_rect_sum() {
        let g = ramp_grid();
        let it = IntegralImage::build(&g);
        // samples at (1,1),(2,1),(1,2),(2,2) = 5 + 6 + 9 + 10
        assert_eq!(it.sum_rect(1, 1, 2, 2), 30);
    }

    #[test]
    fn test_corners_clamped() {
        let g = ramp_grid();
        let it = IntegralImage::build(&g);
        assert_eq!(it.sum_rect(2, 1, 99, 99), 6 + 7 + 10 + 11);
    }

    #[test]
    fn test_mean_box_uniform() {
        let g = PixelGrid::filled(9, 9, 128).unwrap();
        let it = IntegralImage::build(&g);
        for &(x, y) in &[(0u32, 0u32), (4, 4), (8, 8), (0, 8)] {
            assert!((it.mean_box(x, y, 5) - 128.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mean_box_clipped_at_edge() {
        // 2x2 grid, values 10 and 30 in one row, box larger than grid
        let g = PixelGrid::from_raw(2, 1, vec![10, 30]).unwrap();
        let it = IntegralImage::build(&g);
        assert!((it.mean_box(0, 0, 15) - 20.0).abs() < 1e-9);
    }
}
