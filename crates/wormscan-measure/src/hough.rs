//! Hough line detection
//!
//! Polar-parameterized accumulator for locating the calibration line in a
//! stage image before measurement. One-degree angle bins over [0, 180)
//! with a precomputed sine/cosine table; rho spans the signed image
//! diagonal. The strongest cell gives the line, and a neighborhood
//! suppression helper clears it so a second, distinct line can be found.

use crate::error::{MeasureError, MeasureResult};
use wormscan_core::{FOREGROUND, PixelGrid};

/// Angle bins across the half circle, one per degree.
pub const THETA_BINS: usize = 180;

const EPSILON: f64 = 1e-9;

/// One detected line in polar form: `rho = x*cos(theta) + y*sin(theta)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoughLine {
    pub rho: i32,
    pub theta_deg: usize,
    pub votes: u32,
}

impl HoughLine {
    fn theta_rad(&self) -> f64 {
        (self.theta_deg as f64).to_radians()
    }

    /// The y coordinate where the line crosses column `x`, unless the
    /// line is vertical.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        let sin = self.theta_rad().sin();
        if sin.abs() < EPSILON {
            return None;
        }
        Some((self.rho as f64 - x * self.theta_rad().cos()) / sin)
    }

    /// The x coordinate where the line crosses row `y`, unless the line
    /// is horizontal.
    pub fn x_at(&self, y: f64) -> Option<f64> {
        let cos = self.theta_rad().cos();
        if cos.abs() < EPSILON {
            return None;
        }
        Some((self.rho as f64 - y * self.theta_rad().sin()) / cos)
    }
}

/// Vote accumulator over (theta, rho).
#[derive(Debug, Clone)]
pub struct HoughTransform {
    max_rho: i32,
    rho_bins: usize,
    accumulator: Vec<u32>,
    cos_table: Vec<f64>,
    sin_table: Vec<f64>,
}

impl HoughTransform {
    /// Sizes the accumulator for images up to `width` x `height`.
    pub fn new(width: u32, height: u32) -> MeasureResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeasureError::InvalidParameters(format!(
                "accumulator needs a nonzero extent, got {width}x{height}"
            )));
        }
        let max_rho = ((width as f64).hypot(height as f64)).ceil() as i32;
        let rho_bins = 2 * max_rho as usize + 1;
        let mut cos_table = Vec::with_capacity(THETA_BINS);
        let mut sin_table = Vec::with_capacity(THETA_BINS);
        for t in 0..THETA_BINS {
            let rad = (t as f64).to_radians();
            cos_table.push(rad.cos());
            sin_table.push(rad.sin());
        }
        Ok(Self {
            max_rho,
            rho_bins,
            accumulator: vec![0; THETA_BINS * rho_bins],
            cos_table,
            sin_table,
        })
    }

    /// Builds an accumulator sized for `grid` and votes every foreground
    /// pixel across all angles.
    pub fn from_grid(grid: &PixelGrid) -> MeasureResult<Self> {
        let (width, height) = grid.dimensions();
        let mut transform = Self::new(width, height)?;
        transform.accumulate(grid);
        Ok(transform)
    }

    fn index(&self, theta: usize, rho: i32) -> usize {
        theta * self.rho_bins + (rho + self.max_rho) as usize
    }

    /// Adds one vote per (pixel, angle) pair for every foreground pixel.
    pub fn accumulate(&mut self, grid: &PixelGrid) {
        let (width, height) = grid.dimensions();
        for y in 0..height {
            for x in 0..width {
                if grid.get(x, y) != Some(FOREGROUND) {
                    continue;
                }
                for t in 0..THETA_BINS {
                    let rho = (x as f64 * self.cos_table[t] + y as f64 * self.sin_table[t])
                        .round() as i32;
                    if rho.abs() <= self.max_rho {
                        let idx = self.index(t, rho);
                        self.accumulator[idx] += 1;
                    }
                }
            }
        }
    }

    pub fn votes(&self, theta_deg: usize, rho: i32) -> u32 {
        if theta_deg >= THETA_BINS || rho.abs() > self.max_rho {
            return 0;
        }
        self.accumulator[self.index(theta_deg, rho)]
    }

    /// The global accumulator maximum, if any pixel voted. Ties resolve
    /// to the lowest (theta, rho) cell.
    pub fn strongest_line(&self) -> Option<HoughLine> {
        let (best_idx, &votes) = self
            .accumulator
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?;
        if votes == 0 {
            return None;
        }
        Some(HoughLine {
            rho: (best_idx % self.rho_bins) as i32 - self.max_rho,
            theta_deg: best_idx / self.rho_bins,
            votes,
        })
    }

    /// Zeroes the accumulator around a found line so the next call to
    /// [`strongest_line`](Self::strongest_line) returns a different one.
    pub fn suppress(&mut self, line: &HoughLine, theta_window: usize, rho_window: i32) {
        let t0 = line.theta_deg.saturating_sub(theta_window);
        let t1 = (line.theta_deg + theta_window).min(THETA_BINS - 1);
        let r0 = (line.rho - rho_window).max(-self.max_rho);
        let r1 = (line.rho + rho_window).min(self.max_rho);
        for t in t0..=t1 {
            for r in r0..=r1 {
                let idx = self.index(t, r);
                self.accumulator[idx] = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wormscan_core::FOREGROUND;

    fn grid_with(points: &[(u32, u32)], width: u32, height: u32) -> PixelGrid {
        let mut g = PixelGrid::new(width, height).unwrap();
        for &(x, y) in points {
            g.set(x, y, FOREGROUND).unwrap();
        }
        g
    }

    #[test]
    fn test_horizontal_line_peaks_at_ninety() {
        // long enough that the one-degree neighbors scatter across two
        // rho bins instead of tying the peak
        let points: Vec<(u32, u32)> = (0..40).map(|x| (x, 7)).collect();
        let g = grid_with(&points, 40, 20);
        let line = HoughTransform::from_grid(&g)
            .unwrap()
            .strongest_line()
            .unwrap();
        assert_eq!(line.theta_deg, 90);
        assert_eq!(line.rho, 7);
        assert_eq!(line.votes, 40);
        assert_eq!(line.y_at(12.0).map(|y| y.round() as i32), Some(7));
        assert!(line.x_at(7.0).is_none());
    }

    #[test]
    fn test_vertical_line_peaks_at_zero() {
        let points: Vec<(u32, u32)> = (0..30).map(|y| (9, y)).collect();
        let g = grid_with(&points, 20, 30);
        let line = HoughTransform::from_grid(&g)
            .unwrap()
            .strongest_line()
            .unwrap();
        assert_eq!(line.theta_deg, 0);
        assert_eq!(line.rho, 9);
        assert_eq!(line.votes, 30);
        assert_eq!(line.x_at(10.0).map(|x| x.round() as i32), Some(9));
        assert!(line.y_at(9.0).is_none());
    }

    #[test]
    fn test_main_diagonal_peaks_at_135() {
        let points: Vec<(u32, u32)> = (0..32).map(|i| (i, i)).collect();
        let g = grid_with(&points, 32, 32);
        let line = HoughTransform::from_grid(&g)
            .unwrap()
            .strongest_line()
            .unwrap();
        // x*cos(135) + y*sin(135) = 0 along y = x
        assert_eq!(line.theta_deg, 135);
        assert_eq!(line.rho, 0);
        assert_eq!(line.votes, 32);
    }

    #[test]
    fn test_suppression_reveals_second_line() {
        let mut points: Vec<(u32, u32)> = (0..40).map(|x| (x, 4)).collect();
        points.extend((6..38).map(|x| (x, 20)));
        let g = grid_with(&points, 44, 28);
        let mut transform = HoughTransform::from_grid(&g).unwrap();

        let first = transform.strongest_line().unwrap();
        assert_eq!((first.theta_deg, first.rho, first.votes), (90, 4, 40));

        transform.suppress(&first, 4, 4);
        assert_eq!(transform.votes(90, 4), 0);

        let second = transform.strongest_line().unwrap();
        assert_eq!((second.theta_deg, second.rho, second.votes), (90, 20, 32));
    }

    #[test]
    fn test_empty_grid_has_no_line() {
        let g = PixelGrid::new(10, 10).unwrap();
        let transform = HoughTransform::from_grid(&g).unwrap();
        assert!(transform.strongest_line().is_none());
    }

    #[test]
    fn test_rejects_zero_extent() {
        assert!(HoughTransform::new(0, 5).is_err());
    }
}
