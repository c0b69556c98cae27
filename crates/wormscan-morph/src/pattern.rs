//! 3x3 neighborhood patterns
//!
//! Trim and thinning rules are written as three-line pattern strings, one
//! character per neighborhood cell:
//!
//! - `x` - must be foreground
//! - `o` - must be background
//! - ` ` - don't care
//! - `C` - the center pixel (always foreground; it is the erase candidate)
//!
//! Rows run top to bottom, columns left to right. Positions outside the
//! grid read as background, so a `o` at the border is satisfied and an `x`
//! is not.

use crate::error::{MorphError, MorphResult};
use wormscan_core::{BACKGROUND, FOREGROUND, PixelGrid};

/// What a pattern demands of one neighborhood cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Foreground,
    Background,
    Any,
}

/// A 3x3 match rule centered on an erase candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    // [row][col], row 0 at the top
    cells: [[Requirement; 3]; 3],
}

impl Pattern {
    /// Parse a three-line pattern string.
    ///
    /// The center character must be `C`; short rows are padded with
    /// don't-care cells.
    pub fn parse(text: &str) -> MorphResult<Self> {
        let rows: Vec<&str> = text.split('\n').collect();
        if rows.len() != 3 {
            return Err(MorphError::InvalidPattern(format!(
                "expected 3 rows, got {}",
                rows.len()
            )));
        }

        let mut cells = [[Requirement::Any; 3]; 3];
        for (r, row) in rows.iter().enumerate() {
            if row.len() > 3 {
                return Err(MorphError::InvalidPattern(format!(
                    "row {r} longer than 3 cells: {row:?}"
                )));
            }
            for (c, ch) in row.chars().enumerate() {
                cells[r][c] = match ch {
                    'x' => Requirement::Foreground,
                    'o' => Requirement::Background,
                    ' ' => Requirement::Any,
                    'C' if (r, c) == (1, 1) => Requirement::Foreground,
                    'C' => {
                        return Err(MorphError::InvalidPattern(format!(
                            "center marker at ({r}, {c}), expected (1, 1)"
                        )));
                    }
                    other => {
                        return Err(MorphError::InvalidPattern(format!(
                            "unexpected character {other:?}"
                        )));
                    }
                };
            }
        }

        if cells[1][1] != Requirement::Foreground {
            return Err(MorphError::InvalidPattern(
                "center cell must be marked C".into(),
            ));
        }
        Ok(Self { cells })
    }

    /// Clockwise quarter rotation.
    pub fn rotate90(&self) -> Self {
        let mut cells = [[Requirement::Any; 3]; 3];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[2 - c][r];
            }
        }
        Self { cells }
    }

    /// The pattern and its three further quarter rotations.
    pub fn rotations(&self) -> [Pattern; 4] {
        let r1 = self.rotate90();
        let r2 = r1.rotate90();
        let r3 = r2.rotate90();
        [self.clone(), r1, r2, r3]
    }

    /// Whether the rule matches at (x, y) of a binary grid.
    pub fn matches(&self, grid: &PixelGrid, x: u32, y: u32) -> bool {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, req) in row.iter().enumerate() {
                let value = grid.get_or(
                    x as i64 + c as i64 - 1,
                    y as i64 + r as i64 - 1,
                    BACKGROUND,
                );
                match req {
                    Requirement::Foreground if value != FOREGROUND => return false,
                    Requirement::Background if value != BACKGROUND => return false,
                    _ => {}
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(rows: &[&str]) -> PixelGrid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let data: Vec<u8> = rows
            .iter()
            .flat_map(|r| r.bytes())
            .map(|b| if b == b'#' { FOREGROUND } else { BACKGROUND })
            .collect();
        PixelGrid::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Pattern::parse("oox\noCx").is_err());
        assert!(Pattern::parse("oox\nooxo\nooo").is_err());
        assert!(Pattern::parse("oox\noox\nooo").is_err());
        assert!(Pattern::parse("Cox\noox\nooo").is_err());
        assert!(Pattern::parse("oqx\noCx\nooo").is_err());
        assert!(Pattern::parse("oox\noCx\nox ").is_ok());
    }

    #[test]
    fn test_short_rows_are_dont_care() {
        let p = Pattern::parse("x\n C\n").unwrap();
        // only the top-left x and the center are constrained
        let g = binary(&[
            "#.#",
            "###",
            "###",
        ]);
        assert!(p.matches(&g, 1, 1));
    }

    #[test]
    fn test_matches_corner_rule() {
        // center with north and east neighbors only
        let p = Pattern::parse("ox \noCx\nooo").unwrap();
        let g = binary(&[
            ".#.",
            ".##",
            "...",
        ]);
        assert!(p.matches(&g, 1, 1));

        // an extra west neighbor violates the o cell
        let g2 = binary(&[
            ".#.",
            "###",
            "...",
        ]);
        assert!(!p.matches(&g2, 1, 1));
    }

    #[test]
    fn test_out_of_bounds_reads_background() {
        let p = Pattern::parse("ooo\noCx\nooo").unwrap();
        let g = binary(&[
            "##",
        ]);
        // o cells above/below/left fall outside the 2x1 grid and pass
        assert!(p.matches(&g, 0, 0));
        // x cell to the right falls outside at (1,0) and fails
        assert!(!p.matches(&g, 1, 0));
    }

    #[test]
    fn test_rotate90_clockwise() {
        // north+east corner rotates onto east+south
        let p = Pattern::parse("ox \noCx\nooo").unwrap();
        let r = p.rotate90();
        let expected = Pattern::parse("ooo\noCx\nox ").unwrap();
        assert_eq!(r, expected);

        // four rotations come back around
        assert_eq!(p.rotations()[3].rotate90(), p);
    }
}
