//! Connected component labeling
//!
//! Two-pass labeling over a binary grid. Pass 1 raster-scans, assigning
//! each foreground pixel either a fresh label (no labeled prior neighbor)
//! or the minimum prior-neighbor label, while recording label equivalences
//! in a union-find forest. Pass 2 canonicalizes every pixel to its
//! equivalence-class root and renumbers the classes consecutively in
//! first-appearance raster order, so the output labels are exactly
//! `1..=count` with 0 reserved for background.
//!
//! Foreground is defined as any sample different from the configured
//! background value, which lets the same labeler serve dark-on-light and
//! light-on-dark masks.

use crate::error::RegionResult;
use wormscan_core::{BACKGROUND, LabelMap, PixelGrid};

/// Connectivity for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

/// Parameters for [`label_components`].
#[derive(Debug, Clone, Copy)]
pub struct LabelOptions {
    pub connectivity: ConnectivityType,
    /// Sample value treated as background; everything else is foreground
    pub background: u8,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::EightWay,
            background: BACKGROUND,
        }
    }
}

impl LabelOptions {
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    pub fn with_background(mut self, background: u8) -> Self {
        self.background = background;
        self
    }
}

/// A label map together with its distinct-label count.
#[derive(Debug, Clone)]
pub struct Labeling {
    pub map: LabelMap,
    /// Number of components; labels are exactly `1..=count`
    pub count: u32,
}

/// Find the class root, compressing the path along the way.
fn find_root(parent: &mut [u32], mut label: u32) -> u32 {
    while parent[label as usize] != label {
        parent[label as usize] = parent[parent[label as usize] as usize];
        label = parent[label as usize];
    }
    label
}

/// Merge the classes of two labels; the smaller root wins.
fn union_labels(parent: &mut [u32], a: u32, b: u32) {
    let root_a = find_root(parent, a);
    let root_b = find_root(parent, b);
    if root_a == root_b {
        return;
    }
    if root_a < root_b {
        parent[root_b as usize] = root_a;
    } else {
        parent[root_a as usize] = root_b;
    }
}

/// Label every connected foreground component.
pub fn label_components(grid: &PixelGrid, options: &LabelOptions) -> RegionResult<Labeling> {
    let (width, height) = grid.dimensions();
    let mut map = LabelMap::new(width, height)?;

    // prior neighbors already visited by the raster scan
    let prior: &[(i64, i64)] = match options.connectivity {
        ConnectivityType::FourWay => &[(0, -1), (-1, 0)],
        ConnectivityType::EightWay => &[(-1, -1), (0, -1), (1, -1), (-1, 0)],
    };

    // parent[0] is a placeholder so labels index directly
    let mut parent: Vec<u32> = vec![0];
    let mut next_label = 0u32;

    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) == Some(options.background) {
                continue;
            }

            let mut min_label = 0u32;
            let mut neighbors = [0u32; 4];
            let mut n = 0;
            for (dx, dy) in prior {
                let label = map.get_or_zero(x as i64 + dx, y as i64 + dy);
                if label != 0 {
                    neighbors[n] = label;
                    n += 1;
                    if min_label == 0 || label < min_label {
                        min_label = label;
                    }
                }
            }

            let label = if min_label == 0 {
                next_label += 1;
                parent.push(next_label);
                next_label
            } else {
                for &neighbor in &neighbors[..n] {
                    union_labels(&mut parent, min_label, neighbor);
                }
                min_label
            };
            map.set(x, y, label)?;
        }
    }

    // canonicalize and renumber consecutively in first-appearance order
    let mut renumber = vec![0u32; parent.len()];
    let mut count = 0u32;
    for cell in map.data_mut() {
        if *cell == 0 {
            continue;
        }
        let root = find_root(&mut parent, *cell);
        if renumber[root as usize] == 0 {
            count += 1;
            renumber[root as usize] = count;
        }
        *cell = renumber[root as usize];
    }

    Ok(Labeling { map, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wormscan_core::FOREGROUND;

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
    fn test_two_separate_components() {
        let g = binary(&[
            "##...",
            "##...",
            "...##",
        ]);
        let labeling = label_components(&g, &LabelOptions::default()).unwrap();
        assert_eq!(labeling.count, 2);
        assert_eq!(labeling.map.get(0, 0), Some(1));
        assert_eq!(labeling.map.get(3, 2), Some(2));
        assert_eq!(labeling.map.get(2, 0), Some(0));
    }

    #[test]
    fn test_diagonal_connectivity() {
        let g = binary(&[
            "#.",
            ".#",
        ]);
        let eight = label_components(&g, &LabelOptions::default()).unwrap();
        assert_eq!(eight.count, 1);

        let four = label_components(
            &g,
            &LabelOptions::default().with_connectivity(ConnectivityType::FourWay),
        )
        .unwrap();
        assert_eq!(four.count, 2);
    }

    #[test]
    fn test_u_shape_merges_labels() {
        // arms get distinct pass-1 labels; the bottom row proves equivalence
        let g = binary(&[
            "#.#",
            "#.#",
            "###",
        ]);
        let labeling = label_components(&g, &LabelOptions::default()).unwrap();
        assert_eq!(labeling.count, 1);
        for y in 0..3 {
            for x in 0..3 {
                let expected = if (x, y) == (1, 0) || (x, y) == (1, 1) { 0 } else { 1 };
                assert_eq!(labeling.map.get(x, y), Some(expected), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_labels_are_consecutive() {
        let g = binary(&[
            "#.#.#",
            ".....",
            "#.#.#",
        ]);
        let labeling = label_components(
            &g,
            &LabelOptions::default().with_connectivity(ConnectivityType::FourWay),
        )
        .unwrap();
        assert_eq!(labeling.count, 6);
        let mut seen: Vec<u32> = labeling.map.data().iter().copied().filter(|&l| l != 0).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_custom_background_value() {
        // light background: label the dark pixels instead
        let mut g = PixelGrid::filled(3, 1, FOREGROUND).unwrap();
        g.set(1, 0, 0).unwrap();
        let labeling =
            label_components(&g, &LabelOptions::default().with_background(FOREGROUND)).unwrap();
        assert_eq!(labeling.count, 1);
        assert_eq!(labeling.map.get(1, 0), Some(1));
        assert_eq!(labeling.map.get(0, 0), Some(0));
    }

    #[test]
    fn test_pixel_counts_sum_to_foreground() {
        let g = binary(&[
            "##..#",
            "##..#",
            ".....",
            "###..",
        ]);
        let labeling = label_components(&g, &LabelOptions::default()).unwrap();
        let total: u32 = (1..=labeling.count).map(|l| labeling.map.count_label(l)).sum();
        assert_eq!(total, g.count_value(FOREGROUND));
    }
}
