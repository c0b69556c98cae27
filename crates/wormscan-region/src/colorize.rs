//! Debug rendering of label maps
//!
//! Assigns one color per label for visual inspection of labeling output.
//! Colors come from a fixed-seed generator so successive runs agree;
//! nothing downstream depends on the particular values.

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use wormscan_core::LabelMap;

/// Seed for the per-label color stream
const COLOR_SEED: u64 = 0x5eed;

/// Bytes per RGB pixel in the rendered buffer
pub const RGB_BYTES: usize = 3;

/// One deterministic RGB color per label `1..=count`.
///
/// Channels stay in 64..=255 so no label color collapses into the black
/// background.
pub fn label_colors(count: u32) -> Vec<[u8; RGB_BYTES]> {
    let mut rng = StdRng::seed_from_u64(COLOR_SEED);
    (0..count)
        .map(|_| {
            [
                rng.random_range(64..=255u8),
                rng.random_range(64..=255u8),
                rng.random_range(64..=255u8),
            ]
        })
        .collect()
}

/// Render a label map to a row-major RGB byte buffer.
///
/// Background cells are black; labeled cells take their label's color.
pub fn colorize_labels(labels: &LabelMap, count: u32) -> Vec<u8> {
    let (width, height) = labels.dimensions();
    let colors = label_colors(count);
    let mut out = vec![0u8; width as usize * height as usize * RGB_BYTES];

    for (idx, &label) in labels.data().iter().enumerate() {
        if label == 0 || label > count {
            continue;
        }
        let color = colors[(label - 1) as usize];
        out[idx * RGB_BYTES..idx * RGB_BYTES + RGB_BYTES].copy_from_slice(&color);
    }
    out
}
