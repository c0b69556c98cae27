//! wormscan-test - Regression test framework for the morphometry engine
//!
//! This crate provides a small regression harness in the style of
//! regutils-driven test suites, plus ASCII-art fixture builders for
//! describing test images inline:
//!
//! - **Compare**: check results against expected values (default)
//! - **Display**: run with diagnostics, without failing on mismatch
//!
//! # Usage
//!
//! ```
//! use wormscan_test::{RegParams, binary_grid};
//!
//! let mut rp = RegParams::new("doc");
//! let grid = binary_grid(&["###"]);
//! rp.compare_values(3.0, grid.count_value(wormscan_core::FOREGROUND) as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod fixtures;
mod params;

pub use fixtures::{binary_grid, gray_grid};
pub use params::{RegParams, RegTestMode};
