//! scrawl-test - Regression test framework for scrawl
//!
//! Supports three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use scrawl_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(2.0, glyphs.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Workspace root, two levels above this crate's manifest.
fn workspace_root() -> String {
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Directory of checked-in golden files
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Scratch directory for regression output
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
