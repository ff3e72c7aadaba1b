//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use scrawl_core::PixelGrid;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the current check
/// index, the mode, and every recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "segment")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Record a failure of the current check.
    fn fail(&mut self, detail: impl std::fmt::Display) -> bool {
        let msg = format!("Failure in {}_reg, index {}: {}", self.test_name, self.index, detail);
        eprintln!("{msg}");
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            return self.fail(format_args!(
                "expected {expected}, got {actual} (difference {diff} > {delta})"
            ));
        }
        true
    }

    /// Compare two strings for exact equality
    pub fn compare_strings(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;
        if expected != actual {
            return self.fail(format_args!("expected {expected:?}, got {actual:?}"));
        }
        true
    }

    /// Compare two grids cell by cell.
    ///
    /// On mismatch both grids are logged as text.
    pub fn compare_grids(&mut self, expected: &PixelGrid, actual: &PixelGrid) -> bool {
        self.index += 1;
        if expected == actual {
            return true;
        }
        let (ew, eh) = (expected.width(), expected.height());
        let (aw, ah) = (actual.width(), actual.height());
        if (ew, eh) != (aw, ah) {
            return self.fail(format_args!(
                "grid is {aw}x{ah}, expected {ew}x{eh}\nexpected:\n{expected}actual:\n{actual}"
            ));
        }
        let first = (0..eh)
            .flat_map(|y| (0..ew).map(move |x| (x, y)))
            .find(|&(x, y)| expected.is_ink(x, y) != actual.is_ink(x, y));
        match first {
            Some((x, y)) => self.fail(format_args!(
                "grids differ first at ({x}, {y})\nexpected:\n{expected}actual:\n{actual}"
            )),
            None => true,
        }
    }

    /// Write text to the regout directory and check it against the golden
    /// file of the same index.
    ///
    /// In generate mode, the output becomes the new golden file. In display
    /// mode nothing is compared.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        fs::write(&local_path, data)?;
        self.check_file(&local_path, ext)
    }

    /// Dump a grid as a 1-bit PNG into the regout directory.
    ///
    /// Only written in display mode, for visual inspection.
    pub fn write_grid_for_display(&mut self, grid: &PixelGrid) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = format!(
            "{}/{}.display.{:02}.png",
            regout_dir(),
            self.test_name,
            self.index
        );
        let file = fs::File::create(&path)?;
        scrawl_io::png::write_grid_png(grid, std::io::BufWriter::new(file)).map_err(|e| {
            TestError::ImageWrite {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    fn check_file(&mut self, local_path: &str, ext: &str) -> TestResult<()> {
        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format_args!("golden file not found: {golden_path}"));
                } else if fs::read(local_path)? != fs::read(&golden_path)? {
                    self.fail(format_args!("{local_path} differs from {golden_path}"));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
