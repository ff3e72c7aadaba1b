//! PixelGrid - The binary ink/background grid
//!
//! `PixelGrid` is the unit handed between recognition stages. Every pixel
//! is either ink (1) or background (0).
//!
//! # Pixel layout
//!
//! - Pixels are stored one bit each in 32-bit words
//! - Every row starts on a 32-bit boundary (`wpl` words per line)
//! - Pixels are packed MSB to LSB within each word
//!
//! # Ownership model
//!
//! `PixelGrid` uses `Arc` for cheap cloning (shared ownership) and is
//! never mutated in place. To modify pixels, convert to [`GridMut`] via
//! [`PixelGrid::try_into_mut`] or [`PixelGrid::to_mut`], then convert back
//! with `Into<PixelGrid>`. `to_mut` always copies, so a grid that other
//! glyphs still hold can never be changed under them.

mod access;
mod clip;
mod measure;

pub use access::{clear_data_bit, get_data_bit, set_data_bit};

use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Internal grid data
#[derive(Debug, Clone, PartialEq, Eq)]
struct GridData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// 32-bit words per line
    wpl: u32,
    /// The packed bits
    data: Vec<u32>,
}

impl GridData {
    fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = width.div_ceil(32);
        let data_size = (wpl as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            wpl,
            data: vec![0u32; data_size],
        })
    }

    #[inline]
    fn row(&self, y: u32) -> &[u32] {
        let start = (y * self.wpl) as usize;
        &self.data[start..start + self.wpl as usize]
    }

    #[inline]
    fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.wpl) as usize;
        let wpl = self.wpl as usize;
        &mut self.data[start..start + wpl]
    }
}

/// Immutable binary grid
///
/// # Examples
///
/// ```
/// use scrawl_core::PixelGrid;
///
/// let grid = PixelGrid::from_ascii(&["#.#", ".#."]).unwrap();
/// assert_eq!(grid.width(), 3);
/// assert!(grid.is_ink(1, 1));
/// assert!(!grid.is_ink(1, 0));
/// ```
#[derive(Debug, Clone)]
pub struct PixelGrid {
    inner: Arc<GridData>,
}

impl PixelGrid {
    /// Create an all-background grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixelGrid {
            inner: Arc::new(GridData::new(width, height)?),
        })
    }

    /// Build a grid from text rows, `#` marking ink and anything else
    /// background.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, a row is empty, or the rows
    /// differ in length.
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut grid = GridMut::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            let len = row.chars().count() as u32;
            if len != width {
                return Err(Error::DimensionMismatch {
                    expected: (width, 1),
                    actual: (len, 1),
                });
            }
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.set(x as u32, y as u32, true)?;
                }
            }
        }
        Ok(grid.into())
    }

    /// Get the grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the number of 32-bit words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get the raw packed data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        self.inner.row(y)
    }

    /// Number of handles sharing this grid's storage.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// True when both handles share the same storage.
    pub fn ptr_eq(&self, other: &PixelGrid) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Width-to-height ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.inner.width as f32 / self.inner.height as f32
    }

    /// Try to get mutable access to the grid.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<GridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GridMut { inner: data }),
            Err(arc) => Err(PixelGrid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    ///
    /// Always copies, leaving every other handle untouched.
    pub fn to_mut(&self) -> GridMut {
        GridMut {
            inner: (*self.inner).clone(),
        }
    }
}

impl PartialEq for PixelGrid {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner == other.inner
    }
}

impl Eq for PixelGrid {}

impl fmt::Display for PixelGrid {
    /// Renders one text row per grid row, `#` for ink and `.` for background.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            let line = self.row_data(y);
            for x in 0..self.width() {
                let c = if get_data_bit(line, x) == 1 { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Mutable binary grid
///
/// Convert back to an immutable [`PixelGrid`] using `Into<PixelGrid>`.
#[derive(Debug)]
pub struct GridMut {
    inner: GridData,
}

impl GridMut {
    /// Create an all-background mutable grid.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(GridMut {
            inner: GridData::new(width, height)?,
        })
    }

    /// Get the grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the packed words of row `y` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        self.inner.row_mut(y)
    }
}

impl From<GridMut> for PixelGrid {
    fn from(grid: GridMut) -> Self {
        PixelGrid {
            inner: Arc::new(grid.inner),
        }
    }
}
