//! Pixel access functions
//!
//! Low-level functions for reading and writing individual bits, plus the
//! checked accessors built on them.
//!
//! Pixel 0 of a row occupies bit 31 (MSB) of the row's first word.

use super::{GridMut, PixelGrid};
use crate::Box;
use crate::error::{Error, Result};

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let mask = 1u32 << (31 - (x & 31));
    if val & 1 == 1 {
        *word |= mask;
    } else {
        *word &= !mask;
    }
}

/// Clear a 1-bit pixel to 0.
#[inline]
pub fn clear_data_bit(line: &mut [u32], x: u32) {
    line[(x >> 5) as usize] &= !(1u32 << (31 - (x & 31)));
}

impl PixelGrid {
    /// Get the pixel at (x, y): `Some(true)` for ink.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(get_data_bit(self.row_data(y), x) == 1)
    }

    /// True when (x, y) is inside the grid and holds ink.
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// Signed variant of [`PixelGrid::get`] for walks that may step off
    /// the grid.
    #[inline]
    pub fn ink_at(&self, x: i32, y: i32) -> Option<bool> {
        if x < 0 || y < 0 {
            return None;
        }
        self.get(x as u32, y as u32)
    }
}

impl GridMut {
    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(get_data_bit(self.inner.row(y), x) == 1)
    }

    /// Set the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the grid.
    pub fn set(&mut self, x: u32, y: u32, ink: bool) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        set_data_bit(self.row_data_mut(y), x, ink as u32);
        Ok(())
    }

    /// Erase every pixel of `region` that lies inside the grid.
    pub fn clear_rect(&mut self, region: &Box) {
        let Some(clipped) = region.clip(self.width() as i32, self.height() as i32) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            let line = self.row_data_mut(y as u32);
            for x in clipped.x..clipped.right() {
                clear_data_bit(line, x as u32);
            }
        }
    }

    /// Mark every pixel of `region` that lies inside the grid as ink.
    pub fn fill_rect(&mut self, region: &Box) {
        let Some(clipped) = region.clip(self.width() as i32, self.height() as i32) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            let line = self.row_data_mut(y as u32);
            for x in clipped.x..clipped.right() {
                set_data_bit(line, x as u32, 1);
            }
        }
    }
}
