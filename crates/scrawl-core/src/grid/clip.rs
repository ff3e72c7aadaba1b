//! Clipping, cropping and flipping

use super::{GridMut, PixelGrid, get_data_bit, set_data_bit};
use crate::Box;
use crate::error::{Error, Result};

impl PixelGrid {
    /// Copy out the part of the grid covered by `region`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `region` does not overlap
    /// the grid.
    pub fn clip_rectangle(&self, region: &Box) -> Result<PixelGrid> {
        let clipped = region
            .clip(self.width() as i32, self.height() as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "clip region {:?} outside {}x{} grid",
                    region,
                    self.width(),
                    self.height()
                ))
            })?;

        let mut out = GridMut::new(clipped.w as u32, clipped.h as u32)?;
        for dy in 0..clipped.h as u32 {
            let src = self.row_data(clipped.y as u32 + dy);
            let dst = out.row_data_mut(dy);
            for dx in 0..clipped.w as u32 {
                if get_data_bit(src, clipped.x as u32 + dx) == 1 {
                    set_data_bit(dst, dx, 1);
                }
            }
        }
        Ok(out.into())
    }

    /// Crop to the tight bounding box of the ink.
    ///
    /// Returns the cropped grid and the box it occupied in `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] when the grid holds no ink.
    pub fn clip_to_foreground(&self) -> Result<(PixelGrid, Box)> {
        let fg = self.foreground_box().ok_or(Error::EmptyImage)?;
        if fg.x == 0 && fg.y == 0 && fg.w as u32 == self.width() && fg.h as u32 == self.height()
        {
            return Ok((self.clone(), fg));
        }
        Ok((self.clip_rectangle(&fg)?, fg))
    }

    /// Mirror the grid vertically (top row becomes bottom row).
    pub fn flip_top_bottom(&self) -> PixelGrid {
        let mut out = self.to_mut();
        let h = self.height();
        for y in 0..h {
            out.row_data_mut(y)
                .copy_from_slice(self.row_data(h - 1 - y));
        }
        out.into()
    }

    /// Mirror the grid horizontally (left column becomes right column).
    pub fn flip_left_right(&self) -> PixelGrid {
        let w = self.width();
        let mut out = self.to_mut();
        for y in 0..self.height() {
            let src = self.row_data(y);
            let dst = out.row_data_mut(y);
            for x in 0..w {
                set_data_bit(dst, w - 1 - x, get_data_bit(src, x));
            }
        }
        out.into()
    }
}
