//! Raster - RGBA input image
//!
//! A `Raster` is the photographed page as handed over by a capture or
//! decoding collaborator: a width, a height, and one packed `0xRRGGBBAA`
//! word per pixel (see [`crate::color`]). It carries no binarization
//! state; the normalizer turns it into a [`crate::PixelGrid`].

use crate::color;
use crate::error::{Error, Result};
use crate::Box;

/// Opaque white, the fill value of a fresh raster.
pub const WHITE: u32 = 0xffff_ffff;

/// Opaque black.
pub const BLACK: u32 = 0x0000_00ff;

/// RGBA raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u32>,
}

impl Raster {
    /// Create a raster filled with opaque white.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![WHITE; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or the buffer length
    /// does not equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "pixel buffer holds {} values, expected {}",
                data.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major packed pixels.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    /// Get the packed pixel at (x, y), or `None` outside the raster.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }

    /// Get the RGBA components at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }

    /// Set the packed pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the raster.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: u32) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width as usize,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height as usize,
            });
        }
        self.data[y as usize * self.width as usize + x as usize] = pixel;
        Ok(())
    }

    /// Set the pixel at (x, y) from RGBA components.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }

    /// Fill the part of `region` that lies inside the raster.
    pub fn fill_rect(&mut self, region: &Box, pixel: u32) {
        let Some(clipped) = region.clip(self.width as i32, self.height as i32) else {
            return;
        };
        let stride = self.width as usize;
        for y in clipped.y..clipped.bottom() {
            let row = y as usize * stride;
            self.data[row + clipped.x as usize..row + clipped.right() as usize].fill(pixel);
        }
    }

    /// Apply `f` to every pixel, producing a new raster of the same size.
    pub fn map_pixels<F>(&self, f: F) -> Raster
    where
        F: Fn(u32) -> u32,
    {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&p| f(p)).collect(),
        }
    }
}
