//! Binarization and normalization
//!
//! Turns an RGBA [`Raster`] into a cropped binary [`PixelGrid`]:
//!
//! 1. Desaturate (optional, on by default)
//! 2. Binarize every pixel by its relative distance from white and black
//! 3. Crop to the tight bounding box of the ink

use crate::colorspace::desaturate_pixel;
use crate::{ColorError, ColorResult};
use scrawl_core::{GridMut, PixelGrid, Raster, color, grid::set_data_bit};
use tracing::debug;

/// Default ink threshold on `dW / (dW + dB)`
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Options for binarization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOptions {
    /// A pixel is ink when its distance from white, relative to the sum of
    /// its distances from white and black, exceeds this value. Must lie
    /// strictly between 0 and 1.
    pub threshold: f64,
    /// Desaturate before binarizing
    pub desaturate: bool,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            desaturate: true,
        }
    }
}

impl ThresholdOptions {
    /// Set the ink threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable desaturation
    pub fn with_desaturate(mut self, desaturate: bool) -> Self {
        self.desaturate = desaturate;
        self
    }

    /// Check that the threshold is usable.
    pub fn validate(&self) -> ColorResult<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ColorError::InvalidParameters(format!(
                "threshold must lie in (0, 1), got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Decide whether one RGBA pixel is ink.
///
/// Fully transparent pixels are always background.
pub fn is_ink(r: u8, g: u8, b: u8, a: u8, threshold: f64) -> bool {
    if a == 0 {
        return false;
    }
    let (r, g, b) = (r as f64, g as f64, b as f64);
    let d_white = ((255.0 - r).powi(2) + (255.0 - g).powi(2) + (255.0 - b).powi(2)).sqrt();
    let d_black = (r * r + g * g + b * b).sqrt();
    d_white / (d_white + d_black) > threshold
}

/// Binarize a raster without cropping.
pub fn binarize_raster(raster: &Raster, options: &ThresholdOptions) -> ColorResult<PixelGrid> {
    options.validate()?;

    let width = raster.width();
    let mut grid = GridMut::new(width, raster.height())?;
    for (y, row) in raster.data().chunks_exact(width as usize).enumerate() {
        let line = grid.row_data_mut(y as u32);
        for (x, &pixel) in row.iter().enumerate() {
            let pixel = if options.desaturate {
                desaturate_pixel(pixel)
            } else {
                pixel
            };
            let (r, g, b, a) = color::extract_rgba(pixel);
            if is_ink(r, g, b, a, options.threshold) {
                set_data_bit(line, x as u32, 1);
            }
        }
    }
    Ok(grid.into())
}

/// Normalize a raster: desaturate, binarize and crop to the ink.
///
/// # Errors
///
/// Returns [`ColorError::EmptyImage`] when no pixel is ink.
pub fn normalize(raster: &Raster, options: &ThresholdOptions) -> ColorResult<PixelGrid> {
    let binary = binarize_raster(raster, options)?;
    let (grid, bounds) = binary.clip_to_foreground().map_err(|e| match e {
        scrawl_core::Error::EmptyImage => ColorError::EmptyImage,
        other => ColorError::Core(other),
    })?;
    debug!(
        width = raster.width(),
        height = raster.height(),
        crop_x = bounds.x,
        crop_y = bounds.y,
        crop_w = bounds.w,
        crop_h = bounds.h,
        "normalized raster"
    );
    Ok(grid)
}
