//! Desaturation
//!
//! Ink is detected on a gray version of the photograph so that colored
//! pens and tinted paper are judged by brightness alone. Gray is taken
//! from a zero-saturation color matrix, whose luminance weights are
//! below; alpha passes through untouched.

use scrawl_core::{Raster, color};

/// Red luminance weight of the zero-saturation matrix
pub const LUMA_RED: f32 = 0.213;
/// Green luminance weight of the zero-saturation matrix
pub const LUMA_GREEN: f32 = 0.715;
/// Blue luminance weight of the zero-saturation matrix
pub const LUMA_BLUE: f32 = 0.072;

/// Gray value of one RGB triple.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let v = LUMA_RED * r as f32 + LUMA_GREEN * g as f32 + LUMA_BLUE * b as f32;
    v.round().clamp(0.0, 255.0) as u8
}

/// Desaturate one packed pixel, keeping its alpha.
#[inline]
pub fn desaturate_pixel(pixel: u32) -> u32 {
    let (r, g, b, a) = color::extract_rgba(pixel);
    let v = rgb_to_gray(r, g, b);
    color::compose_rgba(v, v, v, a)
}

/// Desaturate a whole raster.
pub fn desaturate(raster: &Raster) -> Raster {
    raster.map_pixels(desaturate_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_extremes() {
        assert_eq!(rgb_to_gray(0, 0, 0), 0);
        assert_eq!(rgb_to_gray(255, 255, 255), 255);
    }

    #[test]
    fn test_green_is_brighter_than_blue() {
        assert!(rgb_to_gray(0, 200, 0) > rgb_to_gray(0, 0, 200));
    }

    #[test]
    fn test_desaturate_keeps_alpha() {
        let p = desaturate_pixel(color::compose_rgba(200, 10, 10, 7));
        let (r, g, b, a) = color::extract_rgba(p);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 7);
    }
}
