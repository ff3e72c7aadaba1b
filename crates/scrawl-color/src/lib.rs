//! scrawl-color - Input normalization
//!
//! Turns a photographed RGBA raster into the binary grid the recognizer
//! works on:
//!
//! - **Desaturation** ([`colorspace`]): zero-saturation gray conversion
//! - **Thresholding** ([`threshold`]): ink/background binarization and
//!   cropping to the ink bounding box

pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use scrawl_core;

pub use colorspace::{desaturate, desaturate_pixel, rgb_to_gray};
pub use error::{ColorError, ColorResult};
pub use threshold::{DEFAULT_THRESHOLD, ThresholdOptions, binarize_raster, is_ink, normalize};
