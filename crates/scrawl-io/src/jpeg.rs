//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. 8-bit grayscale and
//! 24-bit RGB are decoded into an opaque RGBA [`Raster`]; CMYK and 16-bit
//! grayscale are rejected. Writing is not supported because
//! `jpeg-decoder` is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use scrawl_core::{Raster, color};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let pixels: Vec<u32> = match info.pixel_format {
        PixelFormat::L8 => data.iter().map(|&v| color::compose_rgb(v, v, v)).collect(),
        PixelFormat::RGB24 => data
            .chunks_exact(3)
            .map(|px| color::compose_rgb(px[0], px[1], px[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Ok(Raster::from_pixels(width, height, pixels)?)
}
