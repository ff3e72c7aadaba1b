//! scrawl-io - Raster decoding and resource loading
//!
//! Hands the recognizer its inputs:
//!
//! - [`read_raster`] / [`read_raster_mem`]: decode PNG or JPEG into a
//!   [`Raster`], detecting the format from magic bytes
//! - [`read_lexicon`]: newline-delimited word lists
//! - [`read_corpus`]: labeled sample directories
//!
//! PNG support is behind the default `png-format` feature and JPEG behind
//! the default `jpeg` feature.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
pub mod resource;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use resource::{LabeledRaster, parse_lexicon, read_corpus, read_lexicon};

use scrawl_core::Raster;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Read a raster from a file, detecting its format from the header.
pub fn read_raster<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    decode(format, reader)
}

/// Read a raster from an in-memory encoded image.
pub fn read_raster_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    decode(format, Cursor::new(data))
}

/// Write a raster to a PNG file.
#[cfg(feature = "png-format")]
pub fn write_raster_png<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let file = std::io::BufWriter::new(File::create(path)?);
    png::write_png(raster, file)
}

#[allow(unused_variables)]
fn decode<R: std::io::BufRead + std::io::Seek>(format: ImageFormat, reader: R) -> IoResult<Raster> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}
