//! scrawl-recog - Handwritten word recognition
//!
//! This crate turns a normalized word grid into text:
//!
//! - **Segmentation**: Cut a word into glyphs and split touching letters
//! - **Feature classification**: Bucket each glyph by aspect ratio and
//!   structural shape
//! - **Identification**: Score glyphs against labeled samples of the same
//!   classes
//! - **Dictionary correction**: Snap the result to a close lexicon word
//!
//! # Quick Start
//!
//! ```no_run
//! use scrawl_recog::{Dictionary, Recognizer, RecognizerOptions, SampleBase};
//! use scrawl_recog::scrawl_core::Raster;
//!
//! let recognizer = Recognizer::new(RecognizerOptions::default())
//!     .with_sample_base(SampleBase::new())
//!     .with_dictionary(Dictionary::from_words(["hello", "world"]));
//!
//! let raster = Raster::new(120, 40).unwrap();
//! let result = recognizer.recognize(&raster).unwrap();
//! println!("{} (raw {})", result.text(), result.raw);
//! ```
//!
//! # Modules
//!
//! - [`segment`]: Column segmentation and oversize recovery
//! - [`classify`]: Ratio and feature classification
//! - [`samplebase`]: Labeled reference samples
//! - [`identify`]: Sample scoring and label votes
//! - [`dictionary`]: Lexicon correction
//! - [`recognizer`]: The recognition context tying them together

pub mod classify;
pub mod dictionary;
mod error;
pub mod identify;
pub mod recognizer;
pub mod samplebase;
pub mod segment;
mod types;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use classify::{Classifier, ClassifierOptions, FeatureRule};
pub use dictionary::Dictionary;
pub use identify::{Identifier, LabelScore, Outcome};
pub use recognizer::{Recognition, Recognizer, RecognizerOptions};
pub use samplebase::SampleBase;
pub use segment::{SegmentOptions, Segmenter};
pub use types::{FeatureClass, Glyph, RatioClass, Word};

// Re-export dependencies for convenience
pub use scrawl_color;
pub use scrawl_core;
