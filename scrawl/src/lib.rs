//! scrawl - Handwritten word recognition for Rust
//!
//! Reads a word image and recognizes it letter by letter against a corpus
//! of labeled samples, optionally snapping the result to a lexicon word.
//!
//! # Overview
//!
//! - Image input (PNG, JPEG) and corpus/lexicon loading
//! - Desaturation, binarization and cropping
//! - Column segmentation with recovery of touching letters
//! - Ratio and structural feature classification
//! - Sample-gated identification and dictionary correction
//!
//! # Example
//!
//! ```no_run
//! use scrawl::{RecognizerOptions, io, recognizer_from_paths};
//!
//! let recognizer =
//!     recognizer_from_paths("corpus", Some("words.txt"), RecognizerOptions::default()).unwrap();
//! let raster = io::read_raster("word.png").unwrap();
//! println!("{}", recognizer.recognize(&raster).unwrap().text());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use scrawl_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use scrawl_color as color;
pub use scrawl_io as io;
pub use scrawl_recog as recog;

pub use scrawl_recog::{
    Dictionary, RecogError, RecogResult, Recognition, Recognizer, RecognizerOptions, SampleBase,
};

use scrawl_recog::Classifier;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build a recognizer whose sample base and dictionary load from disk on
/// first use.
///
/// `corpus_dir` is a labeled corpus directory as read by
/// [`io::read_corpus`]; `lexicon` is an optional newline-delimited word
/// list. Nothing is read until the recognizer first needs it, and read
/// failures surface then as [`RecogError::Load`].
pub fn recognizer_from_paths<P, Q>(
    corpus_dir: P,
    lexicon: Option<Q>,
    options: RecognizerOptions,
) -> RecogResult<Recognizer>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let corpus_dir: PathBuf = corpus_dir.as_ref().to_path_buf();
    if corpus_dir.as_os_str().is_empty() {
        return Err(RecogError::InvalidParameter(
            "corpus directory path is empty".to_string(),
        ));
    }
    debug!(corpus = %corpus_dir.display(), "deferring corpus load");

    let mut recognizer = Recognizer::new(options).with_sample_loader(move || {
        let corpus = io::read_corpus(&corpus_dir).map_err(|e| RecogError::Load(e.to_string()))?;
        SampleBase::from_corpus(
            corpus.into_iter().map(|s| (s.label, s.raster)),
            &options.threshold,
            &Classifier::new(options.classifier),
        )
    });

    if let Some(lexicon) = lexicon {
        let lexicon = lexicon.as_ref().to_path_buf();
        recognizer = recognizer.with_dictionary_loader(move || {
            let words = io::read_lexicon(&lexicon).map_err(|e| RecogError::Load(e.to_string()))?;
            Ok(Dictionary::from_words(words))
        });
    }
    Ok(recognizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_corpus_path_rejected() {
        let result = recognizer_from_paths("", None::<&str>, RecognizerOptions::default());
        assert!(matches!(result, Err(RecogError::InvalidParameter(_))));
    }

    #[test]
    fn test_missing_corpus_fails_on_first_use() {
        let recognizer = recognizer_from_paths(
            "/nonexistent/scrawl/corpus",
            None::<&str>,
            RecognizerOptions::default(),
        )
        .unwrap();
        assert!(matches!(recognizer.sample_base(), Err(RecogError::Load(_))));
        assert!(recognizer.dictionary().unwrap().is_none());
    }
}
