//! Recognition context
//!
//! A [`Recognizer`] owns everything one recognition needs: the normalizer
//! settings, the segmenter and classifier, the sample base and an optional
//! dictionary. The sample base and dictionary may be given up front or as
//! loaders; a loader runs on first use, at most once even under concurrent
//! first calls, and a failed load is retried on the next call.
//!
//! # Example
//!
//! ```
//! use scrawl_recog::{Dictionary, Recognizer, RecognizerOptions, SampleBase};
//!
//! let recognizer = Recognizer::new(RecognizerOptions::default())
//!     .with_sample_loader(|| Ok(SampleBase::new()))
//!     .with_dictionary(Dictionary::from_words(["hello", "world"]));
//! assert!(recognizer.sample_base().unwrap().is_empty());
//! ```

use crate::classify::{Classifier, ClassifierOptions};
use crate::dictionary::Dictionary;
use crate::error::{RecogError, RecogResult};
use crate::identify::{Identifier, Outcome};
use crate::samplebase::SampleBase;
use crate::segment::{SegmentOptions, Segmenter};
use crate::types::{Glyph, Word};
use once_cell::sync::OnceCell;
use scrawl_color::{ColorError, ThresholdOptions, normalize};
use scrawl_core::{PixelGrid, Raster};
use std::fmt;
use tracing::{debug, info};

/// Default character rendered for unidentified glyphs
pub const DEFAULT_PLACEHOLDER: char = '?';

type Loader<T> = std::boxed::Box<dyn Fn() -> RecogResult<T> + Send + Sync>;

/// Recognition settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecognizerOptions {
    /// Binarization settings
    pub threshold: ThresholdOptions,
    /// Segmentation settings
    pub segment: SegmentOptions,
    /// Classifier settings
    pub classifier: ClassifierOptions,
    /// Run dictionary correction when a dictionary is available
    pub correct_words: bool,
    /// Rendered in place of unidentified glyphs
    pub placeholder: char,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            threshold: ThresholdOptions::default(),
            segment: SegmentOptions::default(),
            classifier: ClassifierOptions::default(),
            correct_words: true,
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl RecognizerOptions {
    pub fn with_threshold(mut self, threshold: ThresholdOptions) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_correct_words(mut self, correct_words: bool) -> Self {
        self.correct_words = correct_words;
        self
    }

    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Result of recognizing one word image
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    /// Identified labels, placeholders for unidentified glyphs
    pub raw: String,
    /// Dictionary output, when a dictionary was used
    pub corrected: Option<String>,
    /// The segmented, labeled glyphs
    pub word: Word,
}

impl Recognition {
    /// The corrected text if there is one, the raw text otherwise.
    pub fn text(&self) -> &str {
        self.corrected.as_deref().unwrap_or(&self.raw)
    }
}

/// Handwritten word recognizer
pub struct Recognizer {
    options: RecognizerOptions,
    segmenter: Segmenter,
    samples: OnceCell<SampleBase>,
    sample_loader: Option<Loader<SampleBase>>,
    dictionary: OnceCell<Dictionary>,
    dictionary_loader: Option<Loader<Dictionary>>,
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("options", &self.options)
            .field("samples_loaded", &self.samples.get().is_some())
            .field("has_sample_loader", &self.sample_loader.is_some())
            .field("dictionary_loaded", &self.dictionary.get().is_some())
            .field("has_dictionary_loader", &self.dictionary_loader.is_some())
            .finish()
    }
}

impl Recognizer {
    /// Create a recognizer with no sample base or dictionary yet.
    pub fn new(options: RecognizerOptions) -> Self {
        let segmenter = Segmenter::new(options.segment, Classifier::new(options.classifier));
        Self {
            options,
            segmenter,
            samples: OnceCell::new(),
            sample_loader: None,
            dictionary: OnceCell::new(),
            dictionary_loader: None,
        }
    }

    /// Use an already built sample base.
    pub fn with_sample_base(mut self, samples: SampleBase) -> Self {
        self.samples = OnceCell::with_value(samples);
        self
    }

    /// Build the sample base on first use.
    pub fn with_sample_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> RecogResult<SampleBase> + Send + Sync + 'static,
    {
        self.sample_loader = Some(std::boxed::Box::new(loader));
        self
    }

    /// Use an already built dictionary.
    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = OnceCell::with_value(dictionary);
        self
    }

    /// Build the dictionary on first use.
    pub fn with_dictionary_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> RecogResult<Dictionary> + Send + Sync + 'static,
    {
        self.dictionary_loader = Some(std::boxed::Box::new(loader));
        self
    }

    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// The classifier glyphs and samples must share.
    pub fn classifier(&self) -> &Classifier {
        self.segmenter.classifier()
    }

    /// The sample base, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::MissingSampleBase`] when neither a sample base
    /// nor a loader was supplied, or the loader's error.
    pub fn sample_base(&self) -> RecogResult<&SampleBase> {
        if let Some(samples) = self.samples.get() {
            return Ok(samples);
        }
        let loader = self
            .sample_loader
            .as_ref()
            .ok_or(RecogError::MissingSampleBase)?;
        self.samples.get_or_try_init(|| {
            let samples = loader()?;
            info!(samples = samples.len(), "loaded sample base");
            Ok(samples)
        })
    }

    /// The dictionary, loading it if needed. `None` when none was
    /// configured.
    pub fn dictionary(&self) -> RecogResult<Option<&Dictionary>> {
        if let Some(dictionary) = self.dictionary.get() {
            return Ok(Some(dictionary));
        }
        let Some(loader) = self.dictionary_loader.as_ref() else {
            return Ok(None);
        };
        self.dictionary
            .get_or_try_init(|| {
                let dictionary = loader()?;
                info!(words = dictionary.len(), "loaded dictionary");
                Ok(dictionary)
            })
            .map(Some)
    }

    /// Normalize a raster into a cropped binary grid.
    pub fn normalize(&self, raster: &Raster) -> RecogResult<PixelGrid> {
        normalize(raster, &self.options.threshold).map_err(|e| match e {
            ColorError::EmptyImage => RecogError::EmptyImage,
            other => other.into(),
        })
    }

    /// Normalize and segment a raster into classified, unlabeled glyphs.
    pub fn segment(&self, raster: &Raster) -> RecogResult<Word> {
        self.segment_grid(&self.normalize(raster)?)
    }

    /// Segment an already normalized grid.
    pub fn segment_grid(&self, grid: &PixelGrid) -> RecogResult<Word> {
        Ok(Word::new(self.segmenter.segment(grid)?))
    }

    /// Identify a single glyph against the sample base.
    pub fn identify(&self, glyph: &Glyph) -> RecogResult<Outcome> {
        Ok(Identifier::new(self.sample_base()?).identify(glyph))
    }

    /// Recognize a word image.
    pub fn recognize(&self, raster: &Raster) -> RecogResult<Recognition> {
        self.recognize_grid(&self.normalize(raster)?)
    }

    /// Recognize an already normalized word grid.
    pub fn recognize_grid(&self, grid: &PixelGrid) -> RecogResult<Recognition> {
        let mut word = self.segment_grid(grid)?;
        let identified = Identifier::new(self.sample_base()?).identify_word(&mut word);
        let raw = word.text(self.options.placeholder);

        let corrected = if self.options.correct_words {
            self.dictionary()?.map(|d| d.correct(&raw))
        } else {
            None
        };
        debug!(
            glyphs = word.len(),
            identified,
            raw = %raw,
            corrected = ?corrected,
            "recognized word"
        );
        Ok(Recognition {
            raw,
            corrected,
            word,
        })
    }

    /// Add `glyph` to the sample base under `label`.
    ///
    /// The glyph is reclassified with this recognizer's classifier, so it
    /// is gated like every glyph this recognizer segments.
    pub fn learn(&mut self, glyph: Glyph, label: char) -> RecogResult<()> {
        self.sample_base()?;
        let sample = Glyph::new(glyph.grid().clone(), glyph.origin(), self.classifier());
        let samples = self
            .samples
            .get_mut()
            .ok_or(RecogError::MissingSampleBase)?;
        samples.add(sample.with_label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureClass;
    use scrawl_test::synth;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn samples(recognizer: &Recognizer) -> SampleBase {
        let cls = recognizer.classifier();
        let mut base = SampleBase::new();
        base.add(Glyph::from_grid(synth::ring(12, 12, 2).unwrap(), cls).with_label('o'))
            .unwrap();
        base.add(Glyph::from_grid(synth::cup(12, 16, 2).unwrap(), cls).with_label('u'))
            .unwrap();
        base
    }

    fn word_ou() -> Raster {
        let grid = synth::hstack(
            &[synth::ring(12, 12, 2).unwrap(), synth::cup(12, 16, 2).unwrap()],
            3,
        )
        .unwrap();
        synth::raster_from_grid(&grid, 1, 4).unwrap()
    }

    #[test]
    fn test_recognizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recognizer>();
    }

    #[test]
    fn test_options_reach_segmenter_and_classifier() {
        let options = RecognizerOptions::default()
            .with_segment(SegmentOptions::default().with_oversize_factor(2.5))
            .with_classifier(ClassifierOptions::default().with_detect_lines(true));
        let recognizer = Recognizer::new(options);
        assert_eq!(recognizer.segmenter().options().oversize_factor, 2.5);
        assert!(recognizer.classifier().options().detect_lines);
    }

    #[test]
    fn test_recognize_word() {
        let recognizer = Recognizer::new(RecognizerOptions::default());
        let base = samples(&recognizer);
        let recognizer = recognizer.with_sample_base(base);

        let result = recognizer.recognize(&word_ou()).unwrap();
        assert_eq!(result.raw, "ou");
        assert_eq!(result.corrected, None);
        assert_eq!(result.text(), "ou");
        assert_eq!(result.word.len(), 2);
    }

    #[test]
    fn test_recognize_with_dictionary() {
        let recognizer = Recognizer::new(RecognizerOptions::default());
        let base = samples(&recognizer);
        let recognizer = recognizer
            .with_sample_base(base)
            .with_dictionary(Dictionary::from_words(["ox", "ou"]));
        let result = recognizer.recognize(&word_ou()).unwrap();
        assert_eq!(result.corrected.as_deref(), Some("ou"));

        let no_correction = Recognizer::new(RecognizerOptions::default().with_correct_words(false))
            .with_sample_base(samples(&recognizer))
            .with_dictionary(Dictionary::from_words(["ou"]));
        assert_eq!(no_correction.recognize(&word_ou()).unwrap().corrected, None);
    }

    #[test]
    fn test_empty_sample_base_gives_placeholders() {
        let recognizer = Recognizer::new(RecognizerOptions::default().with_placeholder('_'))
            .with_sample_base(SampleBase::new());
        let result = recognizer.recognize(&word_ou()).unwrap();
        assert_eq!(result.raw, "__");
        assert!(result.word.iter().all(|g| g.label().is_none()));
    }

    #[test]
    fn test_missing_sample_base() {
        let recognizer = Recognizer::new(RecognizerOptions::default());
        assert!(matches!(
            recognizer.sample_base(),
            Err(RecogError::MissingSampleBase)
        ));
        assert!(recognizer.dictionary().unwrap().is_none());
    }

    #[test]
    fn test_blank_raster_is_empty_image() {
        let recognizer =
            Recognizer::new(RecognizerOptions::default()).with_sample_base(SampleBase::new());
        let blank = Raster::new(20, 10).unwrap();
        assert!(matches!(
            recognizer.recognize(&blank),
            Err(RecogError::EmptyImage)
        ));
    }

    #[test]
    fn test_loader_runs_once_across_threads() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let recognizer = Recognizer::new(RecognizerOptions::default()).with_sample_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(SampleBase::new())
        });

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    assert!(recognizer.sample_base().unwrap().is_empty());
                });
            }
        });
        recognizer.sample_base().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let recognizer = Recognizer::new(RecognizerOptions::default()).with_dictionary_loader(
            move || {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(RecogError::Load("not yet".to_string()))
                } else {
                    Ok(Dictionary::from_words(["retry"]))
                }
            },
        );

        assert!(matches!(recognizer.dictionary(), Err(RecogError::Load(_))));
        assert_eq!(recognizer.dictionary().unwrap().map(Dictionary::len), Some(1));
        assert_eq!(recognizer.dictionary().unwrap().map(Dictionary::len), Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_learn_adds_sample() {
        let mut recognizer =
            Recognizer::new(RecognizerOptions::default()).with_sample_base(SampleBase::new());
        let glyph = Glyph::from_grid(synth::ring(12, 12, 2).unwrap(), recognizer.classifier());
        recognizer.learn(glyph.clone(), 'o').unwrap();
        assert_eq!(recognizer.sample_base().unwrap().len(), 1);
        assert_eq!(recognizer.identify(&glyph).unwrap().label(), Some('o'));
    }

    #[test]
    fn test_learn_reclassifies_foreign_glyph() {
        let mut recognizer =
            Recognizer::new(RecognizerOptions::default()).with_sample_base(SampleBase::new());
        let bar = synth::block(2, 12).unwrap();
        let lines = Classifier::new(ClassifierOptions::default().with_detect_lines(true));
        let foreign = Glyph::from_grid(bar.clone(), &lines);
        assert_eq!(foreign.feature_class(), FeatureClass::Line);

        recognizer.learn(foreign, 'l').unwrap();
        let stored = &recognizer.sample_base().unwrap().samples_for('l')[0];
        assert_eq!(stored.feature_class(), FeatureClass::Default);

        let unknown = Glyph::from_grid(bar, recognizer.classifier());
        assert_eq!(recognizer.identify(&unknown).unwrap().label(), Some('l'));
    }
}
