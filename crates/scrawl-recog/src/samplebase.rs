//! Labeled reference samples
//!
//! The sample base holds classified, labeled glyphs grouped by label. It is
//! built once from a corpus and only ever grows afterwards.

use crate::classify::Classifier;
use crate::error::{RecogError, RecogResult};
use crate::types::{FeatureClass, Glyph};
use scrawl_color::{ThresholdOptions, normalize};
use scrawl_core::Raster;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Labeled glyphs, grouped by label in ascending order
#[derive(Debug, Clone, Default)]
pub struct SampleBase {
    samples: BTreeMap<char, Vec<Glyph>>,
}

impl SampleBase {
    /// An empty sample base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize, classify and store every `(label, raster)` pair.
    ///
    /// Rasters without ink are skipped with a warning.
    pub fn from_corpus<I>(
        corpus: I,
        threshold: &ThresholdOptions,
        classifier: &Classifier,
    ) -> RecogResult<Self>
    where
        I: IntoIterator<Item = (char, Raster)>,
    {
        let mut base = Self::new();
        let mut skipped = 0usize;
        for (label, raster) in corpus {
            match normalize(&raster, threshold) {
                Ok(grid) => base.add(Glyph::from_grid(grid, classifier).with_label(label))?,
                Err(scrawl_color::ColorError::EmptyImage) => {
                    warn!(label = %label, "skipping sample without ink");
                    skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
        info!(
            samples = base.len(),
            labels = base.samples.len(),
            skipped,
            "built sample base"
        );
        Ok(base)
    }

    /// Store a labeled glyph.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::UnlabeledSample`] when `glyph` has no label.
    pub fn add(&mut self, glyph: Glyph) -> RecogResult<()> {
        let label = glyph.label().ok_or(RecogError::UnlabeledSample)?;
        self.samples.entry(label).or_default().push(glyph);
        Ok(())
    }

    /// All samples for `label`.
    pub fn samples_for(&self, label: char) -> &[Glyph] {
        self.samples.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Samples for `label` of one feature class.
    pub fn samples_for_class(
        &self,
        label: char,
        class: FeatureClass,
    ) -> impl Iterator<Item = &Glyph> + '_ {
        self.samples_for(label)
            .iter()
            .filter(move |g| g.feature_class() == class)
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.values().all(Vec::is_empty)
    }

    /// Labels with at least one sample, ascending.
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.samples.keys().copied()
    }

    /// Every sample, grouped by ascending label.
    pub fn iter(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.samples.values().flatten()
    }

    /// Per feature class sample counts of `label`.
    pub fn feature_histogram(&self, label: char) -> BTreeMap<FeatureClass, usize> {
        let mut histogram = BTreeMap::new();
        for glyph in self.samples_for(label) {
            *histogram.entry(glyph.feature_class()).or_insert(0) += 1;
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_test::synth;

    #[test]
    fn test_add_requires_label() {
        let cls = Classifier::default();
        let mut base = SampleBase::new();
        let glyph = Glyph::from_grid(synth::ring(8, 8, 2).unwrap(), &cls);
        assert!(matches!(
            base.add(glyph.clone()),
            Err(RecogError::UnlabeledSample)
        ));
        base.add(glyph.with_label('o')).unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(base.samples_for('o').len(), 1);
        assert!(base.samples_for('x').is_empty());
    }

    #[test]
    fn test_from_corpus_skips_blank() {
        let cls = Classifier::default();
        let ring = synth::raster_from_grid(&synth::ring(12, 12, 2).unwrap(), 2, 3).unwrap();
        let cup = synth::raster_from_grid(&synth::cup(12, 16, 2).unwrap(), 2, 3).unwrap();
        let blank = Raster::new(10, 10).unwrap();
        let corpus = vec![('u', cup), ('o', ring), ('x', blank)];

        let base = SampleBase::from_corpus(corpus, &ThresholdOptions::default(), &cls).unwrap();
        assert_eq!(base.len(), 2);
        assert_eq!(base.labels().collect::<Vec<_>>(), vec!['o', 'u']);
        assert_eq!(
            base.samples_for('o')[0].feature_class(),
            FeatureClass::EnclosedRound
        );
        assert_eq!(base.samples_for('u')[0].feature_class(), FeatureClass::OpenTop);
        assert_eq!(base.samples_for('u')[0].width(), 24);
    }

    #[test]
    fn test_samples_for_class_and_histogram() {
        let cls = Classifier::default();
        let mut base = SampleBase::new();
        for grid in [
            synth::ring(8, 8, 2).unwrap(),
            synth::ring(10, 8, 2).unwrap(),
            synth::block(6, 6).unwrap(),
        ] {
            base.add(Glyph::from_grid(grid, &cls).with_label('o')).unwrap();
        }

        assert_eq!(base.samples_for_class('o', FeatureClass::EnclosedRound).count(), 2);
        assert_eq!(base.samples_for_class('o', FeatureClass::OpenTop).count(), 0);
        let histogram = base.feature_histogram('o');
        assert_eq!(histogram.get(&FeatureClass::EnclosedRound), Some(&2));
        assert_eq!(histogram.get(&FeatureClass::Default), Some(&1));
        assert_eq!(base.iter().count(), 3);
    }

    #[test]
    fn test_add_appends() {
        let cls = Classifier::default();
        let mut base = SampleBase::new();
        let first = Glyph::from_grid(synth::block(3, 5).unwrap(), &cls).with_label('l');
        let second = Glyph::from_grid(synth::block(2, 6).unwrap(), &cls).with_label('l');
        base.add(first.clone()).unwrap();
        base.add(second.clone()).unwrap();
        assert_eq!(base.samples_for('l'), &[first, second]);
    }
}
