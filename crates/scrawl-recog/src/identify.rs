//! Sample-based glyph identification
//!
//! An unknown glyph is compared only with samples that share both its
//! feature class and its ratio class. Every gated sample is scored by
//! aspect-ratio agreement and by how much of the sample's ink the unknown
//! covers; per label the best and mean scores are kept, and three votes
//! decide the label:
//!
//! - the label with the highest best score
//! - the label with the highest mean score
//! - the label with the highest `(best + mean) / 2`
//!
//! The best-score label wins if it agrees with either other vote,
//! otherwise the combined vote wins. A glyph no sample could be compared
//! with is [`Outcome::Unidentified`].

use crate::samplebase::SampleBase;
use crate::types::{Glyph, Word};
use scrawl_core::PixelGrid;
use tracing::debug;

/// Aspect-ratio agreement in `0..=1`.
pub fn dimensional_similarity(sample: &PixelGrid, unknown: &PixelGrid) -> f32 {
    let a = sample.aspect_ratio();
    let b = unknown.aspect_ratio();
    a.min(b) / a.max(b)
}

/// Share of the sample's ink the unknown also inks, over the overlap of
/// the two grids anchored at their top-left corners.
///
/// Zero when the overlap holds no sample ink.
pub fn pixel_similarity(sample: &PixelGrid, unknown: &PixelGrid) -> f32 {
    let w = sample.width().min(unknown.width());
    let h = sample.height().min(unknown.height());
    let mut sample_ink = 0u32;
    let mut matching = 0u32;
    for y in 0..h {
        for x in 0..w {
            if sample.is_ink(x, y) {
                sample_ink += 1;
                if unknown.is_ink(x, y) {
                    matching += 1;
                }
            }
        }
    }
    if sample_ink == 0 {
        0.0
    } else {
        matching as f32 / sample_ink as f32
    }
}

/// Similarity score in `0..=100`.
pub fn similarity(sample: &PixelGrid, unknown: &PixelGrid) -> f32 {
    (dimensional_similarity(sample, unknown) * 100.0 + pixel_similarity(sample, unknown) * 100.0)
        / 2.0
}

/// Scores of one label against an unknown glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelScore {
    pub label: char,
    /// Number of gated samples compared
    pub samples: usize,
    /// Highest sample score
    pub best: f32,
    /// Mean sample score
    pub mean: f32,
}

impl LabelScore {
    /// `(best + mean) / 2`
    pub fn combined(&self) -> f32 {
        (self.best + self.mean) / 2.0
    }
}

/// Result of identifying one glyph
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A label was chosen; `scores` holds every label that had gated
    /// samples, ascending by label
    Identified { label: char, scores: Vec<LabelScore> },
    /// No sample shared the glyph's classes
    Unidentified,
}

impl Outcome {
    pub fn label(&self) -> Option<char> {
        match self {
            Outcome::Identified { label, .. } => Some(*label),
            Outcome::Unidentified => None,
        }
    }
}

/// Label argmax with first-wins ties
#[derive(Default)]
struct Leader {
    top: Option<(char, f32)>,
}

impl Leader {
    fn offer(&mut self, label: char, value: f32) {
        if self.top.is_none_or(|(_, best)| value > best) {
            self.top = Some((label, value));
        }
    }

    fn label(&self) -> Option<char> {
        self.top.map(|(label, _)| label)
    }
}

/// Identifies glyphs against a sample base
#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    samples: &'a SampleBase,
}

impl<'a> Identifier<'a> {
    pub fn new(samples: &'a SampleBase) -> Self {
        Self { samples }
    }

    /// Score every label with gated samples, ascending by label.
    pub fn scores(&self, unknown: &Glyph) -> Vec<LabelScore> {
        let mut scores = Vec::new();
        for label in self.samples.labels() {
            let mut count = 0usize;
            let mut sum = 0.0f32;
            let mut best = 0.0f32;
            for sample in self
                .samples
                .samples_for_class(label, unknown.feature_class())
                .filter(|s| s.ratio_class() == unknown.ratio_class())
            {
                let score = similarity(sample.grid(), unknown.grid());
                best = best.max(score);
                sum += score;
                count += 1;
            }
            if count > 0 {
                scores.push(LabelScore {
                    label,
                    samples: count,
                    best,
                    mean: sum / count as f32,
                });
            }
        }
        scores
    }

    /// Identify one glyph.
    pub fn identify(&self, unknown: &Glyph) -> Outcome {
        let scores = self.scores(unknown);

        let mut best = Leader::default();
        let mut mean = Leader::default();
        let mut combined = Leader::default();
        for s in &scores {
            best.offer(s.label, s.best);
            mean.offer(s.label, s.mean);
            combined.offer(s.label, s.combined());
        }

        let (Some(b), Some(m), Some(c)) = (best.label(), mean.label(), combined.label()) else {
            debug!(
                feature = %unknown.feature_class(),
                ratio = ?unknown.ratio_class(),
                "no gated samples"
            );
            return Outcome::Unidentified;
        };
        let label = if b == m || b == c { b } else { c };
        debug!(best = %b, mean = %m, combined = %c, chosen = %label, "identified glyph");
        Outcome::Identified { label, scores }
    }

    /// Label every glyph of `word` in place, left to right.
    ///
    /// Unidentified glyphs are left unlabeled. Returns the number of
    /// glyphs that received a label.
    pub fn identify_word(&self, word: &mut Word) -> usize {
        let mut identified = 0;
        for glyph in word.glyphs_mut() {
            let label = self.identify(glyph).label();
            if label.is_some() {
                identified += 1;
            }
            glyph.set_label(label);
        }
        identified
    }
}
