//! Type definitions for handwritten glyph recognition
//!
//! A [`Glyph`] is one segmented character candidate: its cropped pixel
//! grid, where it sat in the word, and the two classification attributes
//! used to gate identification. A [`Word`] is the ordered run of glyphs cut
//! from one image.

use crate::classify::Classifier;
use scrawl_core::{Box as GridBox, PixelGrid};
use std::fmt;

/// Ratio below which a glyph is [`RatioClass::Tall`]
pub const TALL_BELOW: f32 = 0.80;

/// Ratio above which a glyph is [`RatioClass::Wide`]
pub const WIDE_ABOVE: f32 = 1.30;

/// Coarse aspect-ratio bucket of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatioClass {
    /// width/height below 0.80
    Tall,
    /// width/height within 0.80..=1.30
    Even,
    /// width/height above 1.30
    Wide,
}

impl RatioClass {
    /// Bucket a width-to-height ratio.
    ///
    /// Both boundaries belong to [`RatioClass::Even`].
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio < TALL_BELOW {
            RatioClass::Tall
        } else if ratio > WIDE_ABOVE {
            RatioClass::Wide
        } else {
            RatioClass::Even
        }
    }

    /// Bucket a grid by its own aspect ratio.
    pub fn of(grid: &PixelGrid) -> Self {
        Self::from_ratio(grid.aspect_ratio())
    }
}

/// Structural shape category of a glyph
///
/// Assigned by the first matching rule of the classifier cascade. Samples
/// are only ever compared with unknowns of the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FeatureClass {
    /// No rule matched
    #[default]
    Default,
    /// Some row holds no ink (i, j, broken strokes)
    Disconnect,
    /// A crossbar much wider than the stem around it (t, f)
    Intersect,
    /// Ink stays left of the middle at three sample rows (c)
    OpenRight,
    /// A bowl opening upward (u, v, y)
    OpenTop,
    /// A bowl opening downward (n, h, m)
    OpenBottom,
    /// A closed loop without stems (o, a, e)
    EnclosedRound,
    /// A closed loop below an ascender (b, d)
    EnclosedUp,
    /// A closed loop above a descender (q, g)
    EnclosedDown,
    /// Every row is a single ink run (l)
    Line,
}

impl FeatureClass {
    /// Every class, in cascade order with `Default` first.
    pub const ALL: [FeatureClass; 10] = [
        FeatureClass::Default,
        FeatureClass::Disconnect,
        FeatureClass::Intersect,
        FeatureClass::OpenRight,
        FeatureClass::OpenTop,
        FeatureClass::OpenBottom,
        FeatureClass::EnclosedRound,
        FeatureClass::EnclosedUp,
        FeatureClass::EnclosedDown,
        FeatureClass::Line,
    ];

    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            FeatureClass::Default => "default",
            FeatureClass::Disconnect => "disconnect",
            FeatureClass::Intersect => "intersect",
            FeatureClass::OpenRight => "open-right",
            FeatureClass::OpenTop => "open-top",
            FeatureClass::OpenBottom => "open-bottom",
            FeatureClass::EnclosedRound => "enclosed-round",
            FeatureClass::EnclosedUp => "enclosed-up",
            FeatureClass::EnclosedDown => "enclosed-down",
            FeatureClass::Line => "line",
        }
    }

    /// True for the three enclosed-space subclasses.
    pub fn is_enclosed(&self) -> bool {
        matches!(
            self,
            FeatureClass::EnclosedRound | FeatureClass::EnclosedUp | FeatureClass::EnclosedDown
        )
    }
}

impl fmt::Display for FeatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One segmented character candidate
///
/// Classification happens once, at construction; the grid is never
/// modified afterwards, so the classes always describe the pixels held.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    grid: PixelGrid,
    origin: GridBox,
    ratio_class: RatioClass,
    feature_class: FeatureClass,
    label: Option<char>,
}

impl Glyph {
    /// Classify `grid` and wrap it as an unlabeled glyph.
    ///
    /// `origin` is the box the grid occupied in the image it was cut from.
    pub fn new(grid: PixelGrid, origin: GridBox, classifier: &Classifier) -> Self {
        let (ratio_class, feature_class) = classifier.classify(&grid);
        Self {
            grid,
            origin,
            ratio_class,
            feature_class,
            label: None,
        }
    }

    /// Classify a standalone grid whose origin is its own extent.
    pub fn from_grid(grid: PixelGrid, classifier: &Classifier) -> Self {
        let origin = GridBox::new_unchecked(0, 0, grid.width() as i32, grid.height() as i32);
        Self::new(grid, origin, classifier)
    }

    /// Attach a label.
    pub fn with_label(mut self, label: char) -> Self {
        self.label = Some(label);
        self
    }

    /// Cropped pixel grid
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Placement in the source image
    pub fn origin(&self) -> GridBox {
        self.origin
    }

    /// Grid width
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Grid height
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Aspect-ratio bucket
    pub fn ratio_class(&self) -> RatioClass {
        self.ratio_class
    }

    /// Structural shape category
    pub fn feature_class(&self) -> FeatureClass {
        self.feature_class
    }

    /// Assigned label, if identified or supplied
    pub fn label(&self) -> Option<char> {
        self.label
    }

    /// Numeric character code of the label
    pub fn code(&self) -> Option<u32> {
        self.label.map(u32::from)
    }

    pub(crate) fn set_label(&mut self, label: Option<char>) {
        self.label = label;
    }

    /// Coarse area proxy used for outlier detection.
    pub fn size_value(&self, divisor: f32) -> f32 {
        (self.width() * self.height()) as f32 / divisor
    }
}

/// Ordered glyphs of one word image, left to right
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Word {
    glyphs: Vec<Glyph>,
}

impl Word {
    /// Wrap glyphs already in reading order.
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True when the word holds no glyphs
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyphs in reading order
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Mutable glyphs in reading order
    pub fn glyphs_mut(&mut self) -> &mut [Glyph] {
        &mut self.glyphs
    }

    /// Iterate the glyphs
    pub fn iter(&self) -> std::slice::Iter<'_, Glyph> {
        self.glyphs.iter()
    }

    /// Take the glyphs out
    pub fn into_glyphs(self) -> Vec<Glyph> {
        self.glyphs
    }

    /// Render the labels, using `placeholder` for unlabeled glyphs.
    pub fn text(&self, placeholder: char) -> String {
        self.glyphs
            .iter()
            .map(|g| g.label().unwrap_or(placeholder))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Word {
    type Item = &'a Glyph;
    type IntoIter = std::slice::Iter<'a, Glyph>;

    fn into_iter(self) -> Self::IntoIter {
        self.glyphs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_class_boundaries() {
        assert_eq!(RatioClass::from_ratio(0.79), RatioClass::Tall);
        assert_eq!(RatioClass::from_ratio(0.80), RatioClass::Even);
        assert_eq!(RatioClass::from_ratio(0.81), RatioClass::Even);
        assert_eq!(RatioClass::from_ratio(1.29), RatioClass::Even);
        assert_eq!(RatioClass::from_ratio(1.30), RatioClass::Even);
        assert_eq!(RatioClass::from_ratio(1.31), RatioClass::Wide);
    }

    #[test]
    fn test_ratio_class_of_grid() {
        let tall = PixelGrid::new(4, 10).unwrap();
        let wide = PixelGrid::new(10, 4).unwrap();
        let even = PixelGrid::new(4, 5).unwrap();
        assert_eq!(RatioClass::of(&tall), RatioClass::Tall);
        assert_eq!(RatioClass::of(&wide), RatioClass::Wide);
        assert_eq!(RatioClass::of(&even), RatioClass::Even);
    }

    #[test]
    fn test_feature_class_names_unique() {
        let mut names: Vec<_> = FeatureClass::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FeatureClass::ALL.len());
        assert_eq!(FeatureClass::OpenTop.to_string(), "open-top");
        let enclosed = FeatureClass::ALL.iter().filter(|c| c.is_enclosed()).count();
        assert_eq!(enclosed, 3);
    }

    #[test]
    fn test_glyph_label_and_code() {
        let grid = PixelGrid::from_ascii(&["##", "##"]).unwrap();
        let glyph = Glyph::from_grid(grid, &Classifier::default());
        assert_eq!(glyph.label(), None);
        assert_eq!(glyph.code(), None);
        let glyph = glyph.with_label('a');
        assert_eq!(glyph.code(), Some(97));
    }

    #[test]
    fn test_size_value() {
        let grid = PixelGrid::new(30, 50).unwrap();
        let glyph = Glyph::from_grid(grid, &Classifier::default());
        assert!((glyph.size_value(1500.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_word_text_placeholder() {
        let cls = Classifier::default();
        let g = PixelGrid::from_ascii(&["#"]).unwrap();
        let word = Word::new(vec![
            Glyph::from_grid(g.clone(), &cls).with_label('h'),
            Glyph::from_grid(g.clone(), &cls),
            Glyph::from_grid(g, &cls).with_label('i'),
        ]);
        assert_eq!(word.len(), 3);
        assert_eq!(word.text('?'), "h?i");
        assert_eq!(word.text('_'), "h_i");
        assert_eq!(word.into_glyphs().len(), 3);
    }
}
