//! Glyph feature classification
//!
//! Classification is a pure function of a glyph's pixel grid, producing a
//! [`RatioClass`] and a [`FeatureClass`]. The feature class comes from an
//! ordered list of [`FeatureRule`]s; the first rule that matches wins and
//! a glyph no rule matches is [`FeatureClass::Default`].
//!
//! Default order:
//!
//! 1. disconnect
//! 2. intersect
//! 3. open-right
//! 4. open-top
//! 5. open-bottom
//! 6. enclosed (round, up or down)
//! 7. line, only with [`ClassifierOptions::with_detect_lines`]
//!
//! # Example
//!
//! ```
//! use scrawl_recog::classify::Classifier;
//! use scrawl_recog::{FeatureClass, RatioClass};
//! use scrawl_recog::scrawl_core::PixelGrid;
//!
//! let dotted = PixelGrid::from_ascii(&["##", "..", "##", "##"]).unwrap();
//! let (ratio, feature) = Classifier::default().classify(&dotted);
//! assert_eq!(ratio, RatioClass::Tall);
//! assert_eq!(feature, FeatureClass::Disconnect);
//! ```

pub mod rules;
pub mod walk;

pub use rules::{
    Enclosure, find_enclosure, has_open_bottom, has_open_top, is_disconnect, is_intersect,
    is_line, is_open_right, points_down, points_up,
};

use crate::types::{FeatureClass, RatioClass};
use scrawl_core::PixelGrid;
use tracing::debug;

/// Classifier configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Append the single-run "line" rule after the enclosed rule
    pub detect_lines: bool,
}

impl ClassifierOptions {
    /// Enable or disable the line rule.
    pub fn with_detect_lines(mut self, detect_lines: bool) -> Self {
        self.detect_lines = detect_lines;
        self
    }
}

/// What the rules get to look at
#[derive(Debug)]
pub struct GlyphProfile<'a> {
    /// The cropped glyph
    pub grid: &'a PixelGrid,
    /// Ink count of each row, top to bottom
    pub row_counts: Vec<u32>,
}

impl<'a> GlyphProfile<'a> {
    /// Measure a grid.
    pub fn new(grid: &'a PixelGrid) -> Self {
        Self {
            grid,
            row_counts: grid.row_ink_counts(),
        }
    }
}

/// A named step of the classification cascade
#[derive(Clone, Copy)]
pub struct FeatureRule {
    /// Rule name for logs and inspection
    pub name: &'static str,
    /// Returns the class when the rule matches
    pub evaluate: fn(&GlyphProfile<'_>) -> Option<FeatureClass>,
}

impl std::fmt::Debug for FeatureRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureRule").field("name", &self.name).finish()
    }
}

fn disconnect(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    is_disconnect(&p.row_counts).then_some(FeatureClass::Disconnect)
}

fn intersect(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    is_intersect(&p.row_counts).then_some(FeatureClass::Intersect)
}

fn open_right(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    is_open_right(p.grid).then_some(FeatureClass::OpenRight)
}

fn open_top(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    has_open_top(p.grid).then_some(FeatureClass::OpenTop)
}

fn open_bottom(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    has_open_bottom(p.grid).then_some(FeatureClass::OpenBottom)
}

fn enclosed(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    find_enclosure(p.grid).map(|e| e.class)
}

fn line(p: &GlyphProfile<'_>) -> Option<FeatureClass> {
    is_line(p.grid).then_some(FeatureClass::Line)
}

const BASE_RULES: [FeatureRule; 6] = [
    FeatureRule {
        name: "disconnect",
        evaluate: disconnect,
    },
    FeatureRule {
        name: "intersect",
        evaluate: intersect,
    },
    FeatureRule {
        name: "open-right",
        evaluate: open_right,
    },
    FeatureRule {
        name: "open-top",
        evaluate: open_top,
    },
    FeatureRule {
        name: "open-bottom",
        evaluate: open_bottom,
    },
    FeatureRule {
        name: "enclosed",
        evaluate: enclosed,
    },
];

const LINE_RULE: FeatureRule = FeatureRule {
    name: "line",
    evaluate: line,
};

/// Ordered feature-rule cascade
#[derive(Debug, Clone)]
pub struct Classifier {
    options: ClassifierOptions,
    rules: Vec<FeatureRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierOptions::default())
    }
}

impl Classifier {
    /// Build the cascade for `options`.
    pub fn new(options: ClassifierOptions) -> Self {
        let mut rules = BASE_RULES.to_vec();
        if options.detect_lines {
            rules.push(LINE_RULE);
        }
        Self { options, rules }
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[FeatureRule] {
        &self.rules
    }

    /// Classify a cropped glyph grid.
    pub fn classify(&self, grid: &PixelGrid) -> (RatioClass, FeatureClass) {
        (RatioClass::of(grid), self.feature_class(grid))
    }

    /// Run the cascade and return the first matching class.
    pub fn feature_class(&self, grid: &PixelGrid) -> FeatureClass {
        let profile = GlyphProfile::new(grid);
        for rule in &self.rules {
            if let Some(class) = (rule.evaluate)(&profile) {
                debug!(
                    rule = rule.name,
                    width = grid.width(),
                    height = grid.height(),
                    "feature rule matched"
                );
                return class;
            }
        }
        FeatureClass::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_test::synth;

    fn letter_b() -> PixelGrid {
        let mut rows = vec!["##........"; 10];
        rows.extend([
            "##########",
            "##########",
            "##......##",
            "##......##",
            "##......##",
            "##......##",
            "##......##",
            "##......##",
            "##########",
            "##########",
        ]);
        PixelGrid::from_ascii(&rows).unwrap()
    }

    fn letter_q() -> PixelGrid {
        let mut rows = vec![
            "##########",
            "##########",
            "##......##",
            "##......##",
            "##......##",
            "##......##",
            "##......##",
            "##......##",
            "##########",
            "##########",
        ];
        rows.extend(vec!["........##"; 10]);
        PixelGrid::from_ascii(&rows).unwrap()
    }

    fn letter_t() -> PixelGrid {
        let mut rows = vec!["...##...."; 30];
        rows[14] = "#########";
        rows[15] = "#########";
        PixelGrid::from_ascii(&rows).unwrap()
    }

    fn letter_c() -> PixelGrid {
        let mut rows = vec!["##........"; 12];
        for r in [0, 1, 10, 11] {
            rows[r] = "##########";
        }
        PixelGrid::from_ascii(&rows).unwrap()
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = Classifier::default().rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "disconnect",
                "intersect",
                "open-right",
                "open-top",
                "open-bottom",
                "enclosed"
            ]
        );
        let with_lines = Classifier::new(ClassifierOptions::default().with_detect_lines(true));
        assert_eq!(with_lines.rules().last().map(|r| r.name), Some("line"));
    }

    #[test]
    fn test_classify_letter_shapes() {
        let cls = Classifier::default();
        let dot_i = PixelGrid::from_ascii(&["##", "..", "##", "##", "##"]).unwrap();
        assert_eq!(cls.feature_class(&dot_i), FeatureClass::Disconnect);
        assert_eq!(cls.feature_class(&letter_t()), FeatureClass::Intersect);
        assert_eq!(cls.feature_class(&letter_c()), FeatureClass::OpenRight);
        assert_eq!(
            cls.feature_class(&synth::cup(12, 16, 2).unwrap()),
            FeatureClass::OpenTop
        );
        assert_eq!(
            cls.feature_class(&synth::cup(12, 16, 2).unwrap().flip_top_bottom()),
            FeatureClass::OpenBottom
        );
        assert_eq!(
            cls.feature_class(&synth::ring(12, 12, 2).unwrap()),
            FeatureClass::EnclosedRound
        );
        assert_eq!(cls.feature_class(&letter_b()), FeatureClass::EnclosedUp);
        assert_eq!(cls.feature_class(&letter_q()), FeatureClass::EnclosedDown);
        assert_eq!(
            cls.feature_class(&synth::block(8, 8).unwrap()),
            FeatureClass::Default
        );
    }

    #[test]
    fn test_classify_thin_slanted_bowls() {
        let cls = Classifier::default();
        let v = PixelGrid::from_ascii(&[
            "#.......#", //
            ".#.....#.",
            "..#...#..",
            "...#.#...",
            "....#....",
        ])
        .unwrap();
        assert_eq!(cls.feature_class(&v), FeatureClass::OpenTop);
        assert_eq!(cls.feature_class(&v.flip_top_bottom()), FeatureClass::OpenBottom);
    }

    #[test]
    fn test_line_rule_opt_in() {
        let bar = synth::block(2, 12).unwrap();
        assert_eq!(Classifier::default().feature_class(&bar), FeatureClass::Default);
        let cls = Classifier::new(ClassifierOptions::default().with_detect_lines(true));
        assert_eq!(cls.feature_class(&bar), FeatureClass::Line);
    }

    #[test]
    fn test_classify_is_pure() {
        let cls = Classifier::default();
        let q = letter_q();
        let before = q.clone();
        assert_eq!(cls.classify(&q), cls.classify(&q));
        assert_eq!(q, before);
    }

    #[test]
    fn test_mirror_toggles_open_classes() {
        let cls = Classifier::default();
        let u = synth::cup(14, 20, 3).unwrap();
        let n = u.flip_top_bottom();
        assert_eq!(cls.feature_class(&u), FeatureClass::OpenTop);
        assert_eq!(cls.feature_class(&n), FeatureClass::OpenBottom);
        assert_eq!(cls.feature_class(&n.flip_top_bottom()), FeatureClass::OpenTop);
    }
}
