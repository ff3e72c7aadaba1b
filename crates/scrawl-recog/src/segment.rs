//! Word segmentation
//!
//! Cuts a normalized word grid into glyphs:
//!
//! 1. [`Segmenter::column_segment`] takes every maximal run of inked
//!    columns as one glyph candidate.
//! 2. [`Segmenter::recover_oversized`] looks for candidates far larger than
//!    the word's average, which usually means two touching letters, and
//!    splits them with [`Segmenter::split_adjacent`].
//!
//! Splitting traces a background corridor from each corner of the glyph in
//! turn. The first corner that walls off a meaningful piece of ink wins;
//! when none does the glyph is cut down the middle.
//!
//! # Example
//!
//! ```
//! use scrawl_recog::scrawl_core::PixelGrid;
//! use scrawl_recog::segment::Segmenter;
//!
//! let grid = PixelGrid::from_ascii(&["##..#", "##..#"]).unwrap();
//! let glyphs = Segmenter::default().segment(&grid).unwrap();
//! assert_eq!(glyphs.len(), 2);
//! assert_eq!(glyphs[1].origin().x, 4);
//! ```

use crate::classify::Classifier;
use crate::error::{RecogError, RecogResult};
use crate::types::Glyph;
use scrawl_core::{Box as GridBox, PixelGrid};
use tracing::debug;

/// Default divisor of the glyph area in the size value
pub const DEFAULT_SIZE_DIVISOR: f32 = 1500.0;

/// Default multiple of the mean size above which a glyph is split
pub const DEFAULT_OVERSIZE_FACTOR: f32 = 1.75;

/// Default minimum share of the glyph area, in percent, a corner capture
/// must hold in ink
pub const DEFAULT_MIN_CAPTURE_PERCENT: f32 = 2.0;

/// Segmentation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    /// Divisor of width * height in [`Glyph::size_value`]
    pub size_divisor: f32,
    /// Glyphs larger than `mean * oversize_factor` are split
    pub oversize_factor: f32,
    /// Minimum ink share of a corner capture, in percent of the glyph area
    pub min_capture_percent: f32,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            size_divisor: DEFAULT_SIZE_DIVISOR,
            oversize_factor: DEFAULT_OVERSIZE_FACTOR,
            min_capture_percent: DEFAULT_MIN_CAPTURE_PERCENT,
        }
    }
}

impl SegmentOptions {
    pub fn with_size_divisor(mut self, size_divisor: f32) -> Self {
        self.size_divisor = size_divisor;
        self
    }

    pub fn with_oversize_factor(mut self, oversize_factor: f32) -> Self {
        self.oversize_factor = oversize_factor;
        self
    }

    pub fn with_min_capture_percent(mut self, min_capture_percent: f32) -> Self {
        self.min_capture_percent = min_capture_percent;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> RecogResult<()> {
        if self.size_divisor <= 0.0 {
            return Err(RecogError::InvalidParameter(format!(
                "size_divisor must be positive, got {}",
                self.size_divisor
            )));
        }
        if self.oversize_factor <= 0.0 {
            return Err(RecogError::InvalidParameter(format!(
                "oversize_factor must be positive, got {}",
                self.oversize_factor
            )));
        }
        if !(0.0..=100.0).contains(&self.min_capture_percent) {
            return Err(RecogError::InvalidParameter(format!(
                "min_capture_percent must be within 0..=100, got {}",
                self.min_capture_percent
            )));
        }
        Ok(())
    }
}

/// Corner a split corridor is traced from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Tracing order
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn mirrors(self) -> (bool, bool) {
        match self {
            Corner::TopLeft => (false, false),
            Corner::TopRight => (true, false),
            Corner::BottomLeft => (false, true),
            Corner::BottomRight => (true, true),
        }
    }

    /// Map a corner-relative cell to grid coordinates.
    fn cell(self, lx: u32, ly: u32, w: u32, h: u32) -> (u32, u32) {
        let (mx, my) = self.mirrors();
        (
            if mx { w - 1 - lx } else { lx },
            if my { h - 1 - ly } else { ly },
        )
    }

    /// Map a corner-anchored `lw` x `lh` rectangle to grid coordinates.
    fn rect(self, lw: u32, lh: u32, w: u32, h: u32) -> GridBox {
        let (mx, my) = self.mirrors();
        GridBox::new_unchecked(
            if mx { (w - lw) as i32 } else { 0 },
            if my { (h - lh) as i32 } else { 0 },
            lw as i32,
            lh as i32,
        )
    }
}

/// Column segmenter with oversize recovery
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmentOptions,
    classifier: Classifier,
}

impl Segmenter {
    /// Create a segmenter that classifies its glyphs with `classifier`.
    pub fn new(options: SegmentOptions, classifier: Classifier) -> Self {
        Self {
            options,
            classifier,
        }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Segment a word grid into glyphs, left to right.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::EmptyImage`] when the grid holds no ink.
    pub fn segment(&self, grid: &PixelGrid) -> RecogResult<Vec<Glyph>> {
        self.options.validate()?;
        let glyphs = self.column_segment(grid)?;
        self.recover_oversized(glyphs)
    }

    /// Cut the grid at every ink-free column.
    ///
    /// Each glyph is cropped to its own ink and remembers the box it
    /// occupied in `grid`.
    pub fn column_segment(&self, grid: &PixelGrid) -> RecogResult<Vec<Glyph>> {
        let w = grid.width();
        let inked: Vec<bool> = (0..w).map(|x| grid.column_has_ink(x)).collect();

        let mut glyphs = Vec::new();
        let mut x = 0;
        while x < w {
            if !inked[x as usize] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && inked[x as usize] {
                x += 1;
            }
            let run =
                GridBox::new_unchecked(start as i32, 0, (x - start) as i32, grid.height() as i32);
            let (piece, fg) = grid.clip_rectangle(&run)?.clip_to_foreground()?;
            glyphs.push(Glyph::new(piece, fg.translate(run.x, 0), &self.classifier));
        }

        if glyphs.is_empty() {
            return Err(RecogError::EmptyImage);
        }
        debug!(glyphs = glyphs.len(), "column segmentation");
        Ok(glyphs)
    }

    /// Split every glyph whose size value exceeds the word mean by the
    /// oversize factor. Split pieces take the place of their parent.
    pub fn recover_oversized(&self, glyphs: Vec<Glyph>) -> RecogResult<Vec<Glyph>> {
        if glyphs.is_empty() {
            return Ok(glyphs);
        }
        let divisor = self.options.size_divisor;
        let mean =
            glyphs.iter().map(|g| g.size_value(divisor)).sum::<f32>() / glyphs.len() as f32;
        let limit = mean * self.options.oversize_factor;

        let mut out = Vec::with_capacity(glyphs.len() + 1);
        for glyph in glyphs {
            let size = glyph.size_value(divisor);
            if size > limit {
                debug!(size, mean, x = glyph.origin().x, "splitting oversized glyph");
                out.extend(self.split_adjacent(&glyph)?);
            } else {
                out.push(glyph);
            }
        }
        Ok(out)
    }

    /// Split a glyph suspected of holding two touching characters.
    ///
    /// Always yields at least two glyphs, ordered by x origin, that
    /// together cover the input's ink. `glyph` itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] for a single-pixel glyph,
    /// and an empty-image error for a glyph without ink.
    pub fn split_adjacent(&self, glyph: &Glyph) -> RecogResult<Vec<Glyph>> {
        let (grid, fg) = glyph.grid().clip_to_foreground()?;
        let origin = fg.translate(glyph.origin().x, glyph.origin().y);

        for corner in Corner::ALL {
            let Some(rect) = self.corner_capture(&grid, corner) else {
                continue;
            };
            if let Some(pieces) = self.cut(&grid, origin, rect)? {
                debug!(?corner, ?rect, "split at corner");
                return Ok(pieces);
            }
        }
        debug!(width = grid.width(), "no corner split, bisecting");
        self.bisect_grid(&grid, origin)
    }

    /// Find the region a background corridor walls off at `corner`.
    ///
    /// Working in corner-relative coordinates, walk down each column from
    /// the corner's edge while it is background. From every background
    /// cell, backtrack along the row toward the corner's side; reaching it
    /// through background closes an L-shaped corridor around the cells
    /// nearer the corner. The capture must hold enough ink to be a letter.
    pub fn corner_capture(&self, grid: &PixelGrid, corner: Corner) -> Option<GridBox> {
        let w = grid.width();
        let h = grid.height();
        let area = (w * h) as f32;
        let ink = |lx: u32, ly: u32| {
            let (x, y) = corner.cell(lx, ly, w, h);
            grid.is_ink(x, y)
        };

        for lx in 0..w {
            for ly in 0..h {
                if ink(lx, ly) {
                    break;
                }
                if (0..lx).rev().any(|bx| ink(bx, ly)) {
                    continue;
                }
                let rect = corner.rect(lx, ly, w, h);
                let captured = grid.ink_count_in(&rect);
                let percent = captured as f32 / area * 100.0;
                if captured > 0 && percent >= self.options.min_capture_percent {
                    return Some(rect);
                }
            }
        }
        None
    }

    fn cut(
        &self,
        grid: &PixelGrid,
        origin: GridBox,
        rect: GridBox,
    ) -> RecogResult<Option<Vec<Glyph>>> {
        let (captured, captured_fg) = grid.clip_rectangle(&rect)?.clip_to_foreground()?;

        let mut rest = grid.to_mut();
        rest.clear_rect(&rect);
        let rest: PixelGrid = rest.into();
        let Some(rest_fg) = rest.foreground_box() else {
            return Ok(None);
        };
        let rest = rest.clip_rectangle(&rest_fg)?;

        let mut pieces = vec![
            Glyph::new(
                captured,
                captured_fg.translate(rect.x + origin.x, rect.y + origin.y),
                &self.classifier,
            ),
            Glyph::new(
                rest,
                rest_fg.translate(origin.x, origin.y),
                &self.classifier,
            ),
        ];
        pieces.sort_by_key(|g| g.origin().x);
        Ok(Some(pieces))
    }

    /// Cut a glyph into two equal halves, each cropped to its ink.
    ///
    /// The right half takes the extra column of an odd width. A glyph one
    /// column wide is cut into top and bottom halves instead.
    pub fn bisect(&self, glyph: &Glyph) -> RecogResult<Vec<Glyph>> {
        let (grid, fg) = glyph.grid().clip_to_foreground()?;
        self.bisect_grid(&grid, fg.translate(glyph.origin().x, glyph.origin().y))
    }

    fn bisect_grid(&self, grid: &PixelGrid, origin: GridBox) -> RecogResult<Vec<Glyph>> {
        let w = grid.width() as i32;
        let h = grid.height() as i32;
        let halves = if w >= 2 {
            [
                GridBox::new_unchecked(0, 0, w / 2, h),
                GridBox::new_unchecked(w / 2, 0, w - w / 2, h),
            ]
        } else if h >= 2 {
            [
                GridBox::new_unchecked(0, 0, w, h / 2),
                GridBox::new_unchecked(0, h / 2, w, h - h / 2),
            ]
        } else {
            return Err(RecogError::InvalidParameter(
                "cannot split a single-pixel glyph".to_string(),
            ));
        };

        halves
            .iter()
            .map(|half| -> RecogResult<Glyph> {
                let (piece, fg) = grid.clip_rectangle(half)?.clip_to_foreground()?;
                let placed = fg.translate(half.x + origin.x, half.y + origin.y);
                Ok(Glyph::new(piece, placed, &self.classifier))
            })
            .collect()
    }
}
