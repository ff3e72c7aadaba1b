//! Feature predicates
//!
//! Each predicate answers one structural question about a cropped glyph.
//! They are total: a walk that would leave the grid counts as "not
//! matched".

use super::walk::{LegEnd, LegRule, Step, View, Walker};
use crate::types::FeatureClass;
use scrawl_core::PixelGrid;
use std::ops::Range;

/// Row-to-row ink increase that counts as a sudden widening
pub const SUDDEN_WIDENING: u32 = 4;

/// Widenings closer together than this many rows count once
pub const WIDENING_WINDOW: usize = 15;

/// Widening count at which a glyph is too busy to be a crossbar
pub const MAX_WIDENINGS: usize = 3;

/// How much wider a crossbar row is than the rows around it
pub const CROSSBAR_FACTOR: f32 = 3.25;

/// Neighbour rows compared against a crossbar candidate, as offsets
const CROSSBAR_OFFSETS: std::ops::RangeInclusive<usize> = 9..=12;

/// Ink at or past `(width - 1) / OPEN_RIGHT_DIVISOR` is right of center
pub const OPEN_RIGHT_DIVISOR: f32 = 1.9;

/// Anchors of a bowl must lie within `width / OPEN_MARGIN_DIVISOR` of
/// their edge
pub const OPEN_MARGIN_DIVISOR: f32 = 4.25;

/// Enclosures starting below `height / DESCENDER_START_DIVISOR` have no
/// room for a descender
pub const DESCENDER_START_DIVISOR: f32 = 1.75;

/// Some row has no ink.
pub fn is_disconnect(row_counts: &[u32]) -> bool {
    row_counts.contains(&0)
}

/// A crossbar row stands out against the stem around it, and the profile
/// is not jagged.
pub fn is_intersect(row_counts: &[u32]) -> bool {
    let n = row_counts.len();
    let reach = *CROSSBAR_OFFSETS.end();
    let mut crossbar = false;
    let mut widenings = 0;
    let mut last = 0;

    for i in 1..n {
        if row_counts[i] >= row_counts[i - 1] + SUDDEN_WIDENING
            && (last == 0 || i >= last + WIDENING_WINDOW)
        {
            last = i;
            widenings += 1;
        }

        if i < reach || i + reach >= n {
            continue;
        }
        let row = row_counts[i] as f32;
        if CROSSBAR_OFFSETS.clone().all(|k| {
            row >= row_counts[i - k] as f32 * CROSSBAR_FACTOR
                && row >= row_counts[i + k] as f32 * CROSSBAR_FACTOR
        }) {
            crossbar = true;
        }
    }

    crossbar && widenings < MAX_WIDENINGS
}

/// Ink stays left of center at 1/3, 1/2 and 2/3 of the height.
pub fn is_open_right(grid: &PixelGrid) -> bool {
    let w = grid.width();
    let h = grid.height();
    let limit = (w - 1) as f32 / OPEN_RIGHT_DIVISOR;
    let rows = [h / 3, h / 2, (h as f32 * 2.0 / 3.0) as u32];
    rows.iter()
        .all(|&y| grid.rightmost_ink_in_row(y).is_none_or(|x| (x as f32) < limit))
}

/// A bowl opening upward, as in "u".
pub fn has_open_top(grid: &PixelGrid) -> bool {
    open_side(View::upright(grid), false)
}

/// A bowl opening downward, as in "n".
///
/// The bowl's floor must sit in the upper half of the glyph.
pub fn has_open_bottom(grid: &PixelGrid) -> bool {
    open_side(View::flipped(grid), true)
}

fn first_ink(
    view: View<'_>,
    rows: Range<i32>,
    accept: impl Fn(i32, i32) -> bool,
) -> Option<(i32, i32)> {
    rows.flat_map(|y| (0..view.width()).map(move |x| (x, y)))
        .find(|&(x, y)| view.is_ink(x, y) && accept(x, y))
}

fn open_side(view: View<'_>, shallow_floor: bool) -> bool {
    let w = view.width();
    let h = view.height();
    let top = 0..h / 2;

    let Some(left) = first_ink(view, top.clone(), |x, _| x <= w / 3) else {
        return false;
    };
    let Some(right) = first_ink(view, top, |x, y| x >= w / 2 && !view.is_ink(x + 1, y)) else {
        return false;
    };
    let margin = w as f32 / OPEN_MARGIN_DIVISOR;
    if left.0 as f32 >= margin || right.0 as f32 <= w as f32 - margin {
        return false;
    }

    let start = first_ink(view, left.1..h, |x, y| {
        (y > left.1 || x >= left.0)
            && x <= w / 2
            && view.is_background(x + 1, y)
            && view.is_background(x + 2, y)
    });
    let Some((sx, sy)) = start else {
        return false;
    };

    let mut walker = Walker::new(view, sx + 1, sy);
    let rule = LegRule {
        until_column: Some(right.0),
        open_top: true,
        ..LegRule::default()
    };
    if walker.leg(Step::Down, Step::Right, rule) == LegEnd::Escaped {
        return false;
    }
    let Some((cx, cy)) = walker.last_contact() else {
        return false;
    };
    if cx < left.0 || cx > right.0 {
        return false;
    }
    if shallow_floor && view.grid_y(cy) >= h / 2 {
        return false;
    }
    (0..cy).all(|y| !view.is_ink(cx, y))
}

/// A closed background region and the seed it was traced from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enclosure {
    /// Leftmost cell of the seed run
    pub seed: (u32, u32),
    /// Subclass by stem shape
    pub class: FeatureClass,
}

const ENCLOSURE_LEGS: [(Step, Step); 4] = [
    (Step::Right, Step::Down),
    (Step::Down, Step::Left),
    (Step::Left, Step::Up),
    (Step::Up, Step::Right),
];

/// Find a background region fully bounded by ink.
///
/// Seeds are three background cells in a row with ink directly above.
/// Seeds are tried in row-major order and the first one whose four-leg
/// trace closes on itself wins.
pub fn find_enclosure(grid: &PixelGrid) -> Option<Enclosure> {
    let view = View::upright(grid);
    let w = view.width();
    let h = view.height();

    for y in 1..h - 1 {
        for x in 1..=w - 4 {
            let seed = (0..3).all(|k| view.is_background(x + k, y) && view.is_ink(x + k, y - 1));
            if seed && traces_closed(view, x, y) {
                let start = y as u32;
                let class = if points_up(grid, start) {
                    FeatureClass::EnclosedUp
                } else if points_down(grid, start) {
                    FeatureClass::EnclosedDown
                } else {
                    FeatureClass::EnclosedRound
                };
                return Some(Enclosure {
                    seed: (x as u32, start),
                    class,
                });
            }
        }
    }
    None
}

fn traces_closed(view: View<'_>, x: i32, y: i32) -> bool {
    let mut walker = Walker::new(view, x, y);
    for (i, &(primary, fallback)) in ENCLOSURE_LEGS.iter().enumerate() {
        let rule = LegRule {
            close_on_revisit: i == ENCLOSURE_LEGS.len() - 1,
            ..LegRule::default()
        };
        match walker.leg(primary, fallback, rule) {
            LegEnd::Escaped => return false,
            LegEnd::Closed => return true,
            LegEnd::Blocked | LegEnd::Reached => {}
        }
    }
    false
}

/// The ink in the top fifth, above row `start`, sits on one side only.
pub fn points_up(grid: &PixelGrid, start: u32) -> bool {
    let w = grid.width();
    let third = w / 3;
    let limit = grid.height() / 5;
    let mut left_only = true;
    let mut right_only = true;

    for y in (0..start).take_while(|&y| y <= limit) {
        for x in 0..w {
            if grid.is_ink(x, y) {
                if x >= third {
                    left_only = false;
                } else {
                    right_only = false;
                }
            }
        }
    }
    left_only ^ right_only
}

/// A tall glyph whose enclosure starts high and which carries ink toward
/// the lower right.
pub fn points_down(grid: &PixelGrid, start: u32) -> bool {
    let w = grid.width();
    let h = grid.height();
    if h <= w || start >= (h as f32 / DESCENDER_START_DIVISOR) as u32 {
        return false;
    }
    let row = (h as f32 * 2.0 / 3.0) as u32;
    grid.rightmost_ink_in_row(row).is_some_and(|x| x > w / 6)
}

/// Every row is at most one ink run.
pub fn is_line(grid: &PixelGrid) -> bool {
    (0..grid.height()).all(|y| grid.row_run_count(y) <= 1)
}
