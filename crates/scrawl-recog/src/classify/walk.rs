//! Contour walking
//!
//! Every boundary-tracing rule is built from one primitive: a *leg*. A leg
//! moves a walker through background cells, stepping in its primary
//! direction while that cell is background and in its fallback direction
//! otherwise, until both are blocked by ink. Both directions are fixed for
//! the leg, so a leg always terminates within `width + height` steps.
//!
//! Walks never leave the grid. Landing on a border cell means the
//! background reached the outside, which ends the leg as
//! [`LegEnd::Escaped`]. A leg tracing a bowl from its mouth may exempt the
//! top row, which is the mouth itself.

use scrawl_core::PixelGrid;

/// Unit step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

impl Step {
    fn delta(self) -> (i32, i32) {
        match self {
            Step::Up => (0, -1),
            Step::Down => (0, 1),
            Step::Left => (-1, 0),
            Step::Right => (1, 0),
        }
    }
}

/// A grid seen either upright or flipped top to bottom
///
/// Lets the open-top routine detect open-bottom glyphs without copying.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    grid: &'a PixelGrid,
    flipped: bool,
}

impl<'a> View<'a> {
    /// The grid as is.
    pub fn upright(grid: &'a PixelGrid) -> Self {
        Self {
            grid,
            flipped: false,
        }
    }

    /// The grid mirrored vertically.
    pub fn flipped(grid: &'a PixelGrid) -> Self {
        Self {
            grid,
            flipped: true,
        }
    }

    pub fn width(&self) -> i32 {
        self.grid.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.grid.height() as i32
    }

    /// Map a view row to a row of the underlying grid.
    pub fn grid_y(&self, y: i32) -> i32 {
        if self.flipped {
            self.height() - 1 - y
        } else {
            y
        }
    }

    /// `Some(true)` for ink, `None` off the grid.
    pub fn ink(&self, x: i32, y: i32) -> Option<bool> {
        self.grid.ink_at(x, self.grid_y(y))
    }

    /// True only for in-grid ink.
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        self.ink(x, y) == Some(true)
    }

    /// True only for in-grid background.
    pub fn is_background(&self, x: i32, y: i32) -> bool {
        self.ink(x, y) == Some(false)
    }

    fn on_border(&self, x: i32, y: i32, include_top: bool) -> bool {
        (include_top && y == 0) || x == 0 || x == self.width() - 1 || y == self.height() - 1
    }
}

/// Why a leg stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegEnd {
    /// Primary and fallback both blocked by ink
    Blocked,
    /// Stepped onto the grid border
    Escaped,
    /// Stepped onto a cell an earlier leg visited
    Closed,
    /// Reached the requested stop column
    Reached,
}

/// Optional stop conditions for a leg
#[derive(Debug, Clone, Copy, Default)]
pub struct LegRule {
    /// End with [`LegEnd::Closed`] on revisiting a cell
    pub close_on_revisit: bool,
    /// End with [`LegEnd::Reached`] once `x` reaches this column
    pub until_column: Option<i32>,
    /// The top row is open: stepping along it is not an escape
    pub open_top: bool,
}

/// A background-following walker over a [`View`]
pub struct Walker<'a> {
    view: View<'a>,
    x: i32,
    y: i32,
    visited: Vec<bool>,
    last_contact: Option<(i32, i32)>,
}

impl<'a> Walker<'a> {
    /// Place a walker at (x, y), marking that cell visited.
    pub fn new(view: View<'a>, x: i32, y: i32) -> Self {
        let mut walker = Self {
            view,
            x,
            y,
            visited: vec![false; (view.width() * view.height()).max(0) as usize],
            last_contact: None,
        };
        walker.mark();
        walker
    }

    /// Current position
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Most recent ink cell that blocked the primary direction.
    pub fn last_contact(&self) -> Option<(i32, i32)> {
        self.last_contact
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.view.width() || y >= self.view.height() {
            return None;
        }
        Some((y * self.view.width() + x) as usize)
    }

    fn mark(&mut self) {
        if let Some(i) = self.index(self.x, self.y) {
            self.visited[i] = true;
        }
    }

    fn was_visited(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.visited[i])
    }

    /// Walk one leg.
    pub fn leg(&mut self, primary: Step, fallback: Step, rule: LegRule) -> LegEnd {
        loop {
            if rule.until_column.is_some_and(|col| self.x >= col) {
                return LegEnd::Reached;
            }

            let (px, py) = primary.delta();
            let (nx, ny) = (self.x + px, self.y + py);
            let step = if self.view.is_background(nx, ny) {
                primary
            } else {
                if self.view.is_ink(nx, ny) {
                    self.last_contact = Some((nx, ny));
                }
                let (fx, fy) = fallback.delta();
                if self.view.is_background(self.x + fx, self.y + fy) {
                    fallback
                } else {
                    return LegEnd::Blocked;
                }
            };

            let (dx, dy) = step.delta();
            self.x += dx;
            self.y += dy;

            if rule.close_on_revisit && self.was_visited(self.x, self.y) {
                return LegEnd::Closed;
            }
            self.mark();
            if self.view.on_border(self.x, self.y, !rule.open_top) {
                if rule.until_column.is_some_and(|col| self.x >= col) {
                    return LegEnd::Reached;
                }
                return LegEnd::Escaped;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_flip_maps_rows() {
        let grid = PixelGrid::from_ascii(&["#.", ".."]).unwrap();
        let up = View::upright(&grid);
        let down = View::flipped(&grid);
        assert!(up.is_ink(0, 0));
        assert!(down.is_ink(0, 1));
        assert!(!down.is_ink(0, 0));
        assert_eq!(down.ink(5, 0), None);
        assert_eq!(down.grid_y(0), 1);
    }

    #[test]
    fn test_leg_blocked_in_pocket() {
        // Walker at (1,1) in a closed pocket: down, then right, then stuck.
        let grid = PixelGrid::from_ascii(&[
            "#####", //
            "#..##", //
            "#..##", //
            "#####", //
            "#####",
        ])
        .unwrap();
        let mut w = Walker::new(View::upright(&grid), 1, 1);
        assert_eq!(w.leg(Step::Down, Step::Right, LegRule::default()), LegEnd::Blocked);
        assert_eq!(w.position(), (2, 2));
        assert_eq!(w.last_contact(), Some((2, 3)));
    }

    #[test]
    fn test_leg_along_open_top_row() {
        // Start on the mouth row of a thin "v": the first step is sideways.
        let grid = PixelGrid::from_ascii(&[
            "#...#", //
            ".#.#.",
            "..#..",
        ])
        .unwrap();
        let closed = LegRule {
            until_column: Some(4),
            ..LegRule::default()
        };
        let mut w = Walker::new(View::upright(&grid), 1, 0);
        assert_eq!(w.leg(Step::Down, Step::Right, closed), LegEnd::Escaped);

        let open = LegRule {
            open_top: true,
            ..closed
        };
        let mut w = Walker::new(View::upright(&grid), 1, 0);
        assert_eq!(w.leg(Step::Down, Step::Right, open), LegEnd::Blocked);
        assert_eq!(w.position(), (2, 1));
        assert_eq!(w.last_contact(), Some((2, 2)));
    }

    #[test]
    fn test_leg_escapes_through_border() {
        let grid = PixelGrid::from_ascii(&[
            "#.#", //
            "#.#", //
            "#.#",
        ])
        .unwrap();
        let mut w = Walker::new(View::upright(&grid), 1, 0);
        assert_eq!(w.leg(Step::Down, Step::Right, LegRule::default()), LegEnd::Escaped);
    }

    #[test]
    fn test_leg_closes_on_revisit() {
        let grid = PixelGrid::from_ascii(&[
            "#####", //
            "#...#", //
            "#####",
        ])
        .unwrap();
        let mut w = Walker::new(View::upright(&grid), 1, 1);
        assert_eq!(w.leg(Step::Right, Step::Down, LegRule::default()), LegEnd::Blocked);
        let closing = LegRule {
            close_on_revisit: true,
            ..LegRule::default()
        };
        assert_eq!(w.leg(Step::Left, Step::Up, closing), LegEnd::Closed);
    }

    #[test]
    fn test_leg_stops_at_column() {
        let grid = PixelGrid::from_ascii(&[
            "#.....#", //
            "#.....#", //
            "#######",
        ])
        .unwrap();
        let mut w = Walker::new(View::upright(&grid), 1, 0);
        let rule = LegRule {
            until_column: Some(4),
            ..LegRule::default()
        };
        assert_eq!(w.leg(Step::Down, Step::Right, rule), LegEnd::Reached);
        assert_eq!(w.position(), (4, 1));
    }
}
