//! Box - Rectangle regions
//!
//! A `Box` locates a glyph inside the grid it was cut from, and describes
//! the regions captured or erased during segmentation.

use crate::error::{Error, Result};

/// A rectangle in grid coordinates, `x`/`y` at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Box {
    /// Create a box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a negative width or height.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box extent must be non-negative, got {w}x{h}"
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without checking its extent.
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the last column
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the last row
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        (self.x..self.right()).contains(&x) && (self.y..self.bottom()).contains(&y)
    }

    /// Overlap of two boxes, `None` when they share no cell.
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let w = self.right().min(other.right()) - x;
        let h = self.bottom().min(other.bottom()) - y;
        (w > 0 && h > 0).then_some(Box { x, y, w, h })
    }

    /// Shift the box by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Box {
        Box {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The part of the box inside a `width` x `height` grid.
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        self.intersect(&Box::new_unchecked(0, 0, width, height))
    }

    /// Width-to-height ratio; zero for a box without height.
    pub fn aspect_ratio(&self) -> f32 {
        if self.h == 0 {
            0.0
        } else {
            self.w as f32 / self.h as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_new_rejects_negative() {
        assert!(Box::new(0, 0, -1, 4).is_err());
        assert!(Box::new(0, 0, 3, 4).is_ok());
    }

    #[test]
    fn test_box_edges() {
        let b = Box::new_unchecked(2, 3, 10, 5);
        assert_eq!(b.right(), 12);
        assert_eq!(b.bottom(), 8);
        assert!(b.contains_point(2, 3));
        assert!(!b.contains_point(12, 3));
        assert!(Box::new_unchecked(1, 1, 0, 4).is_empty());
    }

    #[test]
    fn test_box_intersect() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Box::new_unchecked(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Box::new_unchecked(10, 0, 2, 2)), None);
        assert_eq!(a.translate(3, -1), Box::new_unchecked(3, -1, 10, 10));
    }

    #[test]
    fn test_box_clip() {
        let b = Box::new_unchecked(-2, -2, 6, 6);
        assert_eq!(b.clip(3, 3), Some(Box::new_unchecked(0, 0, 3, 3)));
        assert_eq!(Box::new_unchecked(5, 5, 2, 2).clip(3, 3), None);
    }

    #[test]
    fn test_box_aspect_ratio() {
        assert_eq!(Box::new_unchecked(0, 0, 8, 4).aspect_ratio(), 2.0);
        assert_eq!(Box::new_unchecked(0, 0, 8, 0).aspect_ratio(), 0.0);
    }
}
