//! Synthetic fixtures
//!
//! Small builders for word images and glyph shapes, so tests can describe
//! their input instead of shipping binary assets.

use crate::TestResult;
use scrawl_core::raster::BLACK;
use scrawl_core::{Box, GridMut, PixelGrid, Raster};

/// Grid from text rows, `#` for ink.
pub fn grid_from_ascii(rows: &[&str]) -> TestResult<PixelGrid> {
    Ok(PixelGrid::from_ascii(rows)?)
}

/// Solid `w` x `h` ink block.
pub fn block(w: u32, h: u32) -> TestResult<PixelGrid> {
    let mut grid = GridMut::new(w, h)?;
    grid.fill_rect(&Box::new_unchecked(0, 0, w as i32, h as i32));
    Ok(grid.into())
}

/// Rectangular ring of thickness `t` (an "o").
pub fn ring(w: u32, h: u32, t: u32) -> TestResult<PixelGrid> {
    let mut grid = block(w, h)?.to_mut();
    grid.clear_rect(&Box::new_unchecked(
        t as i32,
        t as i32,
        w as i32 - 2 * t as i32,
        h as i32 - 2 * t as i32,
    ));
    Ok(grid.into())
}

/// Cup open at the top (a "u"): two arms of thickness `t` and a floor of
/// thickness `t`.
pub fn cup(w: u32, h: u32, t: u32) -> TestResult<PixelGrid> {
    let mut grid = block(w, h)?.to_mut();
    grid.clear_rect(&Box::new_unchecked(
        t as i32,
        0,
        w as i32 - 2 * t as i32,
        h as i32 - t as i32,
    ));
    Ok(grid.into())
}

/// Place grids side by side, top-aligned, separated by `gap` background
/// columns. The result is as tall as the tallest input.
pub fn hstack(grids: &[PixelGrid], gap: u32) -> TestResult<PixelGrid> {
    let height = grids.iter().map(PixelGrid::height).max().unwrap_or(0);
    let width = grids.iter().map(PixelGrid::width).sum::<u32>()
        + gap * grids.len().saturating_sub(1) as u32;
    let mut out = GridMut::new(width, height)?;
    let mut x0 = 0;
    for g in grids {
        for y in 0..g.height() {
            for x in 0..g.width() {
                if g.is_ink(x, y) {
                    out.set(x0 + x, y, true)?;
                }
            }
        }
        x0 += g.width() + gap;
    }
    Ok(out.into())
}

/// Render a grid as a black-on-white raster, each cell `scale` pixels
/// square, surrounded by `margin` white pixels.
pub fn raster_from_grid(grid: &PixelGrid, scale: u32, margin: u32) -> TestResult<Raster> {
    let mut raster = Raster::new(
        grid.width() * scale + 2 * margin,
        grid.height() * scale + 2 * margin,
    )?;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.is_ink(x, y) {
                raster.fill_rect(
                    &Box::new_unchecked(
                        (margin + x * scale) as i32,
                        (margin + y * scale) as i32,
                        scale as i32,
                        scale as i32,
                    ),
                    BLACK,
                );
            }
        }
    }
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_has_hole() {
        let r = ring(6, 6, 2).unwrap();
        assert_eq!(r.ink_count(), 36 - 4);
        assert!(!r.is_ink(2, 2));
    }

    #[test]
    fn test_cup_is_open_at_top() {
        let c = cup(6, 5, 1).unwrap();
        assert!(!c.is_ink(2, 0));
        assert!(c.is_ink(0, 0));
        assert!(c.is_ink(2, 4));
    }

    #[test]
    fn test_hstack_gap() {
        let g = hstack(&[block(2, 3).unwrap(), block(1, 1).unwrap()], 2).unwrap();
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 3);
        assert!(!g.column_has_ink(2));
        assert!(g.is_ink(4, 0));
        assert!(!g.is_ink(4, 1));
    }

    #[test]
    fn test_raster_from_grid_scales() {
        let g = PixelGrid::from_ascii(&["#."]).unwrap();
        let r = raster_from_grid(&g, 3, 1).unwrap();
        assert_eq!((r.width(), r.height()), (8, 5));
        assert_eq!(r.get_pixel(1, 1), Some(BLACK));
        assert_eq!(r.get_pixel(3, 3), Some(BLACK));
        assert_ne!(r.get_pixel(4, 1), Some(BLACK));
    }
}
