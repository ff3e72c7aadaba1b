//! Ink measurements over a grid

use super::{PixelGrid, get_data_bit};
use crate::Box;

impl PixelGrid {
    /// Total number of ink pixels.
    pub fn ink_count(&self) -> u64 {
        let full_words = (self.width() / 32) as usize;
        let tail_bits = self.width() % 32;
        let tail_mask = if tail_bits == 0 {
            0
        } else {
            !0u32 << (32 - tail_bits)
        };
        (0..self.height())
            .map(|y| {
                let line = self.row_data(y);
                let mut n: u64 = line[..full_words]
                    .iter()
                    .map(|w| w.count_ones() as u64)
                    .sum();
                if tail_bits != 0 {
                    n += (line[full_words] & tail_mask).count_ones() as u64;
                }
                n
            })
            .sum()
    }

    /// Number of ink pixels inside `region` (clipped to the grid).
    pub fn ink_count_in(&self, region: &Box) -> u64 {
        let Some(clipped) = region.clip(self.width() as i32, self.height() as i32) else {
            return 0;
        };
        let mut count = 0;
        for y in clipped.y..clipped.bottom() {
            let line = self.row_data(y as u32);
            for x in clipped.x..clipped.right() {
                count += get_data_bit(line, x as u32) as u64;
            }
        }
        count
    }

    /// Ink pixel count of each row, top to bottom.
    pub fn row_ink_counts(&self) -> Vec<u32> {
        (0..self.height())
            .map(|y| {
                let line = self.row_data(y);
                (0..self.width()).map(|x| get_data_bit(line, x)).sum()
            })
            .collect()
    }

    /// True when column `x` holds at least one ink pixel.
    pub fn column_has_ink(&self, x: u32) -> bool {
        x < self.width() && (0..self.height()).any(|y| get_data_bit(self.row_data(y), x) == 1)
    }

    /// Number of maximal horizontal ink runs in row `y`.
    pub fn row_run_count(&self, y: u32) -> u32 {
        if y >= self.height() {
            return 0;
        }
        let line = self.row_data(y);
        let mut runs = 0;
        let mut prev = 0;
        for x in 0..self.width() {
            let bit = get_data_bit(line, x);
            if bit == 1 && prev == 0 {
                runs += 1;
            }
            prev = bit;
        }
        runs
    }

    /// Column of the rightmost ink pixel in row `y`, if any.
    pub fn rightmost_ink_in_row(&self, y: u32) -> Option<u32> {
        if y >= self.height() {
            return None;
        }
        let line = self.row_data(y);
        (0..self.width()).rev().find(|&x| get_data_bit(line, x) == 1)
    }

    /// Tight bounding box of all ink, or `None` for a blank grid.
    pub fn foreground_box(&self) -> Option<Box> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut found = false;

        for y in 0..self.height() {
            let line = self.row_data(y);
            for x in 0..self.width() {
                if get_data_bit(line, x) == 1 {
                    found = true;
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }

        found.then(|| {
            Box::new_unchecked(
                min_x as i32,
                min_y as i32,
                (max_x - min_x + 1) as i32,
                (max_y - min_y + 1) as i32,
            )
        })
    }
}
