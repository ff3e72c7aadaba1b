//! Binary grid regression test
//!
//!   Test 1-3: text rendering and ink measurements
//!   Test 4-6: cropping and flipping
//!   Test 7+: copy-on-write never touches shared storage

use scrawl_core::{Box, PixelGrid};
use scrawl_test::{RegParams, synth};

#[test]
fn grid_reg() {
    let mut rp = RegParams::new("grid");

    // Test 1-3
    let grid = synth::grid_from_ascii(&[
        "......", //
        ".##...",
        ".#.#..",
        ".##...",
        "......",
    ])
    .unwrap();
    rp.compare_strings("......\n.##...\n.#.#..\n.##...\n......\n", &grid.to_string());
    rp.compare_values(6.0, grid.ink_count() as f64, 0.0);
    rp.compare_values(
        2.0,
        grid.ink_count_in(&Box::new_unchecked(0, 0, 3, 2)) as f64,
        0.0,
    );

    // Test 4-6
    let (cropped, fg) = grid.clip_to_foreground().unwrap();
    rp.compare_strings("##.\n#.#\n##.\n", &cropped.to_string());
    rp.compare_values(1.0, fg.x as f64, 0.0);
    let flipped = cropped.flip_left_right();
    rp.compare_strings(".##\n#.#\n.##\n", &flipped.to_string());

    // Test 7+
    let shared = cropped.clone();
    let mut copy = shared.to_mut();
    copy.clear_rect(&Box::new_unchecked(0, 0, 3, 3));
    let cleared: PixelGrid = copy.into();
    rp.compare_values(0.0, cleared.ink_count() as f64, 0.0);
    rp.compare_grids(&cropped, &shared);
    rp.compare_values(1.0, shared.try_into_mut().is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "grid regression test failed");
}
