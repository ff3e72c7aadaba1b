//! I/O regression test
//!
//!   Test 1-3: a raster survives a PNG write and read unchanged
//!   Test 4-5: binary grids written as 1-bit PNG read back black on white
//!   Test 6-8: corpus directories skip unlabeled and undecodable entries
//!   Test 9+: lexicon files keep order and drop blank lines

use scrawl_core::Raster;
use scrawl_core::color::compose_rgba;
use scrawl_io::{
    ImageFormat, detect_format, read_corpus, read_lexicon, read_raster, read_raster_mem,
    write_raster_png,
};
use scrawl_test::{RegParams, regout_dir, synth};
use std::fs;
use std::path::PathBuf;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(regout_dir()).join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn io_reg() {
    let mut rp = RegParams::new("io");
    let dir = fresh_dir("io_reg");

    // Test 1-3
    let mut raster = Raster::new(5, 4).unwrap();
    raster.set_pixel(1, 1, compose_rgba(10, 20, 30, 255)).unwrap();
    raster.set_pixel(3, 2, compose_rgba(200, 100, 0, 128)).unwrap();
    let path = dir.join("pixels.png");
    write_raster_png(&raster, &path).unwrap();
    rp.compare_values(
        1.0,
        (detect_format(&path).unwrap() == ImageFormat::Png) as u8 as f64,
        0.0,
    );
    let back = read_raster(&path).unwrap();
    rp.compare_values(1.0, (back.data() == raster.data()) as u8 as f64, 0.0);
    rp.compare_values(
        compose_rgba(200, 100, 0, 128) as f64,
        back.get_pixel(3, 2).unwrap() as f64,
        0.0,
    );

    // Test 4-5
    let glyph = synth::ring(9, 7, 2).unwrap();
    let mut encoded = Vec::new();
    scrawl_io::png::write_grid_png(&glyph, &mut encoded).unwrap();
    let decoded = read_raster_mem(&encoded).unwrap();
    rp.compare_values(
        compose_rgba(0, 0, 0, 255) as f64,
        decoded.get_pixel(0, 0).unwrap() as f64,
        0.0,
    );
    rp.compare_values(
        compose_rgba(255, 255, 255, 255) as f64,
        decoded.get_pixel(4, 3).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "io regression test failed");
}

#[test]
fn io_reg_corpus() {
    let mut rp = RegParams::new("io_corpus");
    let dir = fresh_dir("io_reg_corpus");

    for (label, grids) in [
        ("o", vec![synth::ring(8, 8, 2).unwrap(), synth::ring(9, 8, 2).unwrap()]),
        ("u", vec![synth::cup(8, 10, 2).unwrap()]),
        ("long", vec![synth::block(4, 4).unwrap()]),
    ] {
        let label_dir = dir.join(label);
        fs::create_dir_all(&label_dir).unwrap();
        for (i, grid) in grids.iter().enumerate() {
            let raster = synth::raster_from_grid(grid, 1, 2).unwrap();
            write_raster_png(&raster, label_dir.join(format!("{i}.png"))).unwrap();
        }
    }
    fs::write(dir.join("u").join("notes.txt"), "not an image").unwrap();
    fs::write(dir.join("u").join("broken.png"), b"definitely not a png").unwrap();

    // Test 6-8
    let corpus = read_corpus(&dir).unwrap();
    let labels: String = corpus.iter().map(|s| s.label).collect();
    rp.compare_strings("oou", &labels);
    rp.compare_values(12.0, corpus[0].raster.width() as f64, 0.0);
    rp.compare_values(13.0, corpus[1].raster.width() as f64, 0.0);

    // Test 9+
    let lexicon = dir.join("words.txt");
    fs::write(&lexicon, "zebra\n\n apple \r\nmango\n").unwrap();
    let words = read_lexicon(&lexicon).unwrap();
    rp.compare_strings("zebra,apple,mango", &words.join(","));
    rp.compare_values(1.0, read_lexicon(dir.join("missing.txt")).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "io corpus regression test failed");
}
