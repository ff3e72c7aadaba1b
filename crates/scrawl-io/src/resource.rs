//! Lexicon and labeled-corpus loading
//!
//! A lexicon is a newline-delimited word list. A corpus is a directory with
//! one subdirectory per label, named by that single character, holding the
//! sample images for it:
//!
//! ```text
//! corpus/
//!   a/1.jpg a/2.jpg ...
//!   b/1.png ...
//! ```

use crate::{IoResult, read_raster};
use scrawl_core::Raster;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One corpus sample and the label it was filed under.
#[derive(Debug, Clone)]
pub struct LabeledRaster {
    /// Label (the name of the sample's directory)
    pub label: char,
    /// Where the sample was read from
    pub path: PathBuf,
    /// Decoded image
    pub raster: Raster,
}

/// Parse a word list, one word per line.
///
/// Surrounding whitespace (including a trailing `\r`) is trimmed and blank
/// lines are skipped. Order is preserved.
pub fn parse_lexicon<R: BufRead>(reader: R) -> IoResult<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// Read a word list from a file.
pub fn read_lexicon<P: AsRef<Path>>(path: P) -> IoResult<Vec<String>> {
    let path = path.as_ref();
    let words = parse_lexicon(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), words = words.len(), "read lexicon");
    Ok(words)
}

/// Read every sample of a labeled corpus directory.
///
/// Subdirectories whose names are not exactly one character are ignored,
/// as are files that are not PNG or JPEG by extension. A file with an
/// image extension that fails to decode is skipped with a warning.
/// Samples come back ordered by label, then by file name.
pub fn read_corpus<P: AsRef<Path>>(dir: P) -> IoResult<Vec<LabeledRaster>> {
    let dir = dir.as_ref();
    let mut labels: Vec<(char, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let mut chars = name.chars();
        if let (Some(label), None) = (chars.next(), chars.next()) {
            labels.push((label, entry.path()));
        }
    }
    labels.sort_by_key(|(label, _)| *label);

    let mut samples = Vec::new();
    for (label, label_dir) in labels {
        let mut files: Vec<PathBuf> = fs::read_dir(&label_dir)?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image_path(p))
            .collect();
        files.sort();

        let before = samples.len();
        for path in files {
            match read_raster(&path) {
                Ok(raster) => samples.push(LabeledRaster {
                    label,
                    path,
                    raster,
                }),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping corpus sample"),
            }
        }
        debug!(label = %label, samples = samples.len() - before, "read corpus label");
    }

    info!(dir = %dir.display(), samples = samples.len(), "read corpus");
    Ok(samples)
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(crate::ImageFormat::from_extension)
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_lexicon_trims_and_skips_blank() {
        let text = "hello\r\n\n  world \nfoo";
        let words = parse_lexicon(Cursor::new(text)).unwrap();
        assert_eq!(words, vec!["hello", "world", "foo"]);
    }

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("a/1.jpg")));
        assert!(is_image_path(Path::new("a/1.PNG")));
        assert!(!is_image_path(Path::new("a/notes.txt")));
        assert!(!is_image_path(Path::new("a/noext")));
    }
}
