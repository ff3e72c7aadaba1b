//! Lexicon-based word correction
//!
//! Snaps a raw recognition to the closest lexicon word of the same length
//! when the two differ in at most a third of their letters.

use rand::seq::IndexedRandom;
use std::collections::HashSet;
use tracing::{debug, info};

/// Divisor of the word length giving the largest correctable distance
pub const MAX_DISTANCE_DIVISOR: usize = 3;

/// Count the positions at which two equal-length words differ.
///
/// Lengths are in chars. Words of different length have no distance.
pub fn distance(a: &str, b: &str) -> Option<usize> {
    if a.chars().count() != b.chars().count() {
        return None;
    }
    Some(a.chars().zip(b.chars()).filter(|(x, y)| x != y).count())
}

/// An ordered word list
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashSet<String>,
}

impl Dictionary {
    /// Build from words in lexicon order.
    ///
    /// Words are trimmed and blank entries dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        let index = words.iter().cloned().collect();
        info!(words = words.len(), "built dictionary");
        Self { words, index }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(word)
    }

    /// Words in lexicon order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Correct `word` to the nearest same-length lexicon entry.
    ///
    /// Entries are scanned in lexicon order and the first one at the
    /// smallest distance is kept. It replaces `word` when that distance is
    /// at most `len / 3`; otherwise `word` comes back unchanged.
    pub fn correct(&self, word: &str) -> String {
        let len = word.chars().count();
        if len == 0 {
            return word.to_string();
        }

        let mut nearest: Option<(&str, usize)> = None;
        for entry in &self.words {
            let Some(d) = distance(word, entry) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| d < best) {
                nearest = Some((entry, d));
                if d == 0 {
                    break;
                }
            }
        }

        match nearest {
            Some((entry, d)) if d <= len / MAX_DISTANCE_DIVISOR => {
                debug!(word, corrected = entry, distance = d, "corrected word");
                entry.to_string()
            }
            _ => word.to_string(),
        }
    }

    /// A uniformly chosen entry, or `None` for an empty lexicon.
    pub fn random_word<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.words.choose(rng).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance("hello", "helxo"), Some(1));
        assert_eq!(distance("abc", "abc"), Some(0));
        assert_eq!(distance("abc", "abcd"), None);
        assert_eq!(distance("héllo", "hello"), Some(1));
    }

    #[test]
    fn test_correct_hello_world() {
        let dict = Dictionary::from_words(["hello", "world"]);
        assert_eq!(dict.correct("helxo"), "hello");
        assert_eq!(dict.correct("zzzzz"), "zzzzz");
        assert_eq!(dict.correct("world"), "world");
        assert_eq!(dict.correct("wor"), "wor");
        assert_eq!(dict.correct(""), "");
    }

    #[test]
    fn test_correct_threshold() {
        let dict = Dictionary::from_words(["abcdef"]);
        // 6 / 3 = 2 differences allowed
        assert_eq!(dict.correct("abcdxx"), "abcdef");
        assert_eq!(dict.correct("abcxxx"), "abcxxx");
        // Short words tolerate nothing but an exact match.
        let short = Dictionary::from_words(["ab"]);
        assert_eq!(short.correct("ax"), "ax");
    }

    #[test]
    fn test_correct_tie_keeps_first_entry() {
        let dict = Dictionary::from_words(["cat", "cot", "cut"]);
        assert_eq!(dict.correct("cxt"), "cat");
        let reversed = Dictionary::from_words(["cut", "cot", "cat"]);
        assert_eq!(reversed.correct("cxt"), "cut");
    }

    #[test]
    fn test_from_words_trims() {
        let dict = Dictionary::from_words(["hello\r", "", " world ", "  "]);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn test_random_word() {
        let mut rng = rand::rng();
        let dict = Dictionary::from_words(["alpha", "beta", "gamma"]);
        for _ in 0..20 {
            let w = dict.random_word(&mut rng).unwrap();
            assert!(dict.contains(w));
        }
        assert_eq!(Dictionary::default().random_word(&mut rng), None);
    }
}
