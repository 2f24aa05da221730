//! Dictionary loading and candidate indexing.
//!
//! The dictionary is read from `data/words.txt` (one lowercase word per
//! line) with a small embedded fallback when the file is absent, and
//! paired with a Zipf frequency map from `data/word_frequencies.json`
//! (0-8 scale, higher = more common). Both degradations are logged once
//! at load time; a missing frequency table turns scoring into
//! no-sort/no-filter downstream.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::embedded::FALLBACK_WORDS;
use crate::letters::LetterCounts;

/// Errors that can occur when reading dictionary data files.
///
/// Loading itself never fails -- the loader degrades to the embedded
/// fallback -- but callers that read auxiliary files directly get this.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// Failed to read a data file from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A data file held invalid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// One dictionary word with its precomputed count vector.
#[derive(Debug, Clone)]
struct Entry {
    text: String,
    counts: LetterCounts,
}

/// The immutable word list, letter-count vectors, candidate index, and
/// frequency map. Loaded once at process start.
pub struct Dictionary {
    entries: Vec<Entry>,
    membership: FxHashSet<String>,
    /// `(first letter, length)` to indices into `entries`.
    index: FxHashMap<(u8, usize), Vec<u32>>,
    frequencies: FxHashMap<String, f32>,
    has_frequencies: bool,
    max_len: usize,
}

impl Dictionary {
    /// Load the dictionary and frequency table from disk.
    ///
    /// Never fails: a missing or unreadable word list falls back to the
    /// embedded list, and a missing frequency table leaves scoring
    /// disabled. Both degradations are logged once here.
    pub fn load(words_path: &Path, frequencies_path: &Path) -> Self {
        let words: Vec<String> = match std::fs::read_to_string(words_path) {
            Ok(contents) => contents
                .lines()
                .map(|line| line.trim().to_ascii_lowercase())
                .filter(|w| w.len() >= 2 && w.bytes().all(|b| b.is_ascii_lowercase()))
                .collect(),
            Err(e) => {
                tracing::warn!(
                    path = %words_path.display(),
                    error = %e,
                    "word list not readable, using embedded fallback"
                );
                FALLBACK_WORDS.iter().map(|&w| w.to_owned()).collect()
            }
        };

        let mut dict = Self::from_words(words.iter().map(String::as_str));

        match read_frequency_map(frequencies_path) {
            Ok(map) => {
                tracing::info!(entries = map.len(), "frequency table loaded");
                dict.frequencies = map;
                dict.has_frequencies = true;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "frequency table not available, scoring degrades to no-sort/no-filter"
                );
            }
        }

        dict
    }

    /// Build a dictionary from an iterator of words. Duplicates and
    /// words under 2 letters are dropped.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries = Vec::new();
        let mut membership = FxHashSet::default();
        let mut index: FxHashMap<(u8, usize), Vec<u32>> = FxHashMap::default();
        let mut max_len = 0;

        for word in words {
            let word = word.trim().to_ascii_lowercase();
            if word.len() < 2 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
                continue;
            }
            if !membership.insert(word.clone()) {
                continue;
            }
            let idx = entries.len() as u32;
            let first = word.as_bytes()[0];
            let len = word.len();
            max_len = max_len.max(len);
            index.entry((first, len)).or_default().push(idx);
            entries.push(Entry {
                counts: LetterCounts::from_word(&word),
                text: word,
            });
        }

        Self {
            entries,
            membership,
            index,
            frequencies: FxHashMap::default(),
            has_frequencies: false,
            max_len,
        }
    }

    /// Attach a frequency map (used by tests and tools).
    #[must_use]
    pub fn with_frequencies(mut self, map: impl IntoIterator<Item = (String, f32)>) -> Self {
        self.frequencies = map.into_iter().collect();
        self.has_frequencies = true;
        self
    }

    /// Dictionary membership check.
    pub fn contains(&self, word: &str) -> bool {
        self.membership.contains(word)
    }

    /// Zipf frequency for a word; 0.0 when unknown.
    pub fn zipf(&self, word: &str) -> f32 {
        self.frequencies.get(word).copied().unwrap_or(0.0)
    }

    /// Whether a frequency table was loaded.
    pub const fn has_frequencies(&self) -> bool {
        self.has_frequencies
    }

    /// Indices of words starting with `first` of exactly `len` letters.
    pub fn candidates(&self, first: u8, len: usize) -> &[u32] {
        self.index
            .get(&(first, len))
            .map_or(&[], Vec::as_slice)
    }

    /// The word text for an index from [`Self::candidates`].
    pub fn word(&self, idx: u32) -> &str {
        &self.entries[idx as usize].text
    }

    /// The precomputed count vector for an index.
    pub fn counts(&self, idx: u32) -> &LetterCounts {
        &self.entries[idx as usize].counts
    }

    /// Length of the longest dictionary word.
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_frequency_map(path: &Path) -> Result<FxHashMap<String, f32>, LexiconError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let raw: FxHashMap<String, f32> =
        serde_json::from_str(&contents).map_err(|source| LexiconError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Dictionary {
        Dictionary::from_words(["cat", "act", "actor", "car", "dog", "hello", "hex"])
    }

    #[test]
    fn membership() {
        let dict = small();
        assert!(dict.contains("cat"));
        assert!(dict.contains("actor"));
        assert!(!dict.contains("zebra"));
    }

    #[test]
    fn index_by_first_letter_and_length() {
        let dict = small();
        let three_c: Vec<&str> = dict.candidates(b'c', 3).iter().map(|&i| dict.word(i)).collect();
        assert_eq!(three_c, vec!["cat", "car"]);
        assert!(dict.candidates(b'c', 9).is_empty());
        assert!(dict.candidates(b'q', 3).is_empty());
    }

    #[test]
    fn counts_are_precomputed() {
        let dict = small();
        let idx = dict.candidates(b'a', 5)[0];
        assert_eq!(dict.word(idx), "actor");
        assert_eq!(*dict.counts(idx), LetterCounts::from_word("actor"));
    }

    #[test]
    fn duplicates_and_invalid_words_dropped() {
        let dict = Dictionary::from_words(["cat", "cat", "a", "Dog!", "dog"]);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("dog"));
    }

    #[test]
    fn zipf_defaults_to_zero() {
        let dict = small().with_frequencies([(String::from("hello"), 6.0)]);
        assert!((dict.zipf("hello") - 6.0).abs() < f32::EPSILON);
        assert!((dict.zipf("hex") - 0.0).abs() < f32::EPSILON);
        assert!(dict.has_frequencies());
    }

    #[test]
    fn fallback_load_when_files_absent() {
        let dict = Dictionary::load(
            Path::new("/nonexistent/words.txt"),
            Path::new("/nonexistent/freqs.json"),
        );
        assert!(dict.contains("cat"));
        assert!(dict.contains("elephant"));
        assert!(!dict.has_frequencies());
        assert!(dict.max_len() >= 8);
    }
}
