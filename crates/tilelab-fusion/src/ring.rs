//! The visibility ring: the two most recent raw snapshots.
//!
//! Retained solely to decide whether a word absent from the current
//! snapshot is still plausibly on the table, and to give the
//! letter-insertion correction a loose-letter history to draw from.
//! Words and loose letters are recorded separately; the ring stores raw
//! observations, never fused output.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

/// Number of raw snapshots the ring retains.
const RING_DEPTH: usize = 2;

#[derive(Debug, Clone, Default)]
struct RingEntry {
    words: FxHashSet<String>,
    letters: String,
}

/// The last two raw snapshots, newest last.
#[derive(Debug, Clone, Default)]
pub struct VisibilityRing {
    entries: VecDeque<RingEntry>,
}

impl VisibilityRing {
    /// An empty ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw snapshot, evicting the oldest beyond the ring depth.
    pub fn push(&mut self, words: FxHashSet<String>, letters: String) {
        if self.entries.len() == RING_DEPTH {
            self.entries.pop_front();
        }
        self.entries.push_back(RingEntry { words, letters });
    }

    /// True when the word appears in any retained raw snapshot.
    pub fn seen(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.words.contains(word))
    }

    /// Loose letters of the most recent retained raw snapshot.
    pub fn latest_letters(&self) -> &str {
        self.entries.back().map_or("", |e| e.letters.as_str())
    }

    /// Number of retained snapshots (at most two).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
