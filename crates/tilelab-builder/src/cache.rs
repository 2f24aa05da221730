//! Per-mask subset precomputation over the unique player words.
//!
//! For n unique words, every bitmask m in [0, 2^n) gets the letter-count
//! vector and word list of the subset it selects. Each entry derives
//! from its parent (the mask without its lowest set bit) by a single
//! O(26) add, so the whole table builds in O(2^n * 26).
//!
//! The cache is keyed by the sorted tuple of words. When a snapshot's
//! signature differs from the cached one by exactly one newly added
//! word, the table extends in place: the new word becomes the highest
//! bit, entries 0..2^(n-1) are untouched, and entries 2^(n-1)..2^n are
//! each old entry plus the new word.

use tilelab_lexicon::LetterCounts;

/// Hard ceiling on unique player words; beyond this the caller keeps
/// the longest words and trades completeness for bounded work.
pub const MAX_UNIQUE_WORDS: usize = 16;

/// How a [`SubsetCache::prepare`] call satisfied the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// The signature matched; the table was reused as-is.
    Hit,
    /// The signature grew by one word; the table was extended in place.
    Extended,
    /// The signature changed otherwise; the table was rebuilt cold.
    Rebuilt,
}

/// One subset's precomputed data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskEntry {
    /// Combined letter counts of the subset.
    pub counts: LetterCounts,
    /// Indices into the cache's word list, ascending.
    pub words: Vec<u16>,
}

/// Cumulative cache statistics, exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Cold builds performed.
    pub rebuilds: u64,
    /// In-place single-word extensions performed.
    pub extensions: u64,
    /// Requests satisfied without touching the table.
    pub hits: u64,
}

/// The subset-enumeration cache. Owned and mutated only by the solver.
#[derive(Debug, Clone, Default)]
pub struct SubsetCache {
    words: Vec<String>,
    word_counts: Vec<LetterCounts>,
    signature: Vec<String>,
    masks: Vec<MaskEntry>,
    stats: CacheStats,
}

impl SubsetCache {
    /// An empty cache.
    pub fn new() -> Self {
        let mut cache = Self::default();
        cache.masks.push(MaskEntry {
            counts: LetterCounts::new(),
            words: Vec::new(),
        });
        cache
    }

    /// Ensure the table covers `unique` (at most [`MAX_UNIQUE_WORDS`]
    /// entries), reusing or extending the existing table when the
    /// signature allows it.
    pub fn prepare(&mut self, unique: &[String]) -> CacheOutcome {
        debug_assert!(unique.len() <= MAX_UNIQUE_WORDS);

        let mut signature: Vec<String> = unique.to_vec();
        signature.sort_unstable();

        if signature == self.signature {
            self.stats.hits += 1;
            return CacheOutcome::Hit;
        }

        if let Some(added) = self.single_addition(&signature) {
            self.extend_with(added);
            self.signature = signature;
            self.stats.extensions += 1;
            return CacheOutcome::Extended;
        }

        self.rebuild(unique);
        self.signature = signature;
        self.stats.rebuilds += 1;
        CacheOutcome::Rebuilt
    }

    /// Number of cached words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The cached word list, in mask-bit order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Per-word letter counts, in mask-bit order.
    pub fn word_letter_counts(&self) -> &[LetterCounts] {
        &self.word_counts
    }

    /// The entry for one mask.
    pub fn mask(&self, m: usize) -> &MaskEntry {
        &self.masks[m]
    }

    /// Number of mask entries (`2^n`).
    pub fn mask_count(&self) -> usize {
        self.masks.len()
    }

    /// Cumulative statistics.
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// If `signature` is the cached signature plus exactly one word,
    /// return that word.
    fn single_addition(&self, signature: &[String]) -> Option<String> {
        if signature.len() != self.signature.len() + 1 {
            return None;
        }
        let mut added = None;
        let mut old = self.signature.iter().peekable();
        for word in signature {
            if old.peek() == Some(&word) {
                old.next();
            } else if added.is_none() {
                added = Some(word.clone());
            } else {
                return None;
            }
        }
        old.peek().is_none().then_some(added).flatten()
    }

    /// Append one word as the highest bit, pushing 2^n new entries.
    /// Existing entries are not rewritten.
    fn extend_with(&mut self, word: String) {
        let counts = LetterCounts::from_word(&word);
        let old_len = self.masks.len();
        let new_index = self.words.len() as u16;

        self.masks.reserve(old_len);
        for m in 0..old_len {
            let entry = {
                let parent = &self.masks[m];
                let mut words = parent.words.clone();
                words.push(new_index);
                MaskEntry {
                    counts: parent.counts.add(&counts),
                    words,
                }
            };
            self.masks.push(entry);
        }

        self.words.push(word);
        self.word_counts.push(counts);
    }

    /// Cold-build the table for a word list, each mask derived from its
    /// parent (the mask without its lowest set bit) by one add.
    fn rebuild(&mut self, unique: &[String]) {
        self.words = unique.to_vec();
        self.word_counts = unique.iter().map(|w| LetterCounts::from_word(w)).collect();

        let n = unique.len();
        self.masks = Vec::with_capacity(1 << n);
        self.masks.push(MaskEntry {
            counts: LetterCounts::new(),
            words: Vec::new(),
        });
        for m in 1..(1usize << n) {
            let low = m.trailing_zeros() as usize;
            let parent = &self.masks[m & (m - 1)];
            let mut words = parent.words.clone();
            let counts = parent.counts.add(&self.word_counts[low]);
            words.push(low as u16);
            words.sort_unstable();
            self.masks.push(MaskEntry { counts, words });
        }
    }
}
