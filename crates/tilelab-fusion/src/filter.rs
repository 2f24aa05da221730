//! The stateful fusion filter.
//!
//! [`BoardFilter::fuse`] corrects one raw snapshot against the previous
//! fused state and the visibility ring, applying the correction rules
//! in order (first rule that fires wins):
//!
//! 1. accept dictionary words unchanged;
//! 2. re-split a word against words that disappeared from the previous
//!    fused state (the OCR-merged-pair case);
//! 3. split into two dictionary words, preferring a cut that matches a
//!    disappeared word;
//! 4. recursive split for long non-words;
//! 5. single-deletion correction back to a prior fused word;
//! 6. rescue by inserting one loose letter (middle positions first),
//!    falling back to frequency-ordered common letters.
//!
//! A post-pass vetoes corrections shadowed by a direct observation one
//! edit away, restores transiently disappeared words still covered by
//! the visibility ring, and updates per-word confidence. Loose letters
//! are memoryless: the fused pool is whatever the current raw snapshot
//! reported.

use rustc_hash::{FxHashMap, FxHashSet};
use tilelab_lexicon::Dictionary;
use tilelab_types::Snapshot;

use crate::confidence::ConfidenceMap;
use crate::edit::{one_deletion_apart, one_edit_apart};
use crate::ring::VisibilityRing;

/// Minimum length of any fused word.
const MIN_WORD_LEN: usize = 3;
/// Maximum recursion depth for rule 4 splits.
const SPLIT_DEPTH: usize = 3;
/// English letters in descending corpus frequency, the rule 6 fallback.
const COMMON_LETTERS: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// One fused word with its player attribution.
///
/// Fusion keeps the raw per-player assignment as the attribution hint:
/// split halves inherit the player that owned the concatenated input,
/// and restored words keep their prior owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedWord {
    /// The word, lowercase.
    pub text: String,
    /// Index of the owning player.
    pub player: usize,
    /// Whether a correction rule produced this word.
    pub modified: bool,
}

impl AttributedWord {
    fn new(text: impl Into<String>, player: usize, modified: bool) -> Self {
        Self {
            text: text.into(),
            player,
            modified,
        }
    }
}

/// The filter's belief about the current board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FusedBoard {
    /// All fused words with player attribution.
    pub words: Vec<AttributedWord>,
    /// Loose letters, straight from the current raw snapshot.
    pub letters: String,
}

impl FusedBoard {
    /// Group fused words into per-player lists, padded to at least
    /// `min_players` entries so downstream diffs see every board seat.
    pub fn player_lists(&self, min_players: usize) -> Vec<Vec<String>> {
        let seats = self
            .words
            .iter()
            .map(|w| w.player + 1)
            .max()
            .unwrap_or(0)
            .max(min_players);
        let mut lists = vec![Vec::new(); seats];
        for word in &self.words {
            lists[word.player].push(word.text.clone());
        }
        lists
    }

    /// Flat list of fused word texts.
    pub fn texts(&self) -> Vec<&str> {
        self.words.iter().map(|w| w.text.as_str()).collect()
    }
}

/// Stateful temporal fusion filter. One instance per board; owned and
/// mutated only by the solver worker.
#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    confidence: ConfidenceMap,
    ring: VisibilityRing,
    previous: Vec<AttributedWord>,
}

impl BoardFilter {
    /// A fresh filter with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// The confidence tracker, for analytics views.
    pub const fn confidence(&self) -> &ConfidenceMap {
        &self.confidence
    }

    /// The previous fused words.
    pub fn previous(&self) -> &[AttributedWord] {
        &self.previous
    }

    /// Fuse one raw snapshot. Never fails; worst case the input passes
    /// through unchanged.
    pub fn fuse(&mut self, raw: &Snapshot, dict: &Dictionary) -> FusedBoard {
        let prev_letters = self.ring.latest_letters().to_owned();

        let current_words: FxHashSet<String> = raw
            .attributed_words()
            .map(|(w, _)| w.to_owned())
            .collect();
        self.ring.push(current_words.clone(), raw.letters.clone());

        // Words of the previous fused state absent from the current raw
        // snapshot, in previous order for deterministic rule application.
        let mut disappeared: Vec<String> = Vec::new();
        let mut disappeared_set: FxHashSet<String> = FxHashSet::default();
        for prev in &self.previous {
            if !current_words.contains(&prev.text) && disappeared_set.insert(prev.text.clone()) {
                disappeared.push(prev.text.clone());
            }
        }

        let mut corrected: Vec<AttributedWord> = Vec::new();
        for (word, player) in raw.attributed_words() {
            corrected.extend(self.correct_word(
                word,
                player,
                &disappeared,
                &disappeared_set,
                &prev_letters,
                dict,
            ));
        }

        // Confidence veto: a corrected guess loses to a direct
        // observation one edit away in the same snapshot.
        let raw_valid: Vec<&str> = raw
            .attributed_words()
            .map(|(w, _)| w)
            .filter(|w| dict.contains(w))
            .collect();
        corrected.retain(|m| {
            !m.modified || !raw_valid.iter().any(|r| one_edit_apart(r, &m.text))
        });

        // Restore transiently disappeared words still covered by the ring.
        let corrected_texts: Vec<String> = corrected.iter().map(|w| w.text.clone()).collect();
        let mut restored: Vec<AttributedWord> = Vec::new();
        for prev in &self.previous {
            if corrected_texts.iter().any(|c| *c == prev.text) {
                continue;
            }
            let subsumed = corrected_texts
                .iter()
                .any(|c| c.contains(prev.text.as_str()) || prev.text.contains(c.as_str()));
            if subsumed {
                continue;
            }
            if !self.ring.seen(&prev.text) {
                continue;
            }
            // A close dictionary-valid neighbour in the new raw input is
            // the likely correction; do not resurrect the old reading.
            let shadowed = raw
                .attributed_words()
                .any(|(r, _)| dict.contains(r) && one_edit_apart(r, &prev.text));
            if shadowed {
                tracing::debug!(word = %prev.text, "disappeared word shadowed by close observation");
                continue;
            }
            restored.push(AttributedWord::new(prev.text.clone(), prev.player, false));
        }

        let mut words = corrected;
        words.append(&mut restored);

        self.update_confidence(&words);
        self.previous = words.clone();

        FusedBoard {
            words,
            letters: raw.letters.clone(),
        }
    }

    /// Apply the correction pipeline to one raw word.
    fn correct_word(
        &self,
        word: &str,
        player: usize,
        disappeared: &[String],
        disappeared_set: &FxHashSet<String>,
        prev_letters: &str,
        dict: &Dictionary,
    ) -> Vec<AttributedWord> {
        // Short words are never kept: rescue by insertion or drop.
        if word.len() < MIN_WORD_LEN {
            return match insert_one_letter(word, prev_letters, dict) {
                Some(fixed) => vec![AttributedWord::new(fixed, player, true)],
                None => Vec::new(),
            };
        }

        // Rule 1: accept.
        if dict.contains(word) {
            return vec![AttributedWord::new(word, player, false)];
        }

        // Rule 2: re-split against a disappeared word.
        if let Some(parts) = resplit_disappeared(word, disappeared, disappeared_set, dict) {
            return split_parts(parts, player);
        }

        // Rule 3: split into two real words.
        if let Some(parts) = split_two(word, disappeared_set, dict) {
            return split_parts(parts, player);
        }

        // Rule 4: recursive split for long non-words.
        if word.len() >= 2 * MIN_WORD_LEN
            && let Some(parts) = split_chain(word, SPLIT_DEPTH, dict)
            && parts.len() > 1
        {
            return split_parts(parts, player);
        }

        // Rule 5: single deletion back to a prior fused word.
        for prev in &self.previous {
            let p = prev.text.as_str();
            if p.len().abs_diff(word.len()) != 1 || !dict.contains(p) {
                continue;
            }
            let close = if p.len() > word.len() {
                one_deletion_apart(p, word)
            } else {
                one_deletion_apart(word, p)
            };
            if close {
                return vec![AttributedWord::new(p, player, true)];
            }
        }

        // Rule 6: insert one letter to reach the dictionary.
        if let Some(fixed) = insert_one_letter(word, prev_letters, dict) {
            return vec![AttributedWord::new(fixed, player, true)];
        }

        Vec::new()
    }

    /// Fold the final word set into the confidence tracker.
    fn update_confidence(&mut self, words: &[AttributedWord]) {
        // A word observed both directly and via a correction counts as
        // observed; only all-modified occurrences mark a correction.
        let mut by_text: FxHashMap<&str, bool> = FxHashMap::default();
        for word in words {
            by_text
                .entry(word.text.as_str())
                .and_modify(|m| *m &= word.modified)
                .or_insert(word.modified);
        }
        for (text, all_modified) in &by_text {
            if *all_modified {
                self.confidence.mark_corrected(text);
            } else {
                self.confidence.observe(text);
            }
        }
        let final_set: FxHashSet<&str> = by_text.keys().copied().collect();
        self.confidence.decay_except(&final_set);
    }
}

fn split_parts(parts: Vec<String>, player: usize) -> Vec<AttributedWord> {
    parts
        .into_iter()
        .map(|p| AttributedWord::new(p, player, true))
        .collect()
}

/// Rule 2: write `word` as prefix+suffix or flank+d+flank where `d` is
/// a disappeared word, the other parts are >= 3 letters and dictionary
/// valid or themselves disappeared.
fn resplit_disappeared(
    word: &str,
    disappeared: &[String],
    disappeared_set: &FxHashSet<String>,
    dict: &Dictionary,
) -> Option<Vec<String>> {
    let valid_or_gone = |s: &str| dict.contains(s) || disappeared_set.contains(s);

    for d in disappeared {
        if d.len() < MIN_WORD_LEN || word.len() < d.len() + MIN_WORD_LEN {
            continue;
        }
        if let Some(rest) = word.strip_prefix(d.as_str())
            && valid_or_gone(rest)
        {
            return Some(vec![d.clone(), rest.to_owned()]);
        }
        if let Some(head) = word.strip_suffix(d.as_str())
            && valid_or_gone(head)
        {
            return Some(vec![head.to_owned(), d.clone()]);
        }
    }

    // Middle containment with both flanks >= 3.
    for d in disappeared {
        if d.len() < MIN_WORD_LEN || word.len() < d.len() + 2 * MIN_WORD_LEN {
            continue;
        }
        let mut from = 0;
        while let Some(found) = word[from..].find(d.as_str()) {
            let pos = from + found;
            let head = &word[..pos];
            let tail = &word[pos + d.len()..];
            if head.len() >= MIN_WORD_LEN
                && tail.len() >= MIN_WORD_LEN
                && valid_or_gone(head)
                && valid_or_gone(tail)
            {
                return Some(vec![head.to_owned(), d.clone(), tail.to_owned()]);
            }
            from = pos + 1;
        }
    }

    None
}

/// Rule 3: one cut, both halves >= 3 and dictionary valid; prefer a cut
/// where one half matches a disappeared word, otherwise the first.
fn split_two(
    word: &str,
    disappeared_set: &FxHashSet<String>,
    dict: &Dictionary,
) -> Option<Vec<String>> {
    if word.len() < 2 * MIN_WORD_LEN {
        return None;
    }
    let mut first: Option<(&str, &str)> = None;
    for i in MIN_WORD_LEN..=word.len() - MIN_WORD_LEN {
        let (a, b) = word.split_at(i);
        if dict.contains(a) && dict.contains(b) {
            if disappeared_set.contains(a) || disappeared_set.contains(b) {
                return Some(vec![a.to_owned(), b.to_owned()]);
            }
            if first.is_none() {
                first = Some((a, b));
            }
        }
    }
    first.map(|(a, b)| vec![a.to_owned(), b.to_owned()])
}

/// Rule 4: a cut where one side is dictionary valid and the other side
/// itself splits into dictionary words, up to `depth` cuts.
fn split_chain(word: &str, depth: usize, dict: &Dictionary) -> Option<Vec<String>> {
    if word.len() < 2 * MIN_WORD_LEN {
        return None;
    }
    for i in MIN_WORD_LEN..=word.len() - MIN_WORD_LEN {
        let (a, b) = word.split_at(i);
        if dict.contains(a) && dict.contains(b) {
            return Some(vec![a.to_owned(), b.to_owned()]);
        }
    }
    if depth <= 1 {
        return None;
    }
    for i in MIN_WORD_LEN..=word.len() - MIN_WORD_LEN {
        let (a, b) = word.split_at(i);
        if dict.contains(a)
            && let Some(rest) = split_chain(b, depth - 1, dict)
        {
            let mut parts = vec![a.to_owned()];
            parts.extend(rest);
            return Some(parts);
        }
        if dict.contains(b)
            && let Some(mut parts) = split_chain(a, depth - 1, dict)
        {
            parts.push(b.to_owned());
            return Some(parts);
        }
    }
    None
}

/// Rule 6: insert one letter from the previous loose pool at each
/// position, middle positions first; fall back to frequency-ordered
/// common letters only when no pool letter works.
fn insert_one_letter(word: &str, pool: &str, dict: &Dictionary) -> Option<String> {
    let center = word.len() / 2;
    let mut positions: Vec<usize> = (0..=word.len()).collect();
    positions.sort_by_key(|&i| i.abs_diff(center));

    let mut pool_letters: Vec<u8> = Vec::new();
    for b in pool.bytes() {
        if b.is_ascii_lowercase() && !pool_letters.contains(&b) {
            pool_letters.push(b);
        }
    }

    for &pos in &positions {
        for &letter in &pool_letters {
            let candidate = insert_at(word, pos, letter);
            if candidate.len() >= MIN_WORD_LEN && dict.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    for letter in COMMON_LETTERS.bytes() {
        for &pos in &positions {
            let candidate = insert_at(word, pos, letter);
            if candidate.len() >= MIN_WORD_LEN && dict.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

fn insert_at(word: &str, pos: usize, letter: u8) -> String {
    let mut out = String::with_capacity(word.len() + 1);
    out.push_str(&word[..pos]);
    out.push(letter as char);
    out.push_str(&word[pos..]);
    out
}
