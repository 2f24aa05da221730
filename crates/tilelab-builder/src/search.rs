//! Candidate enumeration and construction search.
//!
//! Candidates come from the dictionary's `(first letter, length)` index
//! and are rejected in O(26) against the combined pool. Each surviving
//! candidate gets a construction: the letters-only fast path first,
//! then a subset-mask scan from all-words down to none so the chosen
//! construction uses as many player words as possible.

use rustc_hash::FxHashSet;
use tilelab_lexicon::{Dictionary, LetterCounts};

use crate::cache::{MAX_UNIQUE_WORDS, SubsetCache};

/// Minimum length of a recommendable target word.
const MIN_TARGET_LEN: usize = 3;
/// Minimum number of building blocks in a construction.
const MIN_BLOCKS: usize = 2;

/// One building block of a construction.
///
/// A one-character string that happens to equal a player word is a
/// `Word` block, not a `Letter` block; the distinction is semantic,
/// not textual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A whole player word, every letter consumed.
    Word(String),
    /// A single letter taken from the loose pool.
    Letter(char),
}

impl Block {
    /// Render the block for the wire payload.
    pub fn render(&self) -> String {
        match self {
            Self::Word(w) => w.clone(),
            Self::Letter(c) => c.to_string(),
        }
    }
}

/// A target word with its single chosen construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// The buildable dictionary word.
    pub word: String,
    /// Ordered building blocks: player words first, then loose letters.
    pub blocks: Vec<Block>,
}

impl Recommendation {
    /// Number of loose letters the construction takes from the table.
    pub fn letters_to_steal(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Letter(_)))
            .count()
    }
}

/// Deduplicate player words across all players in first-seen order,
/// keeping the longest `cap` words when there are too many.
pub fn unique_player_words(players: &[Vec<String>], cap: usize) -> Vec<String> {
    let cap = cap.min(MAX_UNIQUE_WORDS);
    let mut seen = FxHashSet::default();
    let mut unique: Vec<String> = Vec::new();
    for word in players.iter().flatten() {
        if seen.insert(word.as_str()) {
            unique.push(word.clone());
        }
    }
    if unique.len() > cap {
        // Keep the longest `cap` words, preserving first-seen order.
        let mut by_len: Vec<usize> = (0..unique.len()).collect();
        by_len.sort_by_key(|&i| std::cmp::Reverse(unique[i].len()));
        let keep: FxHashSet<usize> = by_len.into_iter().take(cap).collect();
        tracing::debug!(
            dropped = unique.len() - cap,
            "capping unique player words for bounded subset scan"
        );
        unique = unique
            .into_iter()
            .enumerate()
            .filter_map(|(i, w)| keep.contains(&i).then_some(w))
            .collect();
    }
    unique
}

/// Enumerate every buildable target word with its construction.
///
/// `unique` must already be deduplicated (see [`unique_player_words`]).
/// Results are unordered; [`crate::scoring::rank`] orders them.
pub fn recommend(
    unique: &[String],
    loose: &LetterCounts,
    dict: &Dictionary,
    cache: &mut SubsetCache,
) -> Vec<Recommendation> {
    cache.prepare(unique);

    let word_counts = cache.word_letter_counts().to_vec();
    let mut pool = *loose;
    for counts in &word_counts {
        pool.add_assign(counts);
    }
    let total_pool = pool.total() as usize;
    if total_pool < MIN_TARGET_LEN {
        return Vec::new();
    }

    let max_len = total_pool.min(dict.max_len());
    let mut out = Vec::new();

    for first in b'a'..=b'z' {
        if pool.get(first) == 0 {
            continue;
        }
        for len in MIN_TARGET_LEN..=max_len {
            for &idx in dict.candidates(first, len) {
                let target_counts = dict.counts(idx);
                if !pool.covers(target_counts) {
                    continue;
                }
                if let Some(blocks) =
                    construct(target_counts, loose, &word_counts, cache)
                {
                    out.push(Recommendation {
                        word: dict.word(idx).to_owned(),
                        blocks,
                    });
                }
            }
        }
    }

    out
}

/// Find one construction for a formable target, or `None` when every
/// arrangement violates the additivity rules.
fn construct(
    target: &LetterCounts,
    loose: &LetterCounts,
    word_counts: &[LetterCounts],
    cache: &SubsetCache,
) -> Option<Vec<Block>> {
    // Letters-only fast path: buildable from the pool alone, at least
    // two letters, and not a rearrangement of a single player word.
    if loose.covers(target)
        && target.total() as usize >= MIN_BLOCKS
        && !word_counts.iter().any(|pc| pc == target)
    {
        return Some(letter_blocks(target, Vec::new()));
    }

    // Mask scan, high to low: prefer constructions using more player
    // words, which is more informative to the student.
    let mask_count = cache.mask_count();
    for m in (0..mask_count).rev() {
        let entry = cache.mask(m);
        if !target.covers(&entry.counts) {
            continue;
        }
        // covers() guarantees the subtraction cannot underflow.
        let Some(remainder) = target.checked_sub(&entry.counts) else {
            continue;
        };
        if !loose.covers(&remainder) {
            continue;
        }
        let block_count = entry.words.len() + remainder.total() as usize;
        if block_count < MIN_BLOCKS {
            continue;
        }
        // No pure anagram of a single player word.
        if entry.words.is_empty() && word_counts.iter().any(|pc| *pc == remainder) {
            continue;
        }
        let words: Vec<Block> = entry
            .words
            .iter()
            .map(|&i| Block::Word(cache.words()[i as usize].clone()))
            .collect();
        return Some(letter_blocks(&remainder, words));
    }

    None
}

/// Append one `Letter` block per remaining letter, alphabetical order.
fn letter_blocks(remainder: &LetterCounts, mut blocks: Vec<Block>) -> Vec<Block> {
    for (letter, count) in remainder.letters() {
        for _ in 0..count {
            blocks.push(Block::Letter(letter));
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> Dictionary {
        Dictionary::from_words([
            "cat", "act", "actor", "car", "cart", "boat", "aboard", "dog", "hello", "hex", "tab",
            "bat", "star", "fish", "starfish",
        ])
    }

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|&w| w.to_owned()).collect()
    }

    fn run(words: &[&str], letters: &str) -> Vec<Recommendation> {
        let mut cache = SubsetCache::new();
        recommend(
            &owned(words),
            &LetterCounts::from_word(letters),
            &dict(),
            &mut cache,
        )
    }

    fn find<'a>(recs: &'a [Recommendation], word: &str) -> Option<&'a Recommendation> {
        recs.iter().find(|r| r.word == word)
    }

    #[test]
    fn empty_board_yields_nothing() {
        assert!(run(&[], "").is_empty());
    }

    #[test]
    fn single_word_alone_cannot_be_extended() {
        // One block is never a construction (additivity).
        let recs = run(&["cat"], "");
        assert!(recs.is_empty());
    }

    #[test]
    fn word_plus_letters_builds_actor() {
        let recs = run(&["cat"], "or");
        let actor = find(&recs, "actor").expect("actor must be recommended");
        assert_eq!(
            actor.blocks,
            vec![
                Block::Word(String::from("cat")),
                Block::Letter('o'),
                Block::Letter('r'),
            ]
        );
        assert_eq!(actor.letters_to_steal(), 2);
        // "act" is only a rearrangement of "cat"; not recommendable.
        assert!(find(&recs, "act").is_none());
        assert!(find(&recs, "cat").is_none());
    }

    #[test]
    fn no_partial_use_of_player_words() {
        let recs = run(&["cat", "boat"], "or");
        // "aboard" would need letters carved out of "boat"; forbidden.
        assert!(find(&recs, "aboard").is_none());
        assert!(find(&recs, "actor").is_some());
    }

    #[test]
    fn letters_only_construction_allowed_when_not_an_anagram() {
        let recs = run(&["dog"], "hex");
        let hex = find(&recs, "hex").expect("hex from loose letters alone");
        assert_eq!(hex.letters_to_steal(), 3);
        assert!(hex.blocks.iter().all(|b| matches!(b, Block::Letter(_))));
    }

    #[test]
    fn pure_anagram_of_player_word_is_forbidden() {
        // Pool letters can spell "act", but that only rearranges "cat".
        let recs = run(&["cat"], "tac");
        assert!(find(&recs, "act").is_none());
        assert!(find(&recs, "cat").is_none());
    }

    #[test]
    fn word_plus_one_letter_is_a_two_block_construction() {
        let recs = run(&["cat"], "r");
        let cart = find(&recs, "cart").expect("cart = cat + r");
        assert_eq!(
            cart.blocks,
            vec![Block::Word(String::from("cat")), Block::Letter('r')]
        );
        // Letters the pool does not hold stay out of reach.
        assert!(find(&recs, "bat").is_none());
    }

    #[test]
    fn mask_scan_prefers_more_player_words() {
        // "starfish" is also reachable as star + f,i,s,h from the
        // pool, but the scan runs high-to-low and consumes both words.
        let recs = run(&["star", "fish"], "fish");
        let target = find(&recs, "starfish").expect("starfish = star + fish");
        assert_eq!(
            target.blocks,
            vec![
                Block::Word(String::from("star")),
                Block::Word(String::from("fish")),
            ]
        );
        assert_eq!(target.letters_to_steal(), 0);
    }

    #[test]
    fn construction_letters_account_for_target() {
        let recs = run(&["cat", "boat"], "orx");
        for rec in &recs {
            assert!(rec.word.len() >= 3);
            assert!(rec.blocks.len() >= 2);
            let mut sum = LetterCounts::new();
            for block in &rec.blocks {
                match block {
                    Block::Word(w) => sum.add_assign(&LetterCounts::from_word(w)),
                    Block::Letter(c) => {
                        sum.add_assign(&LetterCounts::from_word(&c.to_string()));
                    }
                }
            }
            assert_eq!(sum, LetterCounts::from_word(&rec.word), "{}", rec.word);
            assert_eq!(
                rec.letters_to_steal(),
                rec.blocks
                    .iter()
                    .filter(|b| matches!(b, Block::Letter(_)))
                    .count()
            );
        }
    }

    #[test]
    fn unique_words_dedup_and_cap() {
        let players = vec![
            owned(&["cat", "dog"]),
            owned(&["cat", "elephant"]),
        ];
        let unique = unique_player_words(&players, 16);
        assert_eq!(unique, owned(&["cat", "dog", "elephant"]));

        let unique = unique_player_words(&players, 2);
        assert_eq!(unique, owned(&["cat", "elephant"]));
    }

    #[test]
    fn rerunning_identical_snapshot_is_deterministic() {
        let mut cache = SubsetCache::new();
        let unique = owned(&["cat", "boat"]);
        let loose = LetterCounts::from_word("or");
        let dict = dict();
        let first = recommend(&unique, &loose, &dict, &mut cache);
        let second = recommend(&unique, &loose, &dict, &mut cache);
        assert_eq!(first, second);
    }

    #[test]
    fn cache_extension_yields_same_recommendations_as_cold_build() {
        let dict = dict();
        let loose = LetterCounts::from_word("or");

        let mut warm = SubsetCache::new();
        recommend(&owned(&["cat", "dog", "tab"]), &loose, &dict, &mut warm);
        let extended = recommend(
            &owned(&["cat", "dog", "tab", "boat"]),
            &loose,
            &dict,
            &mut warm,
        );
        assert_eq!(warm.stats().extensions, 1);

        let mut cold = SubsetCache::new();
        let fresh = recommend(
            &owned(&["cat", "dog", "tab", "boat"]),
            &loose,
            &dict,
            &mut cold,
        );

        let mut extended_words: Vec<&str> =
            extended.iter().map(|r| r.word.as_str()).collect();
        let mut fresh_words: Vec<&str> = fresh.iter().map(|r| r.word.as_str()).collect();
        extended_words.sort_unstable();
        fresh_words.sort_unstable();
        assert_eq!(extended_words, fresh_words);
    }
}
