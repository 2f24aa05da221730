//! Per-word confidence tracking.
//!
//! Directly observed words start at full confidence. A fusion
//! correction that rewrites a word leaves the corrected word at 0.5 and
//! flagged as modified; subsequent direct re-observation raises it in
//! steps of 0.25 back to 1.0, and non-observation decays it by 0.1 per
//! step until the entry is dropped.

use rustc_hash::{FxHashMap, FxHashSet};

/// Confidence gained per re-observation of a tracked word.
const OBSERVE_STEP: f32 = 0.25;
/// Confidence lost per step a tracked word goes unobserved.
const DECAY_STEP: f32 = 0.1;
/// Confidence assigned to a freshly corrected word.
const CORRECTED: f32 = 0.5;

/// Confidence entry for one tracked word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordConfidence {
    /// Belief in the word's presence, in `[0.0, 1.0]`.
    pub confidence: f32,
    /// Whether the entry was produced by a fusion correction.
    pub was_modified: bool,
}

/// Confidence entries keyed by lowercase word.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceMap {
    entries: FxHashMap<String, WordConfidence>,
}

impl ConfidenceMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a direct observation: new entries start at 1.0, existing
    /// ones rise by 0.25 up to 1.0. An entry that reaches full
    /// confidence sheds its modified flag.
    pub fn observe(&mut self, word: &str) {
        match self.entries.get_mut(word) {
            Some(entry) => {
                entry.confidence = (entry.confidence + OBSERVE_STEP).min(1.0);
                if entry.confidence >= 1.0 {
                    entry.was_modified = false;
                }
            }
            None => {
                self.entries.insert(
                    word.to_owned(),
                    WordConfidence {
                        confidence: 1.0,
                        was_modified: false,
                    },
                );
            }
        }
    }

    /// Record that a correction produced this word.
    pub fn mark_corrected(&mut self, word: &str) {
        self.entries.insert(
            word.to_owned(),
            WordConfidence {
                confidence: CORRECTED,
                was_modified: true,
            },
        );
    }

    /// Decay every tracked word not in `observed` by 0.1, dropping
    /// entries that reach zero.
    pub fn decay_except(&mut self, observed: &FxHashSet<&str>) {
        self.entries.retain(|word, entry| {
            if observed.contains(word.as_str()) {
                return true;
            }
            entry.confidence -= DECAY_STEP;
            entry.confidence > 1e-6
        });
    }

    /// Look up the entry for a word.
    pub fn get(&self, word: &str) -> Option<&WordConfidence> {
        self.entries.get(word)
    }

    /// Number of tracked words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no words are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed<'a>(words: &[&'a str]) -> FxHashSet<&'a str> {
        words.iter().copied().collect()
    }

    #[test]
    fn direct_observation_starts_full() {
        let mut map = ConfidenceMap::new();
        map.observe("cat");
        let entry = map.get("cat").unwrap();
        assert!((entry.confidence - 1.0).abs() < f32::EPSILON);
        assert!(!entry.was_modified);
    }

    #[test]
    fn correction_then_reobservation_recovers() {
        let mut map = ConfidenceMap::new();
        map.mark_corrected("cat");
        assert_eq!(
            map.get("cat"),
            Some(&WordConfidence {
                confidence: 0.5,
                was_modified: true
            })
        );

        map.observe("cat");
        assert!((map.get("cat").unwrap().confidence - 0.75).abs() < 1e-6);
        assert!(map.get("cat").unwrap().was_modified);

        map.observe("cat");
        let entry = map.get("cat").unwrap();
        assert!((entry.confidence - 1.0).abs() < 1e-6);
        assert!(!entry.was_modified, "full confidence clears the flag");
    }

    #[test]
    fn decay_drops_entries_at_zero() {
        let mut map = ConfidenceMap::new();
        map.mark_corrected("cat");
        for _ in 0..4 {
            map.decay_except(&observed(&[]));
        }
        assert!((map.get("cat").unwrap().confidence - 0.1).abs() < 1e-5);
        map.decay_except(&observed(&[]));
        assert!(map.get("cat").is_none(), "entry dropped at zero");
    }

    #[test]
    fn decay_spares_observed_words() {
        let mut map = ConfidenceMap::new();
        map.observe("cat");
        map.observe("dog");
        map.decay_except(&observed(&["cat"]));
        assert!((map.get("cat").unwrap().confidence - 1.0).abs() < f32::EPSILON);
        assert!((map.get("dog").unwrap().confidence - 0.9).abs() < 1e-6);
    }
}
