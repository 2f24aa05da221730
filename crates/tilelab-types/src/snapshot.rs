//! Canonical board snapshot and the lenient wire payloads it is parsed from.
//!
//! The vision pipeline pushes snapshots in several equivalent shapes:
//! players-of-word-lists, a bare array of arrays, or a delta form with
//! added/removed words. Loose letters arrive as a string or as an array
//! of characters. All shapes are coerced into one canonical [`Snapshot`]
//! before any correction runs; malformed or missing fields coerce to
//! empty rather than rejecting, because the upstream pipeline produces
//! partial payloads often.

use serde::{Deserialize, Serialize};

/// The canonical normalized snapshot: per-player word lists plus the
/// loose letters on the table. Words are lowercase with non-alphabetic
/// characters stripped; duplicates are allowed within a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// One word list per player, in board order.
    pub players: Vec<Vec<String>>,
    /// Loose letters available on the table, normalized.
    pub letters: String,
}

impl Snapshot {
    /// Flatten all player words into `(word, player index)` pairs.
    pub fn attributed_words(&self) -> impl Iterator<Item = (&str, usize)> {
        self.players
            .iter()
            .enumerate()
            .flat_map(|(i, words)| words.iter().map(move |w| (w.as_str(), i)))
    }

    /// Total number of words across all players.
    pub fn word_count(&self) -> usize {
        self.players.iter().map(Vec::len).sum()
    }
}

/// Loose letters on the wire: either `"abc"` or `["a", "b", "c"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LettersField {
    /// A single string of letters.
    Joined(String),
    /// An array of single-character strings, joined on entry.
    Split(Vec<String>),
}

impl LettersField {
    fn join(&self) -> String {
        match self {
            Self::Joined(s) => s.clone(),
            Self::Split(parts) => parts.concat(),
        }
    }
}

/// One player's words on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPayload {
    /// The words in front of this player.
    #[serde(default)]
    pub words: Vec<String>,
}

/// Lenient wire payload for `POST /update-data`.
///
/// All fields are optional; whichever shape the sender used wins, in
/// the order `players`, `wordsPerPlayer`, delta. A payload with none of
/// them normalizes to an empty snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    /// Players-of-word-lists shape.
    #[serde(default)]
    pub players: Option<Vec<PlayerPayload>>,
    /// Bare array-of-arrays shape.
    #[serde(default)]
    pub words_per_player: Option<Vec<Vec<String>>>,
    /// Delta shape: words that appeared since the previous snapshot.
    #[serde(default)]
    pub added_words: Option<Vec<String>>,
    /// Delta shape: words that vanished since the previous snapshot.
    #[serde(default)]
    pub removed_words: Option<Vec<String>>,
    /// Loose letters, string or array form.
    #[serde(default)]
    pub available_letters: Option<LettersField>,
    /// Alternate key for loose letters used by the array-of-arrays shape.
    #[serde(default)]
    pub available: Option<LettersField>,
}

impl UpdatePayload {
    /// Parse a raw JSON value leniently. Anything that does not
    /// deserialize coerces to the empty payload.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// True when this payload only makes sense relative to a previous
    /// snapshot (delta form with no full word lists).
    pub fn is_delta(&self) -> bool {
        self.players.is_none()
            && self.words_per_player.is_none()
            && (self.added_words.is_some() || self.removed_words.is_some())
    }

    /// Normalize into a canonical [`Snapshot`].
    ///
    /// `previous` is the last normalized snapshot and is the merge
    /// target for the delta form: removals delete the first matching
    /// occurrence from whichever player list contains the word, and
    /// additions append to player 0. When loose letters are absent the
    /// previous pool is kept for deltas and empty otherwise.
    pub fn normalize(&self, previous: &Snapshot) -> Snapshot {
        let letters_field = self.available_letters.as_ref().or(self.available.as_ref());

        if let Some(players) = &self.players {
            return Snapshot {
                players: players
                    .iter()
                    .map(|p| normalize_words(&p.words))
                    .collect(),
                letters: letters_field.map(|f| normalize_letters(&f.join())).unwrap_or_default(),
            };
        }

        if let Some(lists) = &self.words_per_player {
            return Snapshot {
                players: lists.iter().map(|w| normalize_words(w)).collect(),
                letters: letters_field.map(|f| normalize_letters(&f.join())).unwrap_or_default(),
            };
        }

        if self.is_delta() {
            let mut snapshot = previous.clone();
            if let Some(removed) = &self.removed_words {
                for word in normalize_words(removed) {
                    remove_first(&mut snapshot.players, &word);
                }
            }
            if let Some(added) = &self.added_words {
                if snapshot.players.is_empty() {
                    snapshot.players.push(Vec::new());
                }
                snapshot.players[0].extend(normalize_words(added));
            }
            if let Some(field) = letters_field {
                snapshot.letters = normalize_letters(&field.join());
            }
            return snapshot;
        }

        Snapshot {
            players: Vec::new(),
            letters: letters_field.map(|f| normalize_letters(&f.join())).unwrap_or_default(),
        }
    }
}

/// Lowercase a word and strip everything outside `a-z`.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            c.is_ascii_lowercase().then_some(c)
        })
        .collect()
}

/// Normalize a loose-letter pool the same way as a word.
pub fn normalize_letters(letters: &str) -> String {
    normalize_word(letters)
}

fn normalize_words(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| normalize_word(w))
        .filter(|w| !w.is_empty())
        .collect()
}

fn remove_first(players: &mut [Vec<String>], word: &str) {
    for list in players.iter_mut() {
        if let Some(pos) = list.iter().position(|w| w == word) {
            list.remove(pos);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> UpdatePayload {
        UpdatePayload::from_value(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn players_shape_normalizes() {
        let payload = parse(r#"{"players":[{"words":["CAT","dog!"]},{"words":[]}],"availableLetters":"OR"}"#);
        let snapshot = payload.normalize(&Snapshot::default());
        assert_eq!(snapshot.players, vec![vec!["cat".to_owned(), "dog".to_owned()], vec![]]);
        assert_eq!(snapshot.letters, "or");
    }

    #[test]
    fn words_per_player_shape_normalizes() {
        let payload = parse(r#"{"wordsPerPlayer":[["cat"],["boat"]],"available":["o","r"]}"#);
        let snapshot = payload.normalize(&Snapshot::default());
        assert_eq!(snapshot.players, vec![vec!["cat".to_owned()], vec!["boat".to_owned()]]);
        assert_eq!(snapshot.letters, "or");
    }

    #[test]
    fn delta_shape_applies_to_previous() {
        let previous = Snapshot {
            players: vec![vec!["cat".to_owned()], vec!["boat".to_owned()]],
            letters: String::from("xy"),
        };
        let payload = parse(r#"{"addedWords":["dog"],"removedWords":["boat"],"availableLetters":"z"}"#);
        let snapshot = payload.normalize(&previous);
        assert_eq!(
            snapshot.players,
            vec![vec!["cat".to_owned(), "dog".to_owned()], vec![]]
        );
        assert_eq!(snapshot.letters, "z");
    }

    #[test]
    fn delta_without_letters_keeps_previous_pool() {
        let previous = Snapshot {
            players: vec![vec!["cat".to_owned()]],
            letters: String::from("or"),
        };
        let payload = parse(r#"{"addedWords":["act"]}"#);
        let snapshot = payload.normalize(&previous);
        assert_eq!(snapshot.letters, "or");
        assert_eq!(snapshot.players[0], vec!["cat".to_owned(), "act".to_owned()]);
    }

    #[test]
    fn garbage_coerces_to_empty() {
        let payload = UpdatePayload::from_value(serde_json::json!(["not", "an", "object"]));
        let snapshot = payload.normalize(&Snapshot::default());
        assert!(snapshot.players.is_empty());
        assert!(snapshot.letters.is_empty());
    }

    #[test]
    fn empty_object_yields_empty_snapshot() {
        let payload = parse("{}");
        let snapshot = payload.normalize(&Snapshot::default());
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn non_alphabetic_letters_are_stripped() {
        assert_eq!(normalize_letters("A-B c3"), "abc");
        assert_eq!(normalize_word("don't"), "dont");
    }
}
