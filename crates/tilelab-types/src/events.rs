//! Move journal event types.
//!
//! Every word that appears in front of or disappears from a player
//! between consecutive fused snapshots produces one immutable
//! [`MoveEvent`]. Events are appended to a line-delimited log file and
//! relayed to observers on the `move-log` push topic; the vocabulary
//! aggregator folds them into per-player statistics.

use serde::{Deserialize, Serialize};

use crate::ids::{EventId, SessionId};

/// The kind of per-player transition a journal event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveEventType {
    /// The word entered the player's set.
    WordAdded,
    /// The word left the player's set.
    WordRemoved,
}

/// One append-only record of a word appearing or disappearing from one
/// player's set between consecutive fused states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEvent {
    /// Stable per-event identifier (UUID v7, time-ordered).
    pub id: EventId,
    /// The session this event belongs to.
    pub session_id: SessionId,
    /// Milliseconds since the Unix epoch; strictly increasing within a session.
    pub monotonic_timestamp: i64,
    /// Whether the word was added or removed.
    pub event_type: MoveEventType,
    /// Stable player identifier, `player_{index}`.
    pub player_id: String,
    /// Zero-based index of the player on the board.
    pub player_index: usize,
    /// The word, lowercase.
    pub word: String,
    /// Length of the word in letters.
    pub word_length: usize,
    /// Zipf frequency of the word (0-8 scale, 0.0 when unknown).
    pub frequency_score: f32,
    /// Canonical sorted multiset of the word's letters.
    pub letters_used: Vec<String>,
}

impl MoveEvent {
    /// Build the canonical sorted letter multiset for a word.
    pub fn letters_of(word: &str) -> Vec<String> {
        let mut letters: Vec<String> = word
            .chars()
            .filter(char::is_ascii_lowercase)
            .map(String::from)
            .collect();
        letters.sort_unstable();
        letters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_serializes_snake_case() {
        let json = serde_json::to_string(&MoveEventType::WordAdded).unwrap();
        assert_eq!(json, "\"word_added\"");
        let json = serde_json::to_string(&MoveEventType::WordRemoved).unwrap();
        assert_eq!(json, "\"word_removed\"");
    }

    #[test]
    fn letters_of_is_sorted_multiset() {
        assert_eq!(
            MoveEvent::letters_of("elephant"),
            vec!["a", "e", "e", "h", "l", "n", "p", "t"]
        );
        assert_eq!(MoveEvent::letters_of("cat"), vec!["a", "c", "t"]);
    }

    #[test]
    fn event_wire_shape_is_camel_case() {
        let event = MoveEvent {
            id: EventId::new(),
            session_id: SessionId::new(),
            monotonic_timestamp: 1_700_000_000_000,
            event_type: MoveEventType::WordAdded,
            player_id: String::from("player_0"),
            player_index: 0,
            word: String::from("elephant"),
            word_length: 8,
            frequency_score: 4.5,
            letters_used: MoveEvent::letters_of("elephant"),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["eventType"], "word_added");
        assert_eq!(value["playerId"], "player_0");
        assert_eq!(value["playerIndex"], 0);
        assert_eq!(value["wordLength"], 8);
        assert!((value["frequencyScore"].as_f64().unwrap() - 4.5).abs() < 1e-6);
        assert_eq!(value["lettersUsed"][0], "a");
    }

    #[test]
    fn event_round_trips_through_json_lines() {
        let event = MoveEvent {
            id: EventId::new(),
            session_id: SessionId::new(),
            monotonic_timestamp: 42,
            event_type: MoveEventType::WordRemoved,
            player_id: String::from("player_2"),
            player_index: 2,
            word: String::from("dog"),
            word_length: 3,
            frequency_score: 5.3,
            letters_used: MoveEvent::letters_of("dog"),
        };
        let line = serde_json::to_string(&event).unwrap();
        let back: MoveEvent = serde_json::from_str(&line).unwrap();
        assert_eq!(back, event);
    }
}
