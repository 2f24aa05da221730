//! Push-channel messages for live observers.
//!
//! One WebSocket connection at `/receive-data` carries three logical
//! topics, distinguished by the `type` tag: `data` (the full per-snapshot
//! board update), `move-log` (newly emitted journal events), and `image`
//! (metadata-wrapped board photos). The student view, validation view,
//! and teacher dashboard all subscribe to the same stream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events::MoveEvent;

/// Echo of one player's fused word list in the broadcast payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerWords {
    /// The words currently attributed to this player.
    pub words: Vec<String>,
}

/// Optional analytics block attached to a board update for the teacher view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardAnalytics {
    /// Number of journal events this snapshot produced.
    pub changes: usize,
    /// Aggregator snapshot view at the time of the update.
    pub vocabulary_stats: Value,
}

/// The full result of one processed snapshot, broadcast on the `data` topic.
///
/// `recommended_words` preserves insertion order, which is descending
/// score order; each construction is rendered as its block list, where a
/// multi-letter entry is a whole player word and a single-letter entry
/// is a loose letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// Fused per-player word lists.
    pub players: Vec<PlayerWords>,
    /// Normalized loose letters.
    #[serde(rename = "availableLetters")]
    pub available_letters: String,
    /// Target word to ordered building blocks, best first.
    pub recommended_words: serde_json::Map<String, Value>,
    /// Target word to the number of loose letters its construction takes.
    #[serde(rename = "lettersToSteal")]
    pub letters_to_steal: serde_json::Map<String, Value>,
    /// Teacher-view analytics, omitted when empty.
    #[serde(rename = "_analytics", skip_serializing_if = "Option::is_none")]
    pub analytics: Option<BoardAnalytics>,
}

/// Image metadata relayed on the `image` topic. The backend never
/// interprets image content; it wraps and forwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Milliseconds since the Unix epoch at relay time.
    pub timestamp: i64,
    /// Arbitrary metadata, with a `base64` field for raw uploads.
    pub data: Value,
    /// Whether the upstream pipeline marked the image as processed.
    pub processed: bool,
}

/// Envelope for every message on the push channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PushMessage {
    /// Full snapshot result.
    #[serde(rename = "data")]
    Data(BoardUpdate),
    /// Newly emitted journal events.
    #[serde(rename = "move-log")]
    MoveLog {
        /// Events for the snapshot, in journal order.
        entries: Vec<MoveEvent>,
    },
    /// Board image relay.
    #[serde(rename = "image")]
    Image(ImagePayload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_message_carries_type_tag() {
        let msg = PushMessage::Data(BoardUpdate::default());
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "data");
        assert_eq!(value["availableLetters"], "");
    }

    #[test]
    fn move_log_message_tag() {
        let msg = PushMessage::MoveLog { entries: Vec::new() };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "move-log");
        assert!(value["entries"].as_array().unwrap().is_empty());
    }

    #[test]
    fn recommended_words_preserve_insertion_order() {
        let mut update = BoardUpdate::default();
        update
            .recommended_words
            .insert(String::from("hello"), serde_json::json!(["hel", "l", "o"]));
        update
            .recommended_words
            .insert(String::from("hex"), serde_json::json!(["h", "e", "x"]));
        let json = serde_json::to_string(&update).unwrap();
        let hello = json.find("hello").unwrap();
        let hex = json.find("hex").unwrap();
        assert!(hello < hex, "score order must survive serialization");
    }

    #[test]
    fn analytics_block_is_omitted_when_absent() {
        let update = BoardUpdate::default();
        let json = serde_json::to_string(&update).unwrap();
        assert!(!json.contains("_analytics"));
    }
}
