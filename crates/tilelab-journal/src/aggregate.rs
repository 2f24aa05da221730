//! Rolling per-player vocabulary statistics.
//!
//! Each `word_added` event bumps the owning player's counters: total
//! words, the unique-word set, a length histogram, and Zipf frequency
//! bands (common >= 5, medium in [3, 5), rare < 3). A session-wide
//! counter tracks how often each word is played across all players.
//! The aggregate is rewritten atomically (write-temp-then-rename) on
//! the save interval and on shutdown, and reloaded at startup;
//! malformed content on disk is ignored with a warning.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tilelab_types::{MoveEvent, MoveEventType};

use crate::error::JournalError;

/// Zipf threshold at and above which a word counts as common.
const COMMON_ZIPF: f32 = 5.0;
/// Zipf threshold at and above which a word counts as medium.
const MEDIUM_ZIPF: f32 = 3.0;

/// Frequency-band counters for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBands {
    /// Words with Zipf >= 5.
    pub common: u32,
    /// Words with Zipf in [3, 5).
    pub medium: u32,
    /// Words with Zipf < 3.
    pub rare: u32,
}

impl FrequencyBands {
    fn bump(&mut self, zipf: f32) {
        if zipf >= COMMON_ZIPF {
            self.common += 1;
        } else if zipf >= MEDIUM_ZIPF {
            self.medium += 1;
        } else {
            self.rare += 1;
        }
    }

    /// Sum across all bands.
    pub const fn total(&self) -> u32 {
        self.common + self.medium + self.rare
    }
}

/// Cumulative statistics for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregate {
    /// Stable player identifier, `player_{index}`.
    pub player_id: String,
    /// Total `word_added` events recorded.
    pub total_words: u32,
    /// Distinct words ever played. Serializes as a sorted array.
    pub unique_words: BTreeSet<String>,
    /// Word count per length.
    pub words_by_length: BTreeMap<usize, u32>,
    /// Word count per frequency band.
    pub words_by_frequency: FrequencyBands,
    /// Running sum of Zipf scores, for the average frequency view.
    pub frequency_sum: f64,
    /// When this player first appeared.
    pub first_seen_at: DateTime<Utc>,
    /// When this player last added a word.
    pub last_seen_at: DateTime<Utc>,
    /// Sessions this player has appeared in.
    pub sessions_participated: BTreeSet<String>,
}

impl PlayerAggregate {
    fn new(player_id: String, at: DateTime<Utc>) -> Self {
        Self {
            player_id,
            total_words: 0,
            unique_words: BTreeSet::new(),
            words_by_length: BTreeMap::new(),
            words_by_frequency: FrequencyBands::default(),
            frequency_sum: 0.0,
            first_seen_at: at,
            last_seen_at: at,
            sessions_participated: BTreeSet::new(),
        }
    }

    /// Derived view for the analytics endpoints and teacher dashboard.
    pub fn view(&self) -> Value {
        let total = self.total_words.max(1) as f64;
        let avg_length: f64 = self
            .words_by_length
            .iter()
            .map(|(&len, &count)| len as f64 * f64::from(count))
            .sum::<f64>()
            / total;
        json!({
            "playerId": self.player_id,
            "totalWords": self.total_words,
            "uniqueCount": self.unique_words.len(),
            "diversity": self.unique_words.len() as f64 / total,
            "avgWordLength": avg_length,
            "avgWordFrequency": self.frequency_sum / total,
            "wordsByLength": self.words_by_length,
            "wordsByFrequency": self.words_by_frequency,
            "firstSeenAt": self.first_seen_at,
            "lastSeenAt": self.last_seen_at,
            "sessionsParticipated": self.sessions_participated,
        })
    }
}

/// Process-wide vocabulary aggregator; owned and mutated only by the
/// solver worker, read by the analytics endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyAggregator {
    /// When this session's aggregation began.
    pub session_started_at: DateTime<Utc>,
    /// Per-player aggregates keyed by player id.
    pub players: BTreeMap<String, PlayerAggregate>,
    /// How often each word has been played across all players.
    pub word_frequency: BTreeMap<String, u32>,
}

impl Default for VocabularyAggregator {
    fn default() -> Self {
        Self {
            session_started_at: Utc::now(),
            players: BTreeMap::new(),
            word_frequency: BTreeMap::new(),
        }
    }
}

impl VocabularyAggregator {
    /// A fresh aggregator starting now.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one journal event into the aggregate. Removals do not
    /// subtract: the statistics describe what was played, not what
    /// remains on the board.
    pub fn record(&mut self, event: &MoveEvent) {
        if event.event_type != MoveEventType::WordAdded {
            return;
        }
        let at = DateTime::from_timestamp_millis(event.monotonic_timestamp)
            .unwrap_or_else(Utc::now);
        let player = self
            .players
            .entry(event.player_id.clone())
            .or_insert_with(|| PlayerAggregate::new(event.player_id.clone(), at));

        player.total_words += 1;
        player.unique_words.insert(event.word.clone());
        *player.words_by_length.entry(event.word_length).or_insert(0) += 1;
        player.words_by_frequency.bump(event.frequency_score);
        player.frequency_sum += f64::from(event.frequency_score);
        player.last_seen_at = at;
        player
            .sessions_participated
            .insert(event.session_id.to_string());

        *self.word_frequency.entry(event.word.clone()).or_insert(0) += 1;
    }

    /// Derived snapshot of one player, if known.
    pub fn player_view(&self, player_id: &str) -> Option<Value> {
        self.players.get(player_id).map(PlayerAggregate::view)
    }

    /// Full derived snapshot: every player view plus session totals.
    pub fn view(&self) -> Value {
        let players: BTreeMap<&String, Value> = self
            .players
            .iter()
            .map(|(id, agg)| (id, agg.view()))
            .collect();
        json!({
            "sessionStartedAt": self.session_started_at,
            "sessionDuration": self.session_duration_secs(),
            "totalWords": self.total_words(),
            "players": players,
            "wordFrequency": self.word_frequency,
        })
    }

    /// Compact roll-up for the teacher view and the `_analytics` block.
    pub fn summary(&self) -> Value {
        json!({
            "players": self.players.len(),
            "totalWords": self.total_words(),
            "sessionDuration": self.session_duration_secs(),
        })
    }

    /// Total `word_added` events across all players.
    pub fn total_words(&self) -> u32 {
        self.players.values().map(|p| p.total_words).sum()
    }

    fn session_duration_secs(&self) -> i64 {
        (Utc::now() - self.session_started_at).num_seconds().max(0)
    }

    /// Atomically rewrite the aggregate file (write-temp-then-rename).
    pub fn save(&self, path: &Path) -> Result<(), JournalError> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let temp = tempfile::NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&temp, self)?;
        temp.persist(path).map_err(|e| JournalError::Io(e.error))?;
        Ok(())
    }

    /// Reload from disk, falling back to a fresh aggregator when the
    /// file is missing or malformed (logged once here).
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "malformed aggregate file ignored"
                    );
                    Self::new()
                }
            },
            Err(_) => Self::new(),
        }
    }
}
