//! Per-player multiset diff between consecutive fused states.
//!
//! For each player, `word_added` events cover the words present now but
//! not before and `word_removed` the reverse, counting duplicates.
//! Events for one snapshot are totally ordered by (player index,
//! added-then-removed, word), and timestamps are strictly increasing
//! within a session even when snapshots land on the same millisecond.

use chrono::Utc;
use rustc_hash::FxHashMap;
use tilelab_lexicon::Dictionary;
use tilelab_types::{EventId, MoveEvent, MoveEventType, SessionId};

/// The journal's view of one board: previous per-player word multisets
/// plus the monotonic timestamp cursor.
#[derive(Debug, Clone)]
pub struct MoveJournal {
    session_id: SessionId,
    previous: Vec<FxHashMap<String, u32>>,
    last_timestamp_ms: i64,
}

impl MoveJournal {
    /// A fresh journal for one session.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            previous: Vec::new(),
            last_timestamp_ms: 0,
        }
    }

    /// The session this journal belongs to.
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Diff the fused per-player word lists against the stored previous
    /// sets, emit events, and advance the stored sets.
    pub fn diff(&mut self, players: &[Vec<String>], dict: &Dictionary) -> Vec<MoveEvent> {
        let current: Vec<FxHashMap<String, u32>> =
            players.iter().map(|list| multiset(list)).collect();

        let seats = current.len().max(self.previous.len());
        let empty = FxHashMap::default();
        let mut events = Vec::new();

        for player in 0..seats {
            let curr = current.get(player).unwrap_or(&empty);
            let prev = self.previous.get(player).unwrap_or(&empty);

            let mut added = transitions(curr, prev);
            added.sort_unstable();
            let mut removed = transitions(prev, curr);
            removed.sort_unstable();

            for word in added {
                events.push(self.make_event(MoveEventType::WordAdded, player, word, dict));
            }
            for word in removed {
                events.push(self.make_event(MoveEventType::WordRemoved, player, word, dict));
            }
        }

        self.previous = current;
        events
    }

    fn make_event(
        &mut self,
        event_type: MoveEventType,
        player_index: usize,
        word: String,
        dict: &Dictionary,
    ) -> MoveEvent {
        let now = Utc::now().timestamp_millis();
        let timestamp = now.max(self.last_timestamp_ms + 1);
        self.last_timestamp_ms = timestamp;

        MoveEvent {
            id: EventId::new(),
            session_id: self.session_id,
            monotonic_timestamp: timestamp,
            event_type,
            player_id: format!("player_{player_index}"),
            player_index,
            word_length: word.len(),
            frequency_score: dict.zipf(&word),
            letters_used: MoveEvent::letters_of(&word),
            word,
        }
    }
}

fn multiset(words: &[String]) -> FxHashMap<String, u32> {
    let mut set = FxHashMap::default();
    for word in words {
        *set.entry(word.clone()).or_insert(0) += 1;
    }
    set
}

/// Words in `a` beyond their count in `b`, one entry per surplus copy.
fn transitions(a: &FxHashMap<String, u32>, b: &FxHashMap<String, u32>) -> Vec<String> {
    let mut out = Vec::new();
    for (word, &count) in a {
        let other = b.get(word).copied().unwrap_or(0);
        for _ in other..count {
            out.push(word.clone());
        }
    }
    out
}
