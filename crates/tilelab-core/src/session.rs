//! The per-snapshot solver pipeline.
//!
//! One [`GameSession`] owns every mutable tracker: the fusion filter,
//! the subset cache, and the journal's previous-word sets. Processing a
//! snapshot runs fusion, diffs the journal, enumerates and ranks
//! constructions, and assembles the broadcast payload. The pipeline is
//! infallible by design -- fusion passes input through at worst and the
//! construction engine's empty result is valid -- so trackers only ever
//! advance together with a produced result.

use std::sync::Arc;

use serde_json::json;
use tilelab_builder::{ScoreConfig, SubsetCache, rank, recommend, unique_player_words};
use tilelab_fusion::BoardFilter;
use tilelab_journal::MoveJournal;
use tilelab_lexicon::{Dictionary, LetterCounts};
use tilelab_types::{BoardUpdate, MoveEvent, PlayerWords, SessionId, Snapshot};

/// The result of processing one snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotOutcome {
    /// Broadcast payload, without the analytics block (the worker
    /// attaches it after folding events into the aggregator).
    pub update: BoardUpdate,
    /// Journal events the snapshot produced, in journal order.
    pub events: Vec<MoveEvent>,
}

/// All solver-owned state for one board.
pub struct GameSession {
    dict: Arc<Dictionary>,
    filter: BoardFilter,
    cache: SubsetCache,
    journal: MoveJournal,
    scoring: ScoreConfig,
    max_unique_words: usize,
}

impl GameSession {
    /// Create a session against a loaded dictionary.
    pub fn new(
        dict: Arc<Dictionary>,
        session_id: SessionId,
        scoring: ScoreConfig,
        max_unique_words: usize,
    ) -> Self {
        Self {
            dict,
            filter: BoardFilter::new(),
            cache: SubsetCache::new(),
            journal: MoveJournal::new(session_id),
            scoring,
            max_unique_words,
        }
    }

    /// The session identifier.
    pub const fn session_id(&self) -> SessionId {
        self.journal.session_id()
    }

    /// Run the full pipeline for one normalized snapshot.
    pub fn process_snapshot(&mut self, snapshot: &Snapshot) -> SnapshotOutcome {
        let fused = self.filter.fuse(snapshot, &self.dict);
        let players = fused.player_lists(snapshot.players.len());

        let events = self.journal.diff(&players, &self.dict);

        let unique = unique_player_words(&players, self.max_unique_words);
        let loose = LetterCounts::from_word(&fused.letters);
        let found = recommend(&unique, &loose, &self.dict, &mut self.cache);
        let ranked = rank(found, &self.dict, &self.scoring);

        let mut recommended_words = serde_json::Map::new();
        let mut letters_to_steal = serde_json::Map::new();
        for rec in &ranked {
            let blocks: Vec<String> = rec.blocks.iter().map(|b| b.render()).collect();
            recommended_words.insert(rec.word.clone(), json!(blocks));
            letters_to_steal.insert(rec.word.clone(), json!(rec.letters_to_steal()));
        }

        let update = BoardUpdate {
            players: players
                .into_iter()
                .map(|words| PlayerWords { words })
                .collect(),
            available_letters: fused.letters,
            recommended_words,
            letters_to_steal,
            analytics: None,
        };

        tracing::debug!(
            words = update.players.iter().map(|p| p.words.len()).sum::<usize>(),
            recommendations = update.recommended_words.len(),
            events = events.len(),
            "snapshot processed"
        );

        SnapshotOutcome { update, events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilelab_types::MoveEventType;

    fn dict() -> Arc<Dictionary> {
        Arc::new(
            Dictionary::from_words([
                "cat", "act", "actor", "car", "dog", "boat", "aboard", "hello", "hex",
            ])
            .with_frequencies([
                (String::from("cat"), 5.5),
                (String::from("act"), 5.2),
                (String::from("actor"), 4.8),
                (String::from("car"), 5.6),
                (String::from("dog"), 5.4),
                (String::from("boat"), 4.9),
                (String::from("hello"), 6.0),
                (String::from("hex"), 3.0),
            ]),
        )
    }

    fn session() -> GameSession {
        GameSession::new(dict(), SessionId::new(), ScoreConfig::default(), 16)
    }

    fn snap(players: &[&[&str]], letters: &str) -> Snapshot {
        Snapshot {
            players: players
                .iter()
                .map(|p| p.iter().map(|&w| w.to_owned()).collect())
                .collect(),
            letters: letters.to_owned(),
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_update() {
        let mut session = session();
        let outcome = session.process_snapshot(&snap(&[], ""));
        assert!(outcome.update.recommended_words.is_empty());
        assert!(outcome.events.is_empty());
        assert!(outcome.update.players.is_empty());
    }

    #[test]
    fn word_plus_letters_recommends_actor() {
        let mut session = session();
        let outcome = session.process_snapshot(&snap(&[&["cat"]], "or"));

        let actor = outcome.update.recommended_words.get("actor").unwrap();
        assert_eq!(actor, &json!(["cat", "o", "r"]));
        assert_eq!(outcome.update.letters_to_steal.get("actor"), Some(&json!(2)));
        assert!(!outcome.update.recommended_words.contains_key("act"));

        // The first snapshot journals one add per word.
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].event_type, MoveEventType::WordAdded);
        assert_eq!(outcome.events[0].word, "cat");
    }

    #[test]
    fn substituted_word_journals_add_and_remove() {
        let mut session = session();
        session.process_snapshot(&snap(&[&["cat"]], "or"));
        let outcome = session.process_snapshot(&snap(&[&["car"]], ""));

        let shape: Vec<(MoveEventType, &str)> = outcome
            .events
            .iter()
            .map(|e| (e.event_type, e.word.as_str()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (MoveEventType::WordAdded, "car"),
                (MoveEventType::WordRemoved, "cat"),
            ]
        );
        assert_eq!(outcome.update.players[0].words, vec!["car".to_owned()]);
        assert_eq!(outcome.update.available_letters, "");
    }

    #[test]
    fn merged_reading_produces_no_events() {
        let mut session = session();
        session.process_snapshot(&snap(&[&["cat", "act"]], ""));
        let outcome = session.process_snapshot(&snap(&[&["catact"]], ""));
        assert!(outcome.events.is_empty(), "fused state is unchanged");
        assert_eq!(
            outcome.update.players[0].words,
            vec!["cat".to_owned(), "act".to_owned()]
        );
    }

    #[test]
    fn recommendations_order_by_score() {
        let mut session = session();
        let outcome = session.process_snapshot(&snap(&[], "helloxyz"));
        let words: Vec<&String> = outcome.update.recommended_words.keys().collect();
        let hello = words.iter().position(|w| *w == "hello").unwrap();
        let hex = words.iter().position(|w| *w == "hex").unwrap();
        assert!(hello < hex, "hello must rank above hex");
    }

    #[test]
    fn identical_snapshots_produce_identical_recommendations() {
        let mut session = session();
        let snapshot = snap(&[&["cat", "boat"]], "or");
        let first = session.process_snapshot(&snapshot);
        let second = session.process_snapshot(&snapshot);
        assert_eq!(first.update, second.update);
        assert!(second.events.is_empty());
    }

    #[test]
    fn no_partial_word_use_across_players() {
        let mut session = session();
        let outcome = session.process_snapshot(&snap(&[&["cat"], &["boat"]], "or"));
        assert!(!outcome.update.recommended_words.contains_key("aboard"));
        assert!(outcome.update.recommended_words.contains_key("actor"));
    }
}
