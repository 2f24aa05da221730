//! Move journal and vocabulary aggregation.
//!
//! After fusion, the journal diffs each player's fused word multiset
//! against the stored previous set, emitting `word_added` and
//! `word_removed` events. Events append to a line-delimited log file
//! through a small buffer, and fold into a per-player vocabulary
//! aggregate that drives the teacher dashboard. The aggregate is
//! rewritten atomically to a JSON file every save interval and on
//! shutdown, and reloaded at startup.

pub mod aggregate;
pub mod diff;
pub mod log;

mod error;

pub use aggregate::{FrequencyBands, PlayerAggregate, VocabularyAggregator};
pub use diff::MoveJournal;
pub use error::JournalError;
pub use log::EventLog;
