//! The construction engine.
//!
//! Given a fused snapshot, enumerate every dictionary word of length
//! >= 3 a student could build *by adding* -- strictly more than what is
//! already on the table. A construction is an ordered list of at least
//! two building blocks, each either a whole player word (all letters
//! consumed) or a single loose letter; a construction made purely of
//! loose letters that merely rearranges one existing player word is
//! forbidden.
//!
//! The search precomputes a letter-count vector for every subset of the
//! unique player words (the subset cache), rejects candidates against
//! the combined pool in O(26), then scans subsets high-to-low so the
//! chosen construction uses as many player words as possible.

pub mod cache;
pub mod scoring;
pub mod search;

pub use cache::{CacheOutcome, SubsetCache};
pub use scoring::{ScoreConfig, rank};
pub use search::{Block, Recommendation, recommend, unique_player_words};
