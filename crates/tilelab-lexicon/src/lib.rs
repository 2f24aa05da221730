//! Dictionary index and letter arithmetic for the tilelab backend.
//!
//! Everything combinatorial in the solver runs on 26-wide letter-count
//! vectors: strings are parsed once on entry and reconstructed once on
//! output. The dictionary is loaded once at process start and immutable
//! thereafter; it carries precomputed per-word count vectors, a
//! `(first letter, length)` index for candidate enumeration, and the
//! Zipf frequency map used for scoring and vocabulary statistics.

pub mod dictionary;
pub mod letters;

mod embedded;

pub use dictionary::{Dictionary, LexiconError};
pub use letters::LetterCounts;
