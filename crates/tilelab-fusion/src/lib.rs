//! Temporal fusion filter for noisy board snapshots.
//!
//! Raw vision snapshots suffer three failure modes: a single-letter
//! substitution/insertion/deletion inside a previously-seen word, two
//! adjacent words read as one, and the transient disappearance of a
//! still-present word. [`BoardFilter`] corrects the current snapshot
//! against the previous fused state, a short visibility window, and
//! dictionary membership, producing a fused snapshot that behaves as if
//! the vision were clean.
//!
//! Fusion never fails; at worst the input passes through. Corrections
//! are lossy, preferring stability over flapping.

pub mod confidence;
pub mod edit;
pub mod filter;
pub mod ring;

pub use confidence::{ConfidenceMap, WordConfidence};
pub use filter::{AttributedWord, BoardFilter, FusedBoard};
pub use ring::VisibilityRing;
