//! Shared type definitions for the tilelab backend.
//!
//! This crate is the single source of truth for the types that cross
//! crate boundaries: entity identifiers, move journal events, the
//! canonical board snapshot with its lenient wire forms, and the
//! messages pushed to live observers.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for events and sessions
//! - [`events`] -- Move journal event types
//! - [`snapshot`] -- Canonical snapshot plus lenient wire payloads
//! - [`push`] -- Push-channel message envelope and board update payload

pub mod events;
pub mod ids;
pub mod push;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use events::{MoveEvent, MoveEventType};
pub use ids::{EventId, SessionId};
pub use push::{BoardAnalytics, BoardUpdate, ImagePayload, PlayerWords, PushMessage};
pub use snapshot::{Snapshot, UpdatePayload, normalize_letters, normalize_word};
