//! HTTP and push-channel serving shell for the tilelab backend.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **Snapshot ingress** (`POST /update-data`) feeding the solver
//!   worker through a FIFO queue
//! - **Image relay** (`POST /update-image`) wrapping uploads as
//!   metadata and republishing them
//! - **Push channel** (`GET /receive-data`) carrying `data`,
//!   `move-log`, and `image` messages via [`tokio::sync::broadcast`]
//! - **Analytics REST endpoints** reading the vocabulary aggregator and
//!   the journal's event log
//! - **Definitions lookup** (`GET /definition/{word}`) from a
//!   lazily-cached JSON file
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! Handlers never touch solver state directly: snapshots are queued to
//! the worker and answered via oneshot replies, analytics reads go
//! through a read lock the worker alone writes, and push fan-out uses a
//! broadcast channel with automatic lag handling.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::spawn_observer;
pub use state::AppState;
