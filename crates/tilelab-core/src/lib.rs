//! Session orchestration for the tilelab backend.
//!
//! Ties the domain crates together: [`GameConfig`] carries the typed
//! configuration, [`GameSession`] runs the per-snapshot pipeline
//! (fusion, journal diff, construction search, scoring), and
//! [`SolverWorker`] drives one session from a FIFO request queue so all
//! mutable solver state is touched from exactly one task.

pub mod config;
pub mod session;
pub mod worker;

pub use config::{ConfigError, GameConfig};
pub use session::{GameSession, SnapshotOutcome};
pub use worker::{SnapshotReply, SolverWorker, WorkerRequest};
