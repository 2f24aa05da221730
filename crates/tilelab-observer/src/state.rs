//! Shared application state for the serving layer.
//!
//! [`AppState`] holds the push-channel broadcast sender, the solver
//! request queue, a read handle on the vocabulary aggregator, and the
//! lazily-loaded definitions cache. Handlers clone the [`Arc`] via
//! Axum's `State` extractor; nothing here is mutated by the HTTP layer
//! except the one-shot definitions cache.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::sync::{OnceCell, RwLock, broadcast, mpsc};

use tilelab_core::WorkerRequest;
use tilelab_journal::VocabularyAggregator;
use tilelab_types::{ImagePayload, PushMessage};

/// Capacity of the push broadcast channel. A subscriber that falls
/// behind by more than this many messages skips to the newest.
pub const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
pub struct AppState {
    /// Broadcast sender for push messages (`data`, `move-log`, `image`).
    pub push_tx: broadcast::Sender<PushMessage>,
    /// FIFO queue into the solver worker.
    pub worker_tx: mpsc::Sender<WorkerRequest>,
    /// The vocabulary aggregator; written only by the solver worker.
    pub aggregator: Arc<RwLock<VocabularyAggregator>>,
    /// Path of the journal's event log, for the move-log endpoint.
    pub event_log_path: PathBuf,
    /// Path of the definitions JSON file.
    pub definitions_path: PathBuf,
    /// Per-request ceiling for snapshot processing.
    pub request_timeout: Duration,
    definitions: OnceCell<FxHashMap<String, String>>,
}

impl AppState {
    /// Assemble the serving state.
    pub fn new(
        push_tx: broadcast::Sender<PushMessage>,
        worker_tx: mpsc::Sender<WorkerRequest>,
        aggregator: Arc<RwLock<VocabularyAggregator>>,
        event_log_path: PathBuf,
        definitions_path: PathBuf,
        request_timeout: Duration,
    ) -> Self {
        Self {
            push_tx,
            worker_tx,
            aggregator,
            event_log_path,
            definitions_path,
            request_timeout,
            definitions: OnceCell::new(),
        }
    }

    /// Subscribe to the push channel.
    pub fn subscribe(&self) -> broadcast::Receiver<PushMessage> {
        self.push_tx.subscribe()
    }

    /// Publish an image message to all connected observers.
    ///
    /// Returns the number of receivers; zero subscribers is not an
    /// error.
    pub fn broadcast_image(&self, payload: ImagePayload) -> usize {
        self.push_tx
            .send(PushMessage::Image(payload))
            .unwrap_or(0)
    }

    /// The definitions map, loaded from disk on first use and cached
    /// for the process lifetime. A missing or malformed file yields an
    /// empty map (logged once).
    pub async fn definitions(&self) -> &FxHashMap<String, String> {
        self.definitions
            .get_or_init(|| async {
                match tokio::fs::read_to_string(&self.definitions_path).await {
                    Ok(contents) => match serde_json::from_str(&contents) {
                        Ok(map) => map,
                        Err(e) => {
                            tracing::warn!(
                                path = %self.definitions_path.display(),
                                error = %e,
                                "malformed definitions file, lookups return null"
                            );
                            FxHashMap::default()
                        }
                    },
                    Err(e) => {
                        tracing::warn!(
                            path = %self.definitions_path.display(),
                            error = %e,
                            "definitions file not readable, lookups return null"
                        );
                        FxHashMap::default()
                    }
                }
            })
            .await
    }
}
