//! Backend binary for the tilelab classroom word game.
//!
//! This is the main entry point that wires together the dictionary,
//! the solver worker, the journal persistence, and the HTTP serving
//! layer. It loads configuration, initializes all subsystems, and runs
//! until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `tilelab.yaml` (PORT env override)
//! 3. Load the dictionary and frequency table
//! 4. Reload the vocabulary aggregate from disk
//! 5. Create the push broadcast channel and solver request queue
//! 6. Spawn the solver worker
//! 7. Spawn the HTTP server
//! 8. Wait for Ctrl-C, then cancel the worker and let it flush

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tilelab_core::{GameConfig, GameSession, SolverWorker};
use tilelab_journal::{EventLog, VocabularyAggregator};
use tilelab_lexicon::Dictionary;
use tilelab_observer::state::BROADCAST_CAPACITY;
use tilelab_observer::{AppState, ServerConfig, spawn_observer};
use tilelab_types::SessionId;
use tokio::sync::{RwLock, broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading or server startup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("tilelab-engine starting");

    // 2. Load configuration.
    let config =
        GameConfig::load_or_default(Path::new("tilelab.yaml")).map_err(EngineError::Config)?;
    info!(
        host = config.server.host,
        port = config.server.port,
        save_interval_secs = config.journal.save_interval_secs,
        "configuration loaded"
    );

    // 3. Load the dictionary and frequency table.
    let dict = Arc::new(Dictionary::load(
        &config.data.words_path,
        &config.data.frequencies_path,
    ));
    info!(
        words = dict.len(),
        frequencies = dict.has_frequencies(),
        "dictionary loaded"
    );

    // 4. Reload the vocabulary aggregate.
    let aggregator = Arc::new(RwLock::new(VocabularyAggregator::load_or_default(
        &config.data.aggregate_path,
    )));
    info!(
        players = aggregator.read().await.players.len(),
        "vocabulary aggregate loaded"
    );

    // 5. Create channels.
    let (push_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
    let (worker_tx, worker_rx) = mpsc::channel(config.solver.queue_depth);

    // 6. Spawn the solver worker.
    let session_id = SessionId::new();
    let session = GameSession::new(
        Arc::clone(&dict),
        session_id,
        config.scoring,
        config.solver.max_unique_words,
    );
    let worker = SolverWorker::new(
        session,
        push_tx.clone(),
        Arc::clone(&aggregator),
        EventLog::new(&config.data.event_log_path, config.journal.batch_size),
        config.data.aggregate_path.clone(),
        Duration::from_secs(config.journal.save_interval_secs),
    );
    let shutdown = CancellationToken::new();
    let worker_handle = tokio::spawn(worker.run(worker_rx, shutdown.clone()));
    info!(%session_id, "solver worker started");

    // 7. Spawn the HTTP server.
    let state = Arc::new(AppState::new(
        push_tx,
        worker_tx,
        Arc::clone(&aggregator),
        config.data.event_log_path.clone(),
        config.data.definitions_path.clone(),
        Duration::from_millis(config.solver.request_timeout_ms),
    ));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let server_handle = spawn_observer(server_config, state)
        .await
        .map_err(EngineError::Server)?;
    info!(port = config.server.port, "serving");

    // 8. Wait for Ctrl-C, then shut down in order: stop the worker so
    //    it flushes the event log and rewrites the aggregate, then
    //    drop the server.
    tokio::signal::ctrl_c().await?;
    info!("interrupt received, shutting down");

    shutdown.cancel();
    if let Err(e) = worker_handle.await {
        tracing::warn!(error = %e, "solver worker did not stop cleanly");
    }
    server_handle.abort();

    info!("tilelab-engine shutdown complete");
    Ok(())
}
