//! Server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_observer`] which launches the HTTP + `WebSocket`
//! server on a background Tokio task so it runs concurrently with the
//! solver worker.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError, start_server};
use crate::state::AppState;

/// Errors that can occur when spawning the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the HTTP server on a background Tokio task.
///
/// Returns a [`JoinHandle`] so the caller can manage the server's
/// lifecycle alongside the solver worker. The server runs until the
/// Tokio runtime shuts down or the task is aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] when the configured address does
/// not parse; bind failures surface in the background task's log.
pub async fn spawn_observer(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Catch obvious misconfigurations before spawning the task.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let port = config.port;
    let handle = tokio::spawn(async move {
        if let Err(e) = start_server(&config, state).await {
            tracing::error!(error = %e, "server exited with error");
        }
    });

    tracing::info!(port, "server spawned on background task");

    Ok(handle)
}
