//! `WebSocket` handler for the live push channel.
//!
//! Observers (student view, validation view, teacher dashboard) connect
//! to `GET /receive-data` and receive every [`PushMessage`] as a JSON
//! text frame: `data` per processed snapshot, `move-log` for new
//! journal events, and `image` for board photos. All connections share
//! one broadcast stream; a client that falls behind skips ahead to the
//! newest message.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming push messages.
///
/// # Route
///
/// `GET /receive-data`
pub async fn receive_data(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the `WebSocket` lifecycle: subscribe to the broadcast channel
/// and forward each push message as a text frame.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("push channel client connected");

    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            // Receive a push message from the solver or image relay.
            result = rx.recv() => {
                match result {
                    Ok(message) => {
                        let json = match serde_json::to_string(&message) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("failed to serialize push message: {e}");
                                continue;
                            }
                        };
                        let frame: Message = Message::Text(json.into());
                        if socket.send(frame).await.is_err() {
                            debug!("push channel client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "push channel client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("broadcast channel closed, shutting down push connection");
                        return;
                    }
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("push channel client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("push channel client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("push channel error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore other message types from the client.
                    }
                }
            }
        }
    }
}
