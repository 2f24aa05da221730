//! REST endpoint handlers for the serving layer.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `POST` | `/update-data` | Enqueue a snapshot to the solver |
//! | `POST` | `/update-image` | Wrap and relay a board image |
//! | `GET` | `/definition/{word}` | Static definition lookup |
//! | `GET` | `/analytics` | Full aggregator snapshot |
//! | `GET` | `/analytics/summary` | Compact teacher-view roll-up |
//! | `GET` | `/analytics/player/{id}` | Per-player snapshot |
//! | `GET` | `/analytics/move-log` | Persisted journal events |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::Json;
use base64::Engine as _;
use chrono::Utc;
use tokio::sync::oneshot;

use tilelab_core::WorkerRequest;
use tilelab_journal::EventLog;
use tilelab_types::{ImagePayload, UpdatePayload, normalize_word};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing session status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let aggregator = state.aggregator.read().await;
    let player_count = aggregator.players.len();
    let total_words = aggregator.total_words();
    let subscribers = state.push_tx.receiver_count();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>tilelab</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>tilelab</h1>
    <p>Tile-word game backend</p>

    <div>
        <div class="metric">
            <div class="label">Players</div>
            <div class="value">{player_count}</div>
        </div>
        <div class="metric">
            <div class="label">Words played</div>
            <div class="value">{total_words}</div>
        </div>
        <div class="metric">
            <div class="label">Observers</div>
            <div class="value">{subscribers}</div>
        </div>
    </div>

    <h2>API</h2>
    <ul>
        <li>POST <a href="/update-data">/update-data</a> -- snapshot ingress</li>
        <li>POST <a href="/update-image">/update-image</a> -- image relay</li>
        <li>GET <a href="/analytics">/analytics</a> -- vocabulary statistics</li>
        <li>GET <a href="/analytics/move-log">/analytics/move-log</a> -- journal events</li>
        <li>GET /definition/:word -- word definitions</li>
        <li>WS /receive-data -- live push channel</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// POST /update-data -- snapshot ingress
// ---------------------------------------------------------------------------

/// Enqueue one snapshot to the solver and wait for its reply.
///
/// Malformed bodies coerce to an empty snapshot -- the upstream vision
/// pipeline produces partial payloads often, and rejecting them would
/// only stall the board. A reply slower than the per-request ceiling
/// returns 500; the snapshot still processes and the trackers still
/// advance, only this response is abandoned.
pub async fn update_data(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
    let payload = UpdatePayload::from_value(value);

    let (reply_tx, reply_rx) = oneshot::channel();
    state
        .worker_tx
        .send(WorkerRequest::Snapshot {
            payload,
            reply: reply_tx,
        })
        .await
        .map_err(|_| ApiError::SolverUnavailable)?;

    let reply = tokio::time::timeout(state.request_timeout, reply_rx)
        .await
        .map_err(|_| ApiError::SolverTimeout)?
        .map_err(|_| ApiError::SolverUnavailable)?;

    Ok(Json(serde_json::json!({
        "ok": true,
        "broadcast": reply.broadcast,
    })))
}

// ---------------------------------------------------------------------------
// POST /update-image -- image relay
// ---------------------------------------------------------------------------

/// Wrap an image upload as metadata and republish it on the `image`
/// topic. JSON bodies pass through as metadata; raw bodies are
/// base64-encoded. The backend never inspects image content.
pub async fn update_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let is_json = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    let (data, processed) = if is_json {
        let value: serde_json::Value =
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}));
        let processed = value
            .get("processed")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        (value, processed)
    } else {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&body);
        (serde_json::json!({ "base64": encoded }), false)
    };

    let fan_out = state.broadcast_image(ImagePayload {
        timestamp: Utc::now().timestamp_millis(),
        data,
        processed,
    });

    Json(serde_json::json!({
        "ok": true,
        "broadcast": fan_out,
    }))
}

// ---------------------------------------------------------------------------
// GET /definition/{word} -- static lookup
// ---------------------------------------------------------------------------

/// Look up a word definition. Unknown words (and an absent definitions
/// file) answer `definition: null` rather than an error.
pub async fn get_definition(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> impl IntoResponse {
    let word = normalize_word(&word);
    let definition = state.definitions().await.get(&word).cloned();
    Json(serde_json::json!({
        "ok": true,
        "word": word,
        "definition": definition,
    }))
}

// ---------------------------------------------------------------------------
// GET /analytics -- aggregator snapshot
// ---------------------------------------------------------------------------

/// Return the full vocabulary aggregator snapshot.
pub async fn analytics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let view = state.aggregator.read().await.view();
    Json(serde_json::json!({
        "ok": true,
        "data": view,
    }))
}

/// Return the compact roll-up used by the teacher view.
pub async fn analytics_summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let summary = state.aggregator.read().await.summary();
    Json(serde_json::json!({
        "ok": true,
        "data": summary,
    }))
}

// ---------------------------------------------------------------------------
// GET /analytics/player/{id} -- per-player snapshot
// ---------------------------------------------------------------------------

/// Return one player's vocabulary snapshot.
pub async fn analytics_player(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .aggregator
        .read()
        .await
        .player_view(&player_id)
        .ok_or_else(|| ApiError::NotFound(format!("player {player_id}")))?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "data": view,
    })))
}

// ---------------------------------------------------------------------------
// GET /analytics/move-log -- persisted journal events
// ---------------------------------------------------------------------------

/// Return the persisted journal events, newest last. Events still
/// sitting in the write buffer (at most one batch) appear after the
/// next flush.
pub async fn analytics_move_log(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let events = EventLog::read_all(&state.event_log_path);
    Json(serde_json::json!({
        "ok": true,
        "data": { "events": events },
    }))
}
