//! Axum router construction.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for the browser front-ends.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the backend.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /receive-data` -- `WebSocket` push channel
/// - `POST /update-data` -- snapshot ingress
/// - `POST /update-image` -- image relay
/// - `GET /definition/{word}` -- definition lookup
/// - `GET /analytics` -- full aggregator snapshot
/// - `GET /analytics/summary` -- compact roll-up
/// - `GET /analytics/player/{id}` -- per-player snapshot
/// - `GET /analytics/move-log` -- persisted journal events
///
/// CORS allows any origin: the classroom front-ends are served from
/// arbitrary local hosts.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Push channel
        .route("/receive-data", get(ws::receive_data))
        // Ingress
        .route("/update-data", post(handlers::update_data))
        .route("/update-image", post(handlers::update_image))
        // Lookups and analytics
        .route("/definition/{word}", get(handlers::get_definition))
        .route("/analytics", get(handlers::analytics))
        .route("/analytics/summary", get(handlers::analytics_summary))
        .route("/analytics/player/{id}", get(handlers::analytics_player))
        .route("/analytics/move-log", get(handlers::analytics_move_log))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
