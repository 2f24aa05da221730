//! Integration tests for the HTTP endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, with a real solver worker behind the queue.
//! This validates handler logic and routing without needing a live
//! network connection.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tilelab_builder::ScoreConfig;
use tilelab_core::{GameSession, SolverWorker};
use tilelab_journal::{EventLog, VocabularyAggregator};
use tilelab_lexicon::Dictionary;
use tilelab_observer::build_router;
use tilelab_observer::state::AppState;
use tilelab_types::{PushMessage, SessionId};
use tokio::sync::{RwLock, broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

struct TestHarness {
    router: axum::Router,
    push_rx: broadcast::Receiver<PushMessage>,
    _dir: tempfile::TempDir,
}

fn make_harness() -> TestHarness {
    let dir = tempfile::tempdir().unwrap();
    let event_log_path = dir.path().join("log.jsonl");
    let aggregate_path = dir.path().join("aggregate.json");
    let definitions_path = dir.path().join("definitions.json");
    std::fs::write(
        &definitions_path,
        r#"{"cat": "a small domesticated feline"}"#,
    )
    .unwrap();

    let dict = Arc::new(
        Dictionary::from_words(["cat", "act", "actor", "car", "dog", "hello", "hex"])
            .with_frequencies([
                (String::from("cat"), 5.5),
                (String::from("actor"), 4.8),
                (String::from("hello"), 6.0),
                (String::from("hex"), 3.0),
            ]),
    );

    let session = GameSession::new(
        Arc::clone(&dict),
        SessionId::new(),
        ScoreConfig::default(),
        16,
    );
    let (push_tx, push_rx) = broadcast::channel(64);
    let aggregator = Arc::new(RwLock::new(VocabularyAggregator::new()));
    let (worker_tx, worker_rx) = mpsc::channel(8);

    let worker = SolverWorker::new(
        session,
        push_tx.clone(),
        Arc::clone(&aggregator),
        EventLog::new(&event_log_path, 1),
        aggregate_path,
        Duration::from_secs(30),
    );
    tokio::spawn(worker.run(worker_rx, CancellationToken::new()));

    let state = Arc::new(AppState::new(
        push_tx,
        worker_tx,
        aggregator,
        event_log_path,
        definitions_path,
        Duration::from_secs(5),
    ));

    TestHarness {
        router: build_router(state),
        push_rx,
        _dir: dir,
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(router: &axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn get_json(router: &axum::Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn index_returns_html() {
    let harness = make_harness();
    let response = harness
        .router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("tilelab"));
}

#[tokio::test]
async fn update_data_processes_snapshot() {
    let mut harness = make_harness();
    let (status, body) = post_json(
        &harness.router,
        "/update-data",
        serde_json::json!({
            "players": [{"words": ["cat"]}],
            "availableLetters": "or"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["broadcast"], 1);

    let PushMessage::Data(update) = harness.push_rx.recv().await.unwrap() else {
        panic!("expected data message");
    };
    assert!(update.recommended_words.contains_key("actor"));
}

#[tokio::test]
async fn update_data_tolerates_garbage() {
    let harness = make_harness();
    let response = harness
        .router
        .clone()
        .oneshot(
            Request::post("/update-data")
                .body(Body::from("this is not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn update_image_relays_metadata() {
    let mut harness = make_harness();
    let (status, body) = post_json(
        &harness.router,
        "/update-image",
        serde_json::json!({"processed": true, "camera": "oak-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["broadcast"], 1);

    let PushMessage::Image(image) = harness.push_rx.recv().await.unwrap() else {
        panic!("expected image message");
    };
    assert!(image.processed);
    assert_eq!(image.data["camera"], "oak-1");
    assert!(image.timestamp > 0);
}

#[tokio::test]
async fn update_image_wraps_raw_bytes_as_base64() {
    let mut harness = make_harness();
    let response = harness
        .router
        .clone()
        .oneshot(
            Request::post("/update-image")
                .header("content-type", "application/octet-stream")
                .body(Body::from(vec![0xde, 0xad, 0xbe, 0xef]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let PushMessage::Image(image) = harness.push_rx.recv().await.unwrap() else {
        panic!("expected image message");
    };
    assert_eq!(image.data["base64"], "3q2+7w==");
    assert!(!image.processed);
}

#[tokio::test]
async fn definition_lookup_hits_and_misses() {
    let harness = make_harness();

    let (status, body) = get_json(&harness.router, "/definition/cat").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["word"], "cat");
    assert_eq!(body["definition"], "a small domesticated feline");

    let (status, body) = get_json(&harness.router, "/definition/zebra").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["definition"], Value::Null);
}

#[tokio::test]
async fn analytics_reflects_processed_snapshots() {
    let harness = make_harness();
    post_json(
        &harness.router,
        "/update-data",
        serde_json::json!({
            "players": [{"words": ["cat"]}, {"words": ["dog"]}],
            "availableLetters": ""
        }),
    )
    .await;

    let (status, body) = get_json(&harness.router, "/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalWords"], 2);
    assert!(body["data"]["players"]["player_0"].is_object());

    let (status, body) = get_json(&harness.router, "/analytics/player/player_1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalWords"], 1);

    let (status, _) = get_json(&harness.router, "/analytics/player/player_9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(&harness.router, "/analytics/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["players"], 2);
}

#[tokio::test]
async fn move_log_endpoint_returns_persisted_events() {
    let harness = make_harness();
    post_json(
        &harness.router,
        "/update-data",
        serde_json::json!({
            "players": [{"words": ["cat"]}],
            "availableLetters": ""
        }),
    )
    .await;
    post_json(
        &harness.router,
        "/update-data",
        serde_json::json!({
            "players": [{"words": ["car"]}],
            "availableLetters": ""
        }),
    )
    .await;

    let (status, body) = get_json(&harness.router, "/analytics/move-log").await;
    assert_eq!(status, StatusCode::OK);
    let events = body["data"]["events"].as_array().unwrap();
    assert!(events.len() >= 3, "add cat, add car, remove cat");
    // Newest last: the file appends chronologically.
    let first_ts = events.first().unwrap()["monotonicTimestamp"].as_i64().unwrap();
    let last_ts = events.last().unwrap()["monotonicTimestamp"].as_i64().unwrap();
    assert!(first_ts < last_ts);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let harness = make_harness();
    let response = harness
        .router
        .clone()
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
