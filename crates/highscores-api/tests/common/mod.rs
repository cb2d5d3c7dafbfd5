//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use highscores_core::clock::Clock;
use highscores_store::pg_score_repository::PgScoreRepository;
use highscores_test_support::FixedClock;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use highscores_api::routes;
use highscores_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock::default_instant())
}

/// Build the full app router with a real `PgScoreRepository` and a fixed
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let score_repository = Arc::new(PgScoreRepository::new(pool));
    routes::app(AppState::new(fixed_clock(), score_repository))
}

/// Send a request and return the status and raw body bytes.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, body_bytes.to_vec())
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let (status, body_bytes) = send(app, request).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body_bytes) = get_raw(app, uri).await;
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the raw body, for responses without JSON.
pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Submit a score through the API and return the created record.
pub async fn submit(
    pool: &PgPool,
    player_name: &str,
    game_name: &str,
    score: i64,
    achieved_at: &str,
) -> serde_json::Value {
    let (status, json) = post_json(
        build_test_app(pool.clone()),
        "/api/scores/submit",
        &serde_json::json!({
            "playerName": player_name,
            "gameName": game_name,
            "score": score,
            "achievedAt": achieved_at
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json
}
