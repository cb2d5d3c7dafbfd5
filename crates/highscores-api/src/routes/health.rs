//! Health check endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Liveness/readiness probe response.
#[derive(Serialize)]
pub struct ProbeResponse {
    /// `UP` or `DOWN`.
    pub status: &'static str,
    /// Why the probe failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/live
async fn liveness() -> Json<ProbeResponse> {
    Json(ProbeResponse {
        status: "UP",
        reason: None,
    })
}

/// GET /health/ready
///
/// Ready only while the score store answers.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ProbeResponse>) {
    match state.score_repository.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ProbeResponse {
                status: "UP",
                reason: None,
            }),
        ),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ProbeResponse {
                    status: "DOWN",
                    reason: Some("score store unreachable".to_owned()),
                }),
            )
        }
    }
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use highscores_core::repository::ScoreRepository;
    use highscores_test_support::{FailingScoreRepository, FixedClock, InMemoryScoreRepository};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_with(score_repository: Arc<dyn ScoreRepository>) -> Router {
        let state = AppState::new(Arc::new(FixedClock::default_instant()), score_repository);
        router().with_state(state)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_liveness_is_always_up() {
        let (status, json) = get(app_with(Arc::new(FailingScoreRepository)), "/health/live").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "UP");
    }

    #[tokio::test]
    async fn test_readiness_up_when_store_answers() {
        let (status, json) = get(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/health/ready",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "UP");
        assert!(json.get("reason").is_none());
    }

    #[tokio::test]
    async fn test_readiness_503_when_store_fails() {
        let (status, json) = get(app_with(Arc::new(FailingScoreRepository)), "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["status"], "DOWN");
        assert!(json["reason"].is_string());
    }
}
