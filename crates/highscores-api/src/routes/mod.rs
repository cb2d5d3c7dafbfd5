//! HTTP routes.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod scores;

/// Builds the application router: health probes at the root and the score
/// endpoints under `/api/scores`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/scores", scores::router())
        .with_state(state)
}
