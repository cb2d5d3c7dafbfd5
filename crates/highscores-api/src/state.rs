//! Shared application state.

use std::sync::Arc;

use highscores_core::clock::Clock;
use highscores_core::repository::ScoreRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to stamp submissions that omit `achievedAt`.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Score persistence.
    pub score_repository: Arc<dyn ScoreRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        score_repository: Arc<dyn ScoreRepository>,
    ) -> Self {
        Self {
            clock,
            score_repository,
        }
    }
}
