//! Commands for the Leaderboard context.

use chrono::{DateTime, Utc};
use highscores_core::command::Command;
use uuid::Uuid;

/// Command to record a new score.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The player who achieved the score. Trimmed before storage.
    pub player_name: String,
    /// The game the score was achieved in. Trimmed before storage.
    pub game_name: String,
    /// The score value.
    pub score: i64,
    /// When the score was achieved; defaults to the submission time.
    pub achieved_at: Option<DateTime<Utc>>,
}

impl Command for SubmitScore {
    fn command_type(&self) -> &'static str {
        "leaderboard.submit_score"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
