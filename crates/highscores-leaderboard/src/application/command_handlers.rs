//! Command handlers for the Leaderboard context.
//!
//! This module contains application-level command handler functions that
//! apply submission defaults and persist the result through the repository.

use highscores_core::clock::Clock;
use highscores_core::command::Command;
use highscores_core::error::DomainError;
use highscores_core::repository::ScoreRepository;
use highscores_core::score::{NewScore, ScoreRecord};
use tracing::info;

use crate::domain::commands::SubmitScore;

/// Handles the `SubmitScore` command: trims the names, stamps `achieved_at`
/// with the clock when absent, and inserts the score.
///
/// Returns the persisted record including its assigned id and `created_at`.
///
/// # Errors
///
/// Returns `DomainError` if the insert fails.
pub async fn handle_submit_score(
    command: &SubmitScore,
    clock: &dyn Clock,
    repo: &dyn ScoreRepository,
) -> Result<ScoreRecord, DomainError> {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        player_name = %command.player_name,
        game_name = %command.game_name,
        score = command.score,
        "submitting score"
    );

    let new_score = NewScore {
        player_name: command.player_name.trim().to_owned(),
        game_name: command.game_name.trim().to_owned(),
        score: command.score,
        achieved_at: command.achieved_at.unwrap_or_else(|| clock.now()),
    };

    let record = repo.insert(new_score).await?;

    info!(
        correlation_id = %command.correlation_id(),
        score_id = record.id,
        "score submitted"
    );

    Ok(record)
}
