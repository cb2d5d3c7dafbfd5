//! Sample leaderboard data for local development.

use chrono::Duration;
use highscores_core::clock::Clock;
use highscores_core::error::DomainError;
use highscores_core::repository::ScoreRepository;
use highscores_leaderboard::application::command_handlers::handle_submit_score;
use highscores_leaderboard::domain::commands::SubmitScore;
use tracing::info;
use uuid::Uuid;

/// (player, game, score, hours before now)
const SAMPLE_SCORES: &[(&str, &str, i64, i64)] = &[
    ("GhostReaper", "Operation Nightfall", 145_820, 24),
    ("ShadowSniper", "Operation Nightfall", 142_150, 23),
    ("PhantomElite", "Operation Nightfall", 138_490, 22),
    ("ViperStrike", "Operation Nightfall", 135_280, 21),
    ("StealthNinja", "Operation Nightfall", 132_760, 20),
    ("TacticalWolf", "Operation Nightfall", 129_450, 19),
    ("NightHawk47", "Operation Nightfall", 126_890, 18),
    ("DeltaForce", "Operation Nightfall", 124_320, 17),
    ("ApexPredator", "Operation Nightfall", 121_750, 16),
    ("WarMachine", "Operation Nightfall", 119_180, 15),
    ("GhostReaper", "Shadow Protocol", 98_500, 14),
    ("ShadowSniper", "Shadow Protocol", 95_200, 13),
    ("PhantomElite", "Shadow Protocol", 91_800, 12),
];

/// Inserts the sample scores unless the store already holds any game.
/// Returns how many scores were inserted.
///
/// # Errors
///
/// Returns `DomainError` if a repository call fails.
pub async fn seed_sample_scores(
    clock: &dyn Clock,
    repo: &dyn ScoreRepository,
) -> Result<usize, DomainError> {
    if !repo.distinct_game_names().await?.is_empty() {
        info!("score table not empty, skipping sample data");
        return Ok(0);
    }

    let now = clock.now();
    for &(player_name, game_name, score, hours_ago) in SAMPLE_SCORES {
        let command = SubmitScore {
            correlation_id: Uuid::new_v4(),
            player_name: player_name.to_owned(),
            game_name: game_name.to_owned(),
            score,
            achieved_at: Some(now - Duration::hours(hours_ago)),
        };
        handle_submit_score(&command, clock, repo).await?;
    }

    info!(count = SAMPLE_SCORES.len(), "sample scores inserted");
    Ok(SAMPLE_SCORES.len())
}
