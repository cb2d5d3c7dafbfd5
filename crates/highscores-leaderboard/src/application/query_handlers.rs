//! Query handlers for the Leaderboard context.
//!
//! Every handler is a direct pass-through to the repository with at most one
//! aggregation step. Handlers that combine two queries (statistics) issue them
//! independently, so under concurrent submissions the parts may disagree by a
//! row.

use highscores_core::error::DomainError;
use highscores_core::pagination::{Page, PageRequest};
use highscores_core::repository::ScoreRepository;
use highscores_core::score::{ScoreFilter, ScoreRecord};
use serde::Serialize;
use tracing::info;

use crate::domain::validation;

/// Aggregate view of one game's scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatistics {
    /// The game these statistics describe.
    pub game_name: String,
    /// Number of scores recorded for the game.
    pub total_scores: u64,
    /// Best score recorded for the game, `None` when there are no scores.
    pub highest_score: Option<i64>,
}

/// Aggregate view of one player's scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    /// The player these statistics describe.
    pub player_name: String,
    /// Number of scores recorded for the player across all games.
    pub total_scores: u64,
}

/// Lists a player's scores, highest first.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn list_scores_by_player(
    player_name: &str,
    request: PageRequest,
    repo: &dyn ScoreRepository,
) -> Result<Page<ScoreRecord>, DomainError> {
    info!(
        player_name,
        page = request.page(),
        size = request.size(),
        "listing scores for player"
    );
    repo.find_page(&ScoreFilter::Player(player_name.to_owned()), request)
        .await
}

/// Lists a game's scores, highest first.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn list_scores_by_game(
    game_name: &str,
    request: PageRequest,
    repo: &dyn ScoreRepository,
) -> Result<Page<ScoreRecord>, DomainError> {
    info!(
        game_name,
        page = request.page(),
        size = request.size(),
        "listing scores for game"
    );
    repo.find_page(&ScoreFilter::Game(game_name.to_owned()), request)
        .await
}

/// Lists one player's scores in one game, highest first.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn list_scores_by_player_and_game(
    player_name: &str,
    game_name: &str,
    request: PageRequest,
    repo: &dyn ScoreRepository,
) -> Result<Page<ScoreRecord>, DomainError> {
    info!(
        player_name,
        game_name,
        page = request.page(),
        size = request.size(),
        "listing scores for player in game"
    );
    let filter = ScoreFilter::PlayerAndGame {
        player_name: player_name.to_owned(),
        game_name: game_name.to_owned(),
    };
    repo.find_page(&filter, request).await
}

/// Returns the `limit` best scores for a game. Equal scores rank the earlier
/// achievement first.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `limit` is zero, or `DomainError` if
/// the repository query fails.
pub async fn top_scores_for_game(
    game_name: &str,
    limit: u32,
    repo: &dyn ScoreRepository,
) -> Result<Vec<ScoreRecord>, DomainError> {
    info!(game_name, limit, "getting top scores for game");
    let limit = validation::validate_limit(limit)?;
    repo.find_top_for_game(game_name, limit).await
}

/// Returns every game that has at least one score, sorted.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn all_games(repo: &dyn ScoreRepository) -> Result<Vec<String>, DomainError> {
    info!("getting all games");
    repo.distinct_game_names().await
}

/// Returns every player that has at least one score, sorted.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn all_players(repo: &dyn ScoreRepository) -> Result<Vec<String>, DomainError> {
    info!("getting all players");
    repo.distinct_player_names().await
}

/// Returns a player's best score in a game, or `None` if they have not
/// submitted one.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn player_high_score(
    player_name: &str,
    game_name: &str,
    repo: &dyn ScoreRepository,
) -> Result<Option<i64>, DomainError> {
    info!(player_name, game_name, "getting high score");
    repo.max_score(player_name, game_name).await
}

/// Counts a game's scores and finds its best one.
///
/// # Errors
///
/// Returns `DomainError` if either repository query fails.
pub async fn game_statistics(
    game_name: &str,
    repo: &dyn ScoreRepository,
) -> Result<GameStatistics, DomainError> {
    info!(game_name, "getting game statistics");
    let total_scores = repo.count(&ScoreFilter::Game(game_name.to_owned())).await?;
    let highest_score = top_scores_for_game(game_name, 1, repo)
        .await?
        .first()
        .map(|top| top.score);

    Ok(GameStatistics {
        game_name: game_name.to_owned(),
        total_scores,
        highest_score,
    })
}

/// Counts a player's scores across all games.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn player_statistics(
    player_name: &str,
    repo: &dyn ScoreRepository,
) -> Result<PlayerStatistics, DomainError> {
    info!(player_name, "getting player statistics");
    let total_scores = repo
        .count(&ScoreFilter::Player(player_name.to_owned()))
        .await?;

    Ok(PlayerStatistics {
        player_name: player_name.to_owned(),
        total_scores,
    })
}

/// Looks up a single score by id.
///
/// # Errors
///
/// Returns `DomainError` if the repository query fails.
pub async fn score_by_id(
    id: i64,
    repo: &dyn ScoreRepository,
) -> Result<Option<ScoreRecord>, DomainError> {
    info!(score_id = id, "getting score by id");
    repo.find_by_id(id).await
}
