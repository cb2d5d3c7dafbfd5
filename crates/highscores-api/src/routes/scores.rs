//! Routes for the Leaderboard context.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDateTime, Utc};
use highscores_core::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Page, PageRequest};
use highscores_core::score::ScoreRecord;
use highscores_leaderboard::application::{command_handlers, query_handlers};
use highscores_leaderboard::application::query_handlers::{GameStatistics, PlayerStatistics};
use highscores_leaderboard::domain::commands::SubmitScore;
use highscores_leaderboard::domain::validation;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

const DEFAULT_TOP_LIMIT: u32 = 10;

const NO_HIGH_SCORE_MESSAGE: &str = "No scores found for this player in this game";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for submitting a score.
///
/// Every field is optional at the serde level so that missing values are
/// reported as field-level validation errors rather than body parse errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreRequest {
    /// The player who achieved the score.
    pub player_name: Option<String>,
    /// The game the score was achieved in.
    pub game_name: Option<String>,
    /// The score value.
    pub score: Option<i64>,
    /// When the score was achieved. RFC 3339, or a bare local date-time
    /// which is read as UTC.
    #[serde(default, deserialize_with = "deserialize_achieved_at")]
    pub achieved_at: Option<DateTime<Utc>>,
}

fn deserialize_achieved_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_achieved_at(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("achievedAt is not a timestamp: {raw:?}")))
}

fn parse_achieved_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// A stored score.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub id: i64,
    pub player_name: String,
    pub game_name: String,
    pub score: i64,
    pub achieved_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<ScoreRecord> for ScoreResponse {
    fn from(record: ScoreRecord) -> Self {
        Self {
            id: record.id,
            player_name: record.player_name,
            game_name: record.game_name,
            score: record.score,
            achieved_at: record.achieved_at,
            created_at: record.created_at,
        }
    }
}

/// Pagination envelope shared by every list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub scores: Vec<ScoreResponse>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<Page<ScoreRecord>> for PageResponse {
    fn from(page: Page<ScoreRecord>) -> Self {
        let total_elements = page.total_elements;
        let total_pages = page.total_pages();
        let current_page = page.current_page();
        let page_size = page.page_size();
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        Self {
            scores: page.items.into_iter().map(ScoreResponse::from).collect(),
            total_elements,
            total_pages,
            current_page,
            page_size,
            has_next,
            has_previous,
        }
    }
}

/// Response for a player's best score in a game. Exactly one of
/// `high_score` and `message` is set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighScoreResponse {
    pub player_name: String,
    pub game_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `?page=&size=` query parameters. Empty values fall back to the defaults.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<u32>,
}

impl PageParams {
    fn into_request(self) -> Result<PageRequest, ApiError> {
        Ok(PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )?)
    }
}

/// `?limit=` query parameter. An empty value falls back to the default.
#[derive(Debug, Deserialize)]
pub struct TopParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("{raw:?} is not a number: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /submit
#[instrument(skip(state, body))]
async fn submit_score(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SubmitScoreRequest>,
) -> Result<(StatusCode, Json<ScoreResponse>), ApiError> {
    let player_name = validation::validate_name("playerName", body.player_name.as_deref())?;
    let game_name = validation::validate_name("gameName", body.game_name.as_deref())?;
    let score = validation::require_score(body.score)?;

    let command = SubmitScore {
        correlation_id: Uuid::new_v4(),
        player_name: player_name.to_owned(),
        game_name: game_name.to_owned(),
        score,
        achieved_at: body.achieved_at,
    };
    let record = command_handlers::handle_submit_score(
        &command,
        state.clock.as_ref(),
        state.score_repository.as_ref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ScoreResponse::from(record))))
}

/// GET /player/{player_name}
#[instrument(skip(state))]
async fn scores_by_player(
    State(state): State<AppState>,
    ApiPath(player_name): ApiPath<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse>, ApiError> {
    validation::validate_lookup_name("playerName", &player_name)?;
    let page = query_handlers::list_scores_by_player(
        &player_name,
        params.into_request()?,
        state.score_repository.as_ref(),
    )
    .await?;
    Ok(Json(PageResponse::from(page)))
}

/// GET /game/{game_name}
#[instrument(skip(state))]
async fn scores_by_game(
    State(state): State<AppState>,
    ApiPath(game_name): ApiPath<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse>, ApiError> {
    validation::validate_lookup_name("gameName", &game_name)?;
    let page = query_handlers::list_scores_by_game(
        &game_name,
        params.into_request()?,
        state.score_repository.as_ref(),
    )
    .await?;
    Ok(Json(PageResponse::from(page)))
}

/// GET /player/{player_name}/game/{game_name}
#[instrument(skip(state))]
async fn scores_by_player_and_game(
    State(state): State<AppState>,
    ApiPath((player_name, game_name)): ApiPath<(String, String)>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> Result<Json<PageResponse>, ApiError> {
    validation::validate_lookup_name("playerName", &player_name)?;
    validation::validate_lookup_name("gameName", &game_name)?;
    let page = query_handlers::list_scores_by_player_and_game(
        &player_name,
        &game_name,
        params.into_request()?,
        state.score_repository.as_ref(),
    )
    .await?;
    Ok(Json(PageResponse::from(page)))
}

/// GET /game/{game_name}/top
#[instrument(skip(state))]
async fn top_scores(
    State(state): State<AppState>,
    ApiPath(game_name): ApiPath<String>,
    ApiQuery(params): ApiQuery<TopParams>,
) -> Result<Json<Vec<ScoreResponse>>, ApiError> {
    validation::validate_lookup_name("gameName", &game_name)?;
    let records = query_handlers::top_scores_for_game(
        &game_name,
        params.limit.unwrap_or(DEFAULT_TOP_LIMIT),
        state.score_repository.as_ref(),
    )
    .await?;
    Ok(Json(records.into_iter().map(ScoreResponse::from).collect()))
}

/// GET /games
#[instrument(skip(state))]
async fn all_games(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let games = query_handlers::all_games(state.score_repository.as_ref()).await?;
    Ok(Json(games))
}

/// GET /players
#[instrument(skip(state))]
async fn all_players(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let players = query_handlers::all_players(state.score_repository.as_ref()).await?;
    Ok(Json(players))
}

/// GET /player/{player_name}/game/{game_name}/high-score
///
/// A player with no score in the game is not an error: the response is a
/// 200 carrying an explanatory message instead of `highScore`.
#[instrument(skip(state))]
async fn high_score(
    State(state): State<AppState>,
    ApiPath((player_name, game_name)): ApiPath<(String, String)>,
) -> Result<Json<HighScoreResponse>, ApiError> {
    validation::validate_lookup_name("playerName", &player_name)?;
    validation::validate_lookup_name("gameName", &game_name)?;
    let best =
        query_handlers::player_high_score(&player_name, &game_name, state.score_repository.as_ref())
            .await?;

    let message = best.is_none().then(|| NO_HIGH_SCORE_MESSAGE.to_owned());
    Ok(Json(HighScoreResponse {
        player_name,
        game_name,
        high_score: best,
        message,
    }))
}

/// GET /game/{game_name}/stats
#[instrument(skip(state))]
async fn game_stats(
    State(state): State<AppState>,
    ApiPath(game_name): ApiPath<String>,
) -> Result<Json<GameStatistics>, ApiError> {
    validation::validate_lookup_name("gameName", &game_name)?;
    let stats = query_handlers::game_statistics(&game_name, state.score_repository.as_ref()).await?;
    Ok(Json(stats))
}

/// GET /player/{player_name}/stats
#[instrument(skip(state))]
async fn player_stats(
    State(state): State<AppState>,
    ApiPath(player_name): ApiPath<String>,
) -> Result<Json<PlayerStatistics>, ApiError> {
    validation::validate_lookup_name("playerName", &player_name)?;
    let stats =
        query_handlers::player_statistics(&player_name, state.score_repository.as_ref()).await?;
    Ok(Json(stats))
}

/// GET /id/{id}
///
/// Unknown ids get a bare 404 with an empty body.
#[instrument(skip(state))]
async fn score_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Response, ApiError> {
    let found = query_handlers::score_by_id(id, state.score_repository.as_ref()).await?;
    Ok(match found {
        Some(record) => Json(ScoreResponse::from(record)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// Returns the router for the leaderboard context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submit_score))
        .route("/games", get(all_games))
        .route("/players", get(all_players))
        .route("/id/{id}", get(score_by_id))
        .route("/player/{player_name}", get(scores_by_player))
        .route("/player/{player_name}/stats", get(player_stats))
        .route(
            "/player/{player_name}/game/{game_name}",
            get(scores_by_player_and_game),
        )
        .route(
            "/player/{player_name}/game/{game_name}/high-score",
            get(high_score),
        )
        .route("/game/{game_name}", get(scores_by_game))
        .route("/game/{game_name}/top", get(top_scores))
        .route("/game/{game_name}/stats", get(game_stats))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use chrono::{Duration, TimeZone};
    use highscores_core::repository::ScoreRepository;
    use highscores_core::score::NewScore;
    use highscores_test_support::{FailingScoreRepository, FixedClock, InMemoryScoreRepository};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn app_with(repo: Arc<dyn ScoreRepository>) -> Router {
        let state = AppState::new(Arc::new(FixedClock::default_instant()), repo);
        router().with_state(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body_bytes.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
        post_raw(app, uri, &body.to_string()).await
    }

    async fn seeded(rows: &[(&str, &str, i64)]) -> Arc<InMemoryScoreRepository> {
        let repo = Arc::new(InMemoryScoreRepository::new());
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for (i, (player_name, game_name, score)) in rows.iter().enumerate() {
            repo.insert(NewScore {
                player_name: (*player_name).to_owned(),
                game_name: (*game_name).to_owned(),
                score: *score,
                achieved_at: base + Duration::minutes(i64::try_from(i).unwrap()),
            })
            .await
            .unwrap();
        }
        repo
    }

    #[test]
    fn test_parse_achieved_at_accepts_rfc3339_and_naive() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();

        assert_eq!(parse_achieved_at("2026-03-01T12:30:00Z"), Some(expected));
        assert_eq!(parse_achieved_at("2026-03-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse_achieved_at("2026-03-01T12:30:00"), Some(expected));
        assert_eq!(parse_achieved_at("yesterday"), None);
    }

    #[tokio::test]
    async fn test_submit_returns_201_with_defaults_applied() {
        // Arrange
        let repo = Arc::new(InMemoryScoreRepository::new());
        let app = app_with(repo.clone());

        // Act
        let (status, json) = post_json(
            app,
            "/submit",
            &json!({"playerName": "  Alice ", "gameName": "Tetris", "score": 1500}),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["id"], 1);
        assert_eq!(json["playerName"], "Alice");
        assert_eq!(json["gameName"], "Tetris");
        assert_eq!(json["score"], 1500);
        assert_eq!(json["achievedAt"], "2026-01-15T10:00:00Z");
        assert_eq!(repo.records().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_supplied_achieved_at() {
        let app = app_with(Arc::new(InMemoryScoreRepository::new()));

        let (status, json) = post_json(
            app,
            "/submit",
            &json!({
                "playerName": "Bob",
                "gameName": "Pong",
                "score": -5,
                "achievedAt": "2025-12-31T23:59:00"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["score"], -5);
        assert_eq!(json["achievedAt"], "2025-12-31T23:59:00Z");
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_player_name() {
        let repo = Arc::new(InMemoryScoreRepository::new());
        let app = app_with(repo.clone());

        let (status, json) = post_json(
            app,
            "/submit",
            &json!({"playerName": "   ", "gameName": "Tetris", "score": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["field"], "playerName");
        assert!(repo.records().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_game_and_score() {
        let (status, json) = post_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/submit",
            &json!({"playerName": "Alice", "score": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "gameName");

        let (status, json) = post_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/submit",
            &json!({"playerName": "Alice", "gameName": "Tetris"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "score");
    }

    #[tokio::test]
    async fn test_submit_rejects_overlong_name() {
        let (status, json) = post_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/submit",
            &json!({"playerName": "x".repeat(101), "gameName": "Tetris", "score": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "playerName");
    }

    #[tokio::test]
    async fn test_submit_rejects_nul_in_name() {
        let repo = Arc::new(InMemoryScoreRepository::new());

        let (status, json) = post_raw(
            app_with(repo.clone()),
            "/submit",
            r#"{"playerName":"al\u0000ice","gameName":"chess","score":1}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "playerName");
        assert!(repo.records().is_empty());
    }

    #[tokio::test]
    async fn test_path_names_with_nul_are_rejected() {
        let cases = [
            ("/player/al%00ice/stats", "playerName"),
            ("/player/al%00ice", "playerName"),
            ("/game/ch%00ess", "gameName"),
            ("/game/ch%00ess/top", "gameName"),
            ("/game/ch%00ess/stats", "gameName"),
            ("/player/alice/game/ch%00ess", "gameName"),
            ("/player/al%00ice/game/chess/high-score", "playerName"),
        ];
        for (uri, field) in cases {
            let (status, json) = get_json(app_with(Arc::new(FailingScoreRepository)), uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(json["field"], field, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_submit_malformed_body_is_validation_error() {
        let (status, json) = post_raw(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/submit",
            "{not json",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "body");
    }

    #[tokio::test]
    async fn test_submit_store_failure_is_500() {
        let (status, json) = post_json(
            app_with(Arc::new(FailingScoreRepository)),
            "/submit",
            &json!({"playerName": "Alice", "gameName": "Tetris", "score": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }

    #[tokio::test]
    async fn test_player_listing_uses_envelope_and_defaults() {
        let repo = seeded(&[
            ("Alice", "Tetris", 100),
            ("Alice", "Pong", 300),
            ("Bob", "Tetris", 999),
            ("Alice", "Tetris", 200),
        ])
        .await;

        let (status, json) = get_json(app_with(repo), "/player/Alice").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalElements"], 3);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["currentPage"], 0);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["hasPrevious"], false);
        let scores: Vec<i64> = json["scores"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["score"].as_i64().unwrap())
            .collect();
        assert_eq!(scores, vec![300, 200, 100]);
    }

    #[tokio::test]
    async fn test_game_listing_pages() {
        let repo = seeded(&[
            ("A", "Tetris", 1),
            ("B", "Tetris", 2),
            ("C", "Tetris", 3),
            ("D", "Tetris", 4),
            ("E", "Tetris", 5),
        ])
        .await;

        let (status, json) = get_json(app_with(repo), "/game/Tetris?page=1&size=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalElements"], 5);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrevious"], true);
        assert_eq!(json["scores"][0]["score"], 3);
        assert_eq!(json["scores"][1]["score"], 2);
    }

    #[tokio::test]
    async fn test_player_and_game_listing_filters_both() {
        let repo = seeded(&[
            ("Alice", "Tetris", 10),
            ("Alice", "Pong", 20),
            ("Bob", "Tetris", 30),
        ])
        .await;

        let (status, json) = get_json(app_with(repo), "/player/Alice/game/Tetris").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["scores"][0]["score"], 10);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let (status, json) = get_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/game/Tetris?size=0",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "size");
    }

    #[tokio::test]
    async fn test_empty_query_values_use_defaults() {
        let repo = seeded(&[("A", "Tetris", 1), ("B", "Tetris", 2)]).await;

        let (status, json) = get_json(app_with(repo.clone()), "/game/Tetris?page=&size=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["currentPage"], 0);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["totalElements"], 2);

        let (status, json) = get_json(app_with(repo), "/game/Tetris/top?limit=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_numeric_page_is_query_error() {
        let (status, json) = get_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/game/Tetris?page=abc",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "query");
    }

    #[tokio::test]
    async fn test_top_scores_is_bare_list_with_limit() {
        let repo = seeded(&[
            ("A", "Tetris", 50),
            ("B", "Tetris", 70),
            ("C", "Tetris", 70),
            ("D", "Tetris", 10),
        ])
        .await;

        let (status, json) = get_json(app_with(repo), "/game/Tetris/top?limit=3").await;

        assert_eq!(status, StatusCode::OK);
        let top = json.as_array().unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0]["playerName"], "B");
        assert_eq!(top[1]["playerName"], "C");
        assert_eq!(top[2]["playerName"], "A");
    }

    #[tokio::test]
    async fn test_top_scores_zero_limit_is_rejected() {
        let (status, json) = get_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/game/Tetris/top?limit=0",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "limit");
    }

    #[tokio::test]
    async fn test_games_and_players_are_sorted_and_distinct() {
        let repo = seeded(&[
            ("bob", "Zelda", 1),
            ("Alice", "Asteroids", 2),
            ("Bob", "Zelda", 3),
        ])
        .await;

        let (_, games) = get_json(app_with(repo.clone()), "/games").await;
        let (_, players) = get_json(app_with(repo), "/players").await;

        assert_eq!(games, json!(["Asteroids", "Zelda"]));
        assert_eq!(players, json!(["Alice", "Bob", "bob"]));
    }

    #[tokio::test]
    async fn test_high_score_present_and_absent() {
        let repo = seeded(&[("Alice", "Tetris", 10), ("Alice", "Tetris", 40)]).await;

        let (status, json) =
            get_json(app_with(repo.clone()), "/player/Alice/game/Tetris/high-score").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({"playerName": "Alice", "gameName": "Tetris", "highScore": 40})
        );

        let (status, json) = get_json(app_with(repo), "/player/Alice/game/Pong/high-score").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "playerName": "Alice",
                "gameName": "Pong",
                "message": "No scores found for this player in this game"
            })
        );
    }

    #[tokio::test]
    async fn test_stats_endpoints() {
        let repo = seeded(&[
            ("Alice", "Tetris", 10),
            ("Bob", "Tetris", 90),
            ("Alice", "Pong", 5),
        ])
        .await;

        let (status, game) = get_json(app_with(repo.clone()), "/game/Tetris/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            game,
            json!({"gameName": "Tetris", "totalScores": 2, "highestScore": 90})
        );

        let (status, player) = get_json(app_with(repo.clone()), "/player/Alice/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(player, json!({"playerName": "Alice", "totalScores": 2}));

        let (_, empty) = get_json(app_with(repo), "/game/Missing/stats").await;
        assert_eq!(empty["totalScores"], 0);
        assert!(empty["highestScore"].is_null());
    }

    #[tokio::test]
    async fn test_score_by_id_found_and_missing() {
        let repo = seeded(&[("Alice", "Tetris", 10)]).await;

        let (status, json) = get_json(app_with(repo.clone()), "/id/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["playerName"], "Alice");

        let request = Request::builder().uri("/id/42").body(Body::empty()).unwrap();
        let (status, bytes) = send(app_with(repo), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_score_by_id_non_numeric_is_path_error() {
        let (status, json) = get_json(
            app_with(Arc::new(InMemoryScoreRepository::new())),
            "/id/abc",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "path");
    }

    #[tokio::test]
    async fn test_reads_surface_store_failure_as_500() {
        for uri in ["/games", "/players", "/player/Alice", "/id/1", "/game/Tetris/top"] {
            let (status, _) = get_json(app_with(Arc::new(FailingScoreRepository)), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        }
    }
}
