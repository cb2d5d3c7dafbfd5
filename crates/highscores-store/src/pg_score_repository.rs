//! `PostgreSQL` implementation of the `ScoreRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;

use highscores_core::error::DomainError;
use highscores_core::pagination::{Page, PageRequest};
use highscores_core::repository::ScoreRepository;
use highscores_core::score::{NewScore, ScoreFilter, ScoreRecord};

/// Row shape of the `game_scores` table.
#[derive(Debug, FromRow)]
struct ScoreRow {
    id: i64,
    player_name: String,
    game_name: String,
    score: i64,
    achieved_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<ScoreRow> for ScoreRecord {
    fn from(row: ScoreRow) -> Self {
        Self {
            id: row.id,
            player_name: row.player_name,
            game_name: row.game_name,
            score: row.score,
            achieved_at: row.achieved_at,
            created_at: row.created_at,
        }
    }
}

/// Maps a driver error to `DomainError::Infrastructure`. The driver detail
/// goes to the log only.
fn infrastructure(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!(operation, error = %e, "score store query failed");
        DomainError::Infrastructure(format!("{operation} failed"))
    }
}

/// PostgreSQL-backed score repository.
#[derive(Debug, Clone)]
pub struct PgScoreRepository {
    pool: PgPool,
}

impl PgScoreRepository {
    /// Creates a new `PgScoreRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreRepository for PgScoreRepository {
    async fn insert(&self, score: NewScore) -> Result<ScoreRecord, DomainError> {
        let row: ScoreRow = sqlx::query_as(
            r"
            INSERT INTO game_scores (player_name, game_name, score, achieved_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, player_name, game_name, score, achieved_at, created_at
            ",
        )
        .bind(&score.player_name)
        .bind(&score.game_name)
        .bind(score.score)
        .bind(score.achieved_at)
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure("insert score"))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ScoreRecord>, DomainError> {
        let row: Option<ScoreRow> = sqlx::query_as(
            r"
            SELECT id, player_name, game_name, score, achieved_at, created_at
            FROM game_scores
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure("find score by id"))?;

        Ok(row.map(ScoreRecord::from))
    }

    async fn find_page(
        &self,
        filter: &ScoreFilter,
        request: PageRequest,
    ) -> Result<Page<ScoreRecord>, DomainError> {
        let total_elements = self.count(filter).await?;

        let offset = i64::try_from(request.offset()).map_err(|_| {
            DomainError::validation("page", "is beyond the addressable range")
        })?;

        let rows: Vec<ScoreRow> = sqlx::query_as(
            r"
            SELECT id, player_name, game_name, score, achieved_at, created_at
            FROM game_scores
            WHERE ($1::text IS NULL OR player_name = $1)
              AND ($2::text IS NULL OR game_name = $2)
            ORDER BY score DESC, id ASC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(filter.player_name())
        .bind(filter.game_name())
        .bind(i64::from(request.size()))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure("find score page"))?;

        Ok(Page::new(
            rows.into_iter().map(ScoreRecord::from).collect(),
            total_elements,
            request,
        ))
    }

    async fn find_top_for_game(
        &self,
        game_name: &str,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        let rows: Vec<ScoreRow> = sqlx::query_as(
            r"
            SELECT id, player_name, game_name, score, achieved_at, created_at
            FROM game_scores
            WHERE game_name = $1
            ORDER BY score DESC, achieved_at ASC, id ASC
            LIMIT $2
            ",
        )
        .bind(game_name)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure("find top scores"))?;

        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }

    async fn distinct_game_names(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT DISTINCT game_name FROM game_scores ORDER BY game_name")
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure("list game names"))
    }

    async fn distinct_player_names(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT DISTINCT player_name FROM game_scores ORDER BY player_name")
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure("list player names"))
    }

    async fn max_score(
        &self,
        player_name: &str,
        game_name: &str,
    ) -> Result<Option<i64>, DomainError> {
        sqlx::query_scalar(
            "SELECT MAX(score) FROM game_scores WHERE player_name = $1 AND game_name = $2",
        )
        .bind(player_name)
        .bind(game_name)
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure("find max score"))
    }

    async fn count(&self, filter: &ScoreFilter) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM game_scores
            WHERE ($1::text IS NULL OR player_name = $1)
              AND ($2::text IS NULL OR game_name = $2)
            ",
        )
        .bind(filter.player_name())
        .bind(filter.game_name())
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure("count scores"))?;

        // COUNT(*) is never negative.
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(infrastructure("health check"))?;
        Ok(())
    }
}
