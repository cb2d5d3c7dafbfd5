//! Score repository abstraction.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::score::{NewScore, ScoreFilter, ScoreRecord};

/// Repository trait for storing and querying score records.
///
/// Implementations own id assignment and the `created_at` stamp. They hold no
/// defaulting logic of their own: every field of a `NewScore` is written as
/// given.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Insert a new score, returning it with its assigned id and `created_at`.
    async fn insert(&self, score: NewScore) -> Result<ScoreRecord, DomainError>;

    /// Fetch a score by id. Returns `Ok(None)` when no such record exists.
    async fn find_by_id(&self, id: i64) -> Result<Option<ScoreRecord>, DomainError>;

    /// Fetch one page of the scores matching `filter`, highest score first.
    /// Equal scores keep insertion order.
    async fn find_page(
        &self,
        filter: &ScoreFilter,
        request: PageRequest,
    ) -> Result<Page<ScoreRecord>, DomainError>;

    /// Fetch the `limit` highest scores for a game. Equal scores are ordered
    /// by earliest `achieved_at` first.
    async fn find_top_for_game(
        &self,
        game_name: &str,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, DomainError>;

    /// Distinct game names, sorted byte-wise.
    async fn distinct_game_names(&self) -> Result<Vec<String>, DomainError>;

    /// Distinct player names, sorted byte-wise.
    async fn distinct_player_names(&self) -> Result<Vec<String>, DomainError>;

    /// Highest score a player has in a game, or `None` if they have none.
    async fn max_score(
        &self,
        player_name: &str,
        game_name: &str,
    ) -> Result<Option<i64>, DomainError>;

    /// Number of scores matching `filter`.
    async fn count(&self, filter: &ScoreFilter) -> Result<u64, DomainError>;

    /// Round-trip to the backing store to confirm it is reachable.
    async fn health_check(&self) -> Result<(), DomainError>;
}
