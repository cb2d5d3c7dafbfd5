//! Test repositories — mock `ScoreRepository` implementations for tests.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use highscores_core::error::DomainError;
use highscores_core::pagination::{Page, PageRequest};
use highscores_core::repository::ScoreRepository;
use highscores_core::score::{NewScore, ScoreFilter, ScoreRecord};

/// A score repository backed by a `Vec`, with the same ordering rules as the
/// `PostgreSQL` store. Ids start at 1 and increase by one per insert.
#[derive(Debug, Default)]
pub struct InMemoryScoreRepository {
    rows: Mutex<Vec<ScoreRecord>>,
    created_at: Option<DateTime<Utc>>,
}

impl InMemoryScoreRepository {
    /// Create an empty repository that stamps `created_at` with the system
    /// time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty repository that stamps every insert with `created_at`.
    #[must_use]
    pub fn with_created_at(created_at: DateTime<Utc>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            created_at: Some(created_at),
        }
    }

    /// Returns a snapshot of all stored records in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.rows.lock().unwrap().clone()
    }

    fn matching(&self, filter: &ScoreFilter) -> Vec<ScoreRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }

    fn distinct(&self, key: impl Fn(&ScoreRecord) -> &str) -> Vec<String> {
        let rows = self.rows.lock().unwrap();
        let names: BTreeSet<&str> = rows.iter().map(key).collect();
        names.into_iter().map(str::to_owned).collect()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn insert(&self, score: NewScore) -> Result<ScoreRecord, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let id = i64::try_from(rows.len()).unwrap() + 1;
        let record = ScoreRecord {
            id,
            player_name: score.player_name,
            game_name: score.game_name,
            score: score.score,
            achieved_at: score.achieved_at,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ScoreRecord>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_page(
        &self,
        filter: &ScoreFilter,
        request: PageRequest,
    ) -> Result<Page<ScoreRecord>, DomainError> {
        let mut matching = self.matching(filter);
        // Stable sort keeps insertion order among equal scores.
        matching.sort_by(|a, b| b.score.cmp(&a.score));

        let total_elements = matching.len() as u64;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(request.size() as usize)
            .collect();

        Ok(Page::new(items, total_elements, request))
    }

    async fn find_top_for_game(
        &self,
        game_name: &str,
        limit: u32,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        let mut matching = self.matching(&ScoreFilter::Game(game_name.to_owned()));
        matching.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.achieved_at.cmp(&b.achieved_at))
                .then(a.id.cmp(&b.id))
        });
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn distinct_game_names(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.distinct(|r| r.game_name.as_str()))
    }

    async fn distinct_player_names(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.distinct(|r| r.player_name.as_str()))
    }

    async fn max_score(
        &self,
        player_name: &str,
        game_name: &str,
    ) -> Result<Option<i64>, DomainError> {
        let filter = ScoreFilter::PlayerAndGame {
            player_name: player_name.to_owned(),
            game_name: game_name.to_owned(),
        };
        Ok(self.matching(&filter).iter().map(|r| r.score).max())
    }

    async fn count(&self, filter: &ScoreFilter) -> Result<u64, DomainError> {
        Ok(self.matching(filter).len() as u64)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A score repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingScoreRepository;

fn connection_refused() -> DomainError {
    DomainError::Infrastructure("connection refused".into())
}

#[async_trait]
impl ScoreRepository for FailingScoreRepository {
    async fn insert(&self, _score: NewScore) -> Result<ScoreRecord, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<ScoreRecord>, DomainError> {
        Err(connection_refused())
    }

    async fn find_page(
        &self,
        _filter: &ScoreFilter,
        _request: PageRequest,
    ) -> Result<Page<ScoreRecord>, DomainError> {
        Err(connection_refused())
    }

    async fn find_top_for_game(
        &self,
        _game_name: &str,
        _limit: u32,
    ) -> Result<Vec<ScoreRecord>, DomainError> {
        Err(connection_refused())
    }

    async fn distinct_game_names(&self) -> Result<Vec<String>, DomainError> {
        Err(connection_refused())
    }

    async fn distinct_player_names(&self) -> Result<Vec<String>, DomainError> {
        Err(connection_refused())
    }

    async fn max_score(
        &self,
        _player_name: &str,
        _game_name: &str,
    ) -> Result<Option<i64>, DomainError> {
        Err(connection_refused())
    }

    async fn count(&self, _filter: &ScoreFilter) -> Result<u64, DomainError> {
        Err(connection_refused())
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        Err(connection_refused())
    }
}
