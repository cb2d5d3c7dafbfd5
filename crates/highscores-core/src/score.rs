//! The score record and its query filters.

use chrono::{DateTime, Utc};

/// A persisted score submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Trimmed player name.
    pub player_name: String,
    /// Trimmed game name.
    pub game_name: String,
    /// The score value.
    pub score: i64,
    /// When the player achieved the score.
    pub achieved_at: DateTime<Utc>,
    /// When the store persisted the record. Never updated.
    pub created_at: DateTime<Utc>,
}

/// A score ready to be inserted. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub player_name: String,
    pub game_name: String,
    pub score: i64,
    pub achieved_at: DateTime<Utc>,
}

/// Selects the rows a paginated listing or a count applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreFilter {
    /// All scores submitted by one player.
    Player(String),
    /// All scores submitted for one game.
    Game(String),
    /// One player's scores in one game.
    PlayerAndGame {
        /// Player name to match.
        player_name: String,
        /// Game name to match.
        game_name: String,
    },
}

impl ScoreFilter {
    /// The player name this filter matches on, if any.
    #[must_use]
    pub fn player_name(&self) -> Option<&str> {
        match self {
            Self::Player(player_name) | Self::PlayerAndGame { player_name, .. } => {
                Some(player_name)
            }
            Self::Game(_) => None,
        }
    }

    /// The game name this filter matches on, if any.
    #[must_use]
    pub fn game_name(&self) -> Option<&str> {
        match self {
            Self::Game(game_name) | Self::PlayerAndGame { game_name, .. } => Some(game_name),
            Self::Player(_) => None,
        }
    }

    /// Returns `true` if `record` falls within this filter.
    #[must_use]
    pub fn matches(&self, record: &ScoreRecord) -> bool {
        self.player_name().is_none_or(|p| p == record.player_name)
            && self.game_name().is_none_or(|g| g == record.game_name)
    }
}
