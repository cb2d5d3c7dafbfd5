//! Database schema.
//!
//! The schema lives in the workspace `migrations/` directory and is embedded
//! into the binary at compile time.

use sqlx::migrate::Migrator;

/// Migrations that create the `game_scores` table and its indexes.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
