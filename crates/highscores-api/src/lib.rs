//! High Scores API — HTTP surface over the leaderboard service.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod seed;
pub mod state;
pub mod telemetry;
