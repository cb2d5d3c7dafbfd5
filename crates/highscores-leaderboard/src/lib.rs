//! High Scores — Leaderboard context.
//!
//! Responsible for accepting score submissions and answering leaderboard
//! queries: per-player and per-game listings, top-N, personal bests, and
//! aggregate statistics.

pub mod application;
pub mod domain;
