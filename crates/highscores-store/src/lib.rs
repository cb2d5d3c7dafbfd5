//! High Scores Store — `PostgreSQL` persistence for score records.

pub mod pg_score_repository;
pub mod schema;
