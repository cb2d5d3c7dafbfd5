//! Shared test mocks and utilities for the High Scores API.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{FailingScoreRepository, InMemoryScoreRepository};
