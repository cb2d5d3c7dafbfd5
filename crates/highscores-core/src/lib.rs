//! High Scores Core — shared domain abstractions.
//!
//! This crate defines the score record, the pagination types, and the
//! repository trait that the service and store crates depend on. It contains
//! no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod pagination;
pub mod repository;
pub mod score;
