//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Absence (an unknown score id, a player with no scores) is modelled with
/// `Option` in return values, not with an error variant.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A request field failed validation.
    #[error("validation error: {field} {message}")]
    Validation {
        /// The offending field, as named in the public API.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for building a `Validation` error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
