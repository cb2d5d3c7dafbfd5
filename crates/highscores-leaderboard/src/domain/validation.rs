//! Input validation for score submissions and leaderboard queries.
//!
//! Each check is a plain function that either returns the accepted value or a
//! `DomainError::Validation` naming the offending field. Callers run them
//! before handing a request to the command and query handlers.

use highscores_core::error::DomainError;

/// Longest player or game name accepted, in characters, after trimming.
pub const MAX_NAME_LENGTH: usize = 100;

/// Checks that a player or game name is present, non-blank and at most
/// [`MAX_NAME_LENGTH`] characters once trimmed. Returns the trimmed name.
///
/// # Errors
///
/// Returns `DomainError::Validation` for `field` if the name is missing,
/// blank, too long, or contains a NUL character.
pub fn validate_name<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, DomainError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    validate_lookup_name(field, trimmed)?;
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(
            field,
            format!("must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(trimmed)
}

/// Checks a name taken from a request path. Lookups use the name verbatim,
/// so only characters the store cannot hold are rejected.
///
/// # Errors
///
/// Returns `DomainError::Validation` for `field` if the name contains a NUL
/// character.
pub fn validate_lookup_name<'a>(field: &str, value: &'a str) -> Result<&'a str, DomainError> {
    if value.contains('\0') {
        return Err(DomainError::validation(
            field,
            "must not contain NUL characters",
        ));
    }
    Ok(value)
}

/// Checks that a score value was supplied.
///
/// # Errors
///
/// Returns `DomainError::Validation` for `score` if it is missing.
pub fn require_score(score: Option<i64>) -> Result<i64, DomainError> {
    score.ok_or_else(|| DomainError::validation("score", "is required"))
}

/// Checks that a top-N limit asks for at least one record.
///
/// # Errors
///
/// Returns `DomainError::Validation` for `limit` if it is zero.
pub fn validate_limit(limit: u32) -> Result<u32, DomainError> {
    if limit == 0 {
        return Err(DomainError::validation("limit", "must be at least 1"));
    }
    Ok(limit)
}
