//! Input validation for user-submitted content.
//!
//! Pure functions returning `CoreError::Validation` naming the offending
//! field. Handlers call these before touching the store.

use crate::error::CoreError;
use crate::models::{NewAnswer, NewQuestion};

/// Maximum length of a question title, in characters.
pub const MAX_TITLE_LEN: usize = 300;

/// Maximum length of a question or answer body, in characters.
pub const MAX_BODY_LEN: usize = 20_000;

/// Maximum length of a user bio, in characters.
pub const MAX_BIO_LEN: usize = 1_000;

/// Reject blank values and values longer than `max` characters.
pub fn validate_text(value: &str, name: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{name} must be at most {max} characters, got {len}"
        )));
    }
    Ok(())
}

/// A topic path is a dot-separated list of non-empty alphanumeric segments,
/// e.g. `Science.Biology`.
pub fn validate_topic_path(path: &str) -> Result<(), CoreError> {
    let valid = !path.is_empty()
        && path.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_')
        });
    if !valid {
        return Err(CoreError::Validation(format!(
            "topic must be a dotted path like 'Science.Biology', got '{path}'"
        )));
    }
    Ok(())
}

pub fn validate_new_question(input: &NewQuestion) -> Result<(), CoreError> {
    validate_text(&input.title, "title", MAX_TITLE_LEN)?;
    validate_text(&input.body, "body", MAX_BODY_LEN)?;
    validate_topic_path(&input.topic)
}

pub fn validate_new_answer(input: &NewAnswer) -> Result<(), CoreError> {
    validate_text(&input.body, "body", MAX_BODY_LEN)
}

/// Bios may be empty; only the length is bounded.
pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    let len = bio.chars().count();
    if len > MAX_BIO_LEN {
        return Err(CoreError::Validation(format!(
            "bio must be at most {MAX_BIO_LEN} characters, got {len}"
        )));
    }
    Ok(())
}
