// ABOUTME: Input validation for usernames, registration fields, and task titles
// ABOUTME: Pure functions returning typed errors so callers decide how to surface them

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const FULL_NAME_MAX_LEN: usize = 100;
pub const TASK_TITLE_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username is required")]
    EmptyUsername,

    #[error("Username must be between 3 and 30 characters")]
    UsernameLength,

    #[error("Username may only contain letters, digits, '.', '_' and '-'")]
    UsernameCharacters,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Full name must be at most 100 characters")]
    FullNameTooLong,

    #[error("Task title is required")]
    EmptyTitle,

    #[error("Task title must be at most 200 characters")]
    TitleTooLong,
}

lazy_static! {
    static ref USERNAME_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username pattern is valid");
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid");
}

/// Only checks presence; used by the login path where any name is accepted
pub fn require_username(username: &str) -> Result<&str, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    Ok(trimmed)
}

/// Full rules applied at registration time
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username = require_username(username)?;
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::UsernameLength);
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Err(ValidationError::UsernameCharacters);
    }
    Ok(())
}

/// Empty email is allowed (the field is optional)
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() || EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

pub fn validate_full_name(full_name: &str) -> Result<(), ValidationError> {
    if full_name.trim().chars().count() > FULL_NAME_MAX_LEN {
        return Err(ValidationError::FullNameTooLong);
    }
    Ok(())
}

pub fn validate_task_title(title: &str) -> Result<(), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > TASK_TITLE_MAX_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

/// Truncate to `max_chars` characters, appending an ellipsis when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
