// ============================
// doorman-lib/src/validation.rs
// ============================
//! Form input validation.

use crate::config::PasswordRequirements;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 32;

/// The special characters a password may draw from.
pub const SPECIAL_CHARS: &str = "#?!@$ %^&*-";

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid password: {0}")]
    WeakPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.is_empty() {
        return Err(ValidationError::InvalidUsername(
            "username must not be empty".to_string(),
        ));
    }

    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::InvalidUsername(format!(
            "username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::InvalidUsername(
            "username may only contain letters, digits, dots, hyphens and underscores"
                .to_string(),
        ));
    }

    Ok(username)
}

/// Validate a password against the configured policy.
///
/// A failure here must stop signup before any hashing or storage happens.
pub fn validate_password<'a>(
    password: &'a str,
    requirements: &PasswordRequirements,
) -> ValidationResult<&'a str> {
    if password.len() < requirements.min_length {
        return Err(weak(requirements));
    }

    if password.len() > requirements.max_length {
        return Err(ValidationError::WeakPassword(format!(
            "password cannot exceed {} characters",
            requirements.max_length
        )));
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(weak(requirements));
    }

    if requirements.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(weak(requirements));
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(weak(requirements));
    }

    if requirements.require_special && !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(weak(requirements));
    }

    Ok(password)
}

fn weak(requirements: &PasswordRequirements) -> ValidationError {
    ValidationError::WeakPassword(format!(
        "password needs at least {} characters and must include an uppercase letter, \
         a lowercase letter, a digit and a special character ({})",
        requirements.min_length, SPECIAL_CHARS
    ))
}
