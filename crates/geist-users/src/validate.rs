//! Input validation for user creation.

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::NewUser;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}.!#$%&'*+/=?^_`{|}~-]+@[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?)+$",
    )
    .expect("email pattern is valid")
});

/// Rejections produced while validating a create request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or empty.
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("email is not a valid email address")]
    InvalidEmail,
}

/// Request body for creating a user.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported as a validation error rather than a body parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Returns `true` when `email` looks like a deliverable address
/// (`local@domain.tld`). Letters and digits from any script are accepted.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Missing { field }),
    }
}

impl CreateUser {
    /// Validates the request and stamps it with the current time.
    ///
    /// Values are kept exactly as submitted.
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let name = required(self.name, "name")?;
        let email = required(self.email, "email")?;
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(NewUser {
            name,
            email,
            created_at: Some(Utc::now()),
        })
    }
}
