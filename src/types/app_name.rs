// ABOUTME: Azure Web App name validation.
// ABOUTME: Ensures app names follow the platform's naming requirements.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppNameError {
    #[error("app name cannot be empty")]
    Empty,

    #[error("app name must be at least 2 characters")]
    TooShort,

    #[error("app name exceeds maximum length of 60 characters")]
    TooLong,

    #[error("app name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("app name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),
}

/// Validated Azure Web App name.
///
/// App names are 2-60 ASCII alphanumeric characters or hyphens, with no
/// leading or trailing hyphen. They are embedded in platform command lines
/// and in the candidate image reference, so validation happens up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        if value.is_empty() {
            return Err(AppNameError::Empty);
        }

        if value.len() < 2 {
            return Err(AppNameError::TooShort);
        }

        if value.len() > 60 {
            return Err(AppNameError::TooLong);
        }

        if value.starts_with('-') {
            return Err(AppNameError::StartsWithHyphen);
        }

        if value.ends_with('-') {
            return Err(AppNameError::EndsWithHyphen);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
