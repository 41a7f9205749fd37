//! User Name Value Object
//!
//! The display name shown on listings and reservations ("Devin Sanders").
//! Not an identifier: duplicates are allowed, spaces and non-ASCII letters too.
//! Input is NFKC-normalized, trimmed and has inner whitespace runs collapsed.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Matches `users.name VARCHAR(255)`
pub const USER_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        if name.is_empty() {
            return Err(AppError::bad_request("Name cannot be empty")
                .with_action("Please enter your name"));
        }

        let char_count = name.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, char_count
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        assert_eq!(UserName::new("Devin Sanders").unwrap().as_str(), "Devin Sanders");
        assert_eq!(UserName::new("Zoë Øster").unwrap().as_str(), "Zoë Øster");
    }

    #[test]
    fn test_user_name_whitespace_is_collapsed() {
        let name = UserName::new("  Eva \t  Stanley ").unwrap();
        assert_eq!(name.as_str(), "Eva Stanley");
    }

    #[test]
    fn test_user_name_empty() {
        assert!(UserName::new("").is_err());
        assert!(UserName::new(" \n ").is_err());
    }

    #[test]
    fn test_user_name_too_long() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_user_name_control_characters() {
        assert!(UserName::new("Bad\u{0000}Name").is_err());
    }

    #[test]
    fn test_user_name_nfkc() {
        // Fullwidth letters fold to ASCII
        assert_eq!(UserName::new("ＡＢＣ").unwrap().as_str(), "ABC");
    }
}
