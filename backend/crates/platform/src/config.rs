//! Environment Configuration Helpers
//!
//! Small typed readers over `std::env`. Parsing is split from the lookup so the
//! rules can be tested without touching the process environment.

use std::fmt::Display;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose};
use thiserror::Error;

/// Configuration errors raised at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, value: &str, reason: impl Display) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Read a variable, treating empty or whitespace-only values as unset
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn env_or(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|| default.to_string())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_var(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_value(key, env_var(key).as_deref(), default)
}

pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    parse_flag(key, env_var(key).as_deref(), default)
}

/// Parse `raw` as `T`, falling back to `default` when absent
pub fn parse_value<T>(key: &str, raw: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|e| ConfigError::invalid(key, value, e)),
    }
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive)
pub fn parse_flag(key: &str, raw: Option<&str>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected a boolean")),
    }
}

/// Decode a base64 (standard alphabet) 32-byte secret
pub fn parse_secret(key: &str, raw: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = general_purpose::STANDARD
        .decode(raw.trim())
        .map_err(|e| ConfigError::invalid(key, "<redacted>", e))?;

    bytes.try_into().map_err(|b: Vec<u8>| {
        ConfigError::invalid(
            key,
            "<redacted>",
            format!("expected 32 bytes, got {}", b.len()),
        )
    })
}

/// Split a comma separated list, dropping empty items
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_default_and_override() {
        assert_eq!(parse_value::<u32>("POOL", None, 5).unwrap(), 5);
        assert_eq!(parse_value::<u32>("POOL", Some("12"), 5).unwrap(), 12);
    }

    #[test]
    fn test_parse_value_invalid() {
        let err = parse_value::<u32>("POOL", Some("many"), 5).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "POOL"));
        assert!(err.to_string().contains("POOL"));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("SECURE", Some("TRUE"), false).unwrap());
        assert!(parse_flag("SECURE", Some("on"), false).unwrap());
        assert!(!parse_flag("SECURE", Some("0"), true).unwrap());
        assert!(parse_flag("SECURE", None, true).unwrap());
        assert!(parse_flag("SECURE", Some("maybe"), true).is_err());
    }

    #[test]
    fn test_parse_secret() {
        let encoded = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(parse_secret("SESSION_SECRET", &encoded).unwrap(), [7u8; 32]);

        let short = general_purpose::STANDARD.encode([7u8; 16]);
        let err = parse_secret("SESSION_SECRET", &short).unwrap_err();
        assert!(err.to_string().contains("expected 32 bytes"));

        assert!(parse_secret("SESSION_SECRET", "not base64!").is_err());
    }

    #[test]
    fn test_secret_is_not_echoed() {
        let err = parse_secret("SESSION_SECRET", "c2hvcnQ=").unwrap_err();
        assert!(!err.to_string().contains("c2hvcnQ="));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_list("  ").is_empty());
    }
}
