//! Environment Configuration Helpers
//!
//! Typed access to environment variables. `.env` loading happens once in
//! the binary (`dotenvy`); crates only read the process environment.

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors raised while reading the environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: String, value: String },
}

/// Deployment environment, read from `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env_opt("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Non-empty value of `key`, if any
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Value of `key` or `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

/// Value of `key`, failing when unset or empty
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_opt(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// Parsed value of `key`, `default` when unset
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env_opt(key) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
    }
}

/// Boolean flag (`1`, `true`, `yes`, `on` are true)
pub fn env_flag(key: &str, default: bool) -> bool {
    match env_opt(key) {
        None => default,
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
    }
}

/// Comma separated list, empty entries dropped
pub fn env_list(key: &str) -> Vec<String> {
    env_opt(key)
        .map(|v| {
            v.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; the process environment is shared.
    fn set(key: &str, value: &str) {
        unsafe { env::set_var(key, value) };
    }

    #[test]
    fn test_env_or_and_opt() {
        set("PLATFORM_TEST_OPT", "  value ");
        assert_eq!(env_opt("PLATFORM_TEST_OPT").as_deref(), Some("value"));
        assert_eq!(env_or("PLATFORM_TEST_OPT_UNSET", "fallback"), "fallback");

        set("PLATFORM_TEST_OPT_BLANK", "   ");
        assert_eq!(env_opt("PLATFORM_TEST_OPT_BLANK"), None);
    }

    #[test]
    fn test_env_required() {
        assert_eq!(
            env_required("PLATFORM_TEST_REQUIRED_UNSET"),
            Err(ConfigError::Missing("PLATFORM_TEST_REQUIRED_UNSET".to_string()))
        );
    }

    #[test]
    fn test_env_parse() {
        set("PLATFORM_TEST_PORT", "5000");
        assert_eq!(env_parse("PLATFORM_TEST_PORT", 80u16), Ok(5000));
        assert_eq!(env_parse("PLATFORM_TEST_PORT_UNSET", 80u16), Ok(80));

        set("PLATFORM_TEST_PORT_BAD", "http");
        assert!(matches!(
            env_parse("PLATFORM_TEST_PORT_BAD", 80u16),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_env_flag_and_list() {
        set("PLATFORM_TEST_FLAG", "TRUE");
        assert!(env_flag("PLATFORM_TEST_FLAG", false));
        assert!(!env_flag("PLATFORM_TEST_FLAG_UNSET", false));

        set("PLATFORM_TEST_LIST", "http://a.test, ,http://b.test");
        assert_eq!(
            env_list("PLATFORM_TEST_LIST"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
