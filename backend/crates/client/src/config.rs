//! Client Configuration

use std::time::Duration;

use platform::config::{ConfigError, env_opt, env_parse};

/// Shortest accepted delay between payment status checks
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root including the `/api` prefix, without trailing slash
    pub base_url: String,
    /// Delay between payment status checks (5 seconds)
    pub poll_interval: Duration,
    /// Give up polling after this many checks; `None` polls until terminal
    pub max_poll_attempts: Option<u32>,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            poll_interval: Duration::from_secs(5),
            max_poll_attempts: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Client for a server root such as `http://127.0.0.1:5000`
    pub fn new(server_url: &str) -> Self {
        Self {
            base_url: format!("{}/api", server_url.trim_end_matches('/')),
            ..Self::default()
        }
    }

    /// Read `API_URL`, `PAYMENT_POLL_INTERVAL_SECS` and `PAYMENT_POLL_MAX_ATTEMPTS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env_opt("API_URL") {
            Some(url) => Self::new(&url),
            None => Self::default(),
        };

        let secs: u64 = env_parse("PAYMENT_POLL_INTERVAL_SECS", 5)?;
        if secs == 0 {
            return Err(ConfigError::Invalid {
                key: "PAYMENT_POLL_INTERVAL_SECS".to_string(),
                value: secs.to_string(),
            });
        }
        config.poll_interval = Duration::from_secs(secs);
        config.max_poll_attempts = match env_opt("PAYMENT_POLL_MAX_ATTEMPTS") {
            Some(raw) => Some(raw.parse().map_err(|_| ConfigError::Invalid {
                key: "PAYMENT_POLL_MAX_ATTEMPTS".to_string(),
                value: raw,
            })?),
            None => None,
        };

        Ok(config)
    }

    /// Raised to `MIN_POLL_INTERVAL` when shorter
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = Some(attempts);
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url() {
        let config = ClientConfig::new("https://portal.test/");
        assert_eq!(config.url("/auth/me"), "https://portal.test/api/auth/me");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert!(config.max_poll_attempts.is_none());
    }

    #[test]
    fn test_poll_overrides() {
        let config = ClientConfig::new("http://localhost:5000")
            .with_poll_interval(Duration::from_millis(250))
            .with_max_poll_attempts(12);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.max_poll_attempts, Some(12));
    }

    #[test]
    fn test_zero_poll_interval() {
        let config = ClientConfig::new("http://localhost:5000").with_poll_interval(Duration::ZERO);
        assert_eq!(config.poll_interval, MIN_POLL_INTERVAL);

        // Only test in this crate that touches these variables
        unsafe { std::env::set_var("PAYMENT_POLL_INTERVAL_SECS", "0") };
        let result = ClientConfig::from_env();
        unsafe { std::env::remove_var("PAYMENT_POLL_INTERVAL_SECS") };
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key, .. }) if key == "PAYMENT_POLL_INTERVAL_SECS"
        ));
    }
}
