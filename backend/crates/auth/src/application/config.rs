//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::config::{ConfigError, Environment, env_flag, env_opt, env_or, env_required};
use platform::cookie::CookieConfig;
use platform::crypto::random_token_hex;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Access token cookie name
pub const ACCESS_COOKIE: &str = "token";
/// Refresh token cookie name
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 secret for access tokens
    pub access_secret: String,
    /// HS256 secret for refresh tokens; must differ from `access_secret`
    pub refresh_secret: String,
    /// Access token lifetime (15 minutes)
    pub access_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_ttl: Duration,
    /// Verification link lifetime (24 hours)
    pub verification_ttl: Duration,
    /// Password reset link lifetime (1 hour)
    pub reset_ttl: Duration,
    /// Base URL used in mailed links, without trailing slash
    pub frontend_url: String,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            verification_ttl: Duration::from_secs(24 * 3600),
            reset_ttl: Duration::from_secs(3600),
            frontend_url: "http://localhost:5173".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Read `JWT_SECRET`, `JWT_REFRESH_SECRET`, `FRONTEND_URL`,
    /// `COOKIE_SECURE` and `PASSWORD_PEPPER`
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let access_secret = env_required("JWT_SECRET")?;
        let refresh_secret = env_required("JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::Invalid {
                key: "JWT_REFRESH_SECRET".to_string(),
                value: "<same as JWT_SECRET>".to_string(),
            });
        }

        Ok(Self {
            access_secret,
            refresh_secret,
            frontend_url: env_or("FRONTEND_URL", "http://localhost:5173")
                .trim_end_matches('/')
                .to_string(),
            cookie_secure: env_flag("COOKIE_SECURE", environment.is_production()),
            password_pepper: env_opt("PASSWORD_PEPPER").map(String::into_bytes),
            ..Self::default()
        })
    }

    /// Random secrets and insecure cookies (for development and tests)
    pub fn development() -> Self {
        Self {
            access_secret: random_token_hex(32),
            refresh_secret: random_token_hex(32),
            cookie_secure: false,
            ..Self::default()
        }
    }

    /// Override the access token lifetime
    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    /// `token` cookie, Max-Age = access lifetime
    pub fn access_cookie(&self) -> CookieConfig {
        CookieConfig::new(
            ACCESS_COOKIE,
            self.access_ttl.as_secs(),
            self.cookie_secure,
            self.cookie_same_site,
        )
    }

    /// `refreshToken` cookie, Max-Age = refresh lifetime
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig::new(
            REFRESH_COOKIE,
            self.refresh_ttl.as_secs(),
            self.cookie_secure,
            self.cookie_same_site,
        )
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Verification token lifetime as a `chrono` duration
    pub fn verification_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.verification_ttl.as_secs() as i64)
    }

    /// Reset token lifetime as a `chrono` duration
    pub fn reset_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.reset_ttl.as_secs() as i64)
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/verify-email/{}", self.frontend_url, token)
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password/{}", self.frontend_url, token)
    }

    pub fn dashboard_link(&self) -> String {
        format!("{}/dashboard", self.frontend_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_secrets_are_distinct() {
        let config = AuthConfig::development();
        assert_eq!(config.access_secret.len(), 64);
        assert_ne!(config.access_secret, config.refresh_secret);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_cookie_lifetimes() {
        let config = AuthConfig::development();
        let access = config.access_cookie().build_set_cookie("a");
        let refresh = config.refresh_cookie().build_set_cookie("r");

        assert!(access.starts_with("token=a"));
        assert!(access.contains("Max-Age=900"));
        assert!(access.contains("SameSite=Strict"));
        assert!(refresh.starts_with("refreshToken=r"));
        assert!(refresh.contains("Max-Age=604800"));
    }

    #[test]
    fn test_links() {
        let config = AuthConfig {
            frontend_url: "https://site.test".to_string(),
            ..AuthConfig::development()
        };
        assert_eq!(config.verification_link("abc"), "https://site.test/verify-email/abc");
        assert_eq!(config.reset_link("abc"), "https://site.test/reset-password/abc");
        assert_eq!(config.dashboard_link(), "https://site.test/dashboard");
    }
}
