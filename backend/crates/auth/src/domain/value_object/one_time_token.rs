//! One-Time Token Value Object
//!
//! Verification and password-reset links carry a random 32-byte hex token.
//! Only its SHA-256 digest is stored, together with an expiry.

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{random_token_hex, token_digest};

/// Raw token length in bytes (64 hex characters)
pub const TOKEN_BYTES: usize = 32;

/// Stored side of a one-time token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeToken {
    pub digest: String,
    pub expires_at: DateTime<Utc>,
}

impl OneTimeToken {
    /// Generate a token valid for `ttl`; returns the raw value to mail out
    pub fn issue(ttl: Duration) -> (String, Self) {
        let raw = random_token_hex(TOKEN_BYTES);
        let token = Self {
            digest: token_digest(&raw),
            expires_at: Utc::now() + ttl,
        };
        (raw, token)
    }

    /// Digest used for lookups
    pub fn digest_of(raw: &str) -> String {
        token_digest(raw)
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue() {
        let (raw, token) = OneTimeToken::issue(Duration::hours(24));
        assert_eq!(raw.len(), TOKEN_BYTES * 2);
        assert_ne!(raw, token.digest);
        assert_eq!(OneTimeToken::digest_of(&raw), token.digest);
        assert!(token.is_live(Utc::now()));
        assert!(!token.is_live(Utc::now() + Duration::hours(25)));
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = OneTimeToken::issue(Duration::hours(1));
        let (b, _) = OneTimeToken::issue(Duration::hours(1));
        assert_ne!(a, b);
    }
}
