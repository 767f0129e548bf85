//! User Entity
//!
//! Account record: credentials, verification state, and the single live
//! refresh token (stored as a digest).

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::crypto::{constant_time_eq, token_digest};

use crate::domain::value_object::{
    email::Email, one_time_token::OneTimeToken, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lower-cased
    pub email: Email,
    pub password_hash: UserPassword,
    pub email_verified: bool,
    pub verification: Option<OneTimeToken>,
    /// Digest of the refresh token issued at the last login/refresh
    pub refresh_token_digest: Option<String>,
    pub password_reset: Option<OneTimeToken>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New unverified account with a pending verification token
    pub fn new(email: Email, password_hash: UserPassword, verification: OneTimeToken) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            email_verified: false,
            verification: Some(verification),
            refresh_token_digest: None,
            password_reset: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Replace the stored refresh token; `None` revokes it
    pub fn set_refresh_token(&mut self, digest: Option<String>) {
        self.refresh_token_digest = digest;
        self.updated_at = Utc::now();
    }

    /// Whether `raw` is the refresh token issued last
    pub fn refresh_token_matches(&self, raw: &str) -> bool {
        self.refresh_token_digest
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), token_digest(raw).as_bytes()))
    }

    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.verification = None;
        self.updated_at = Utc::now();
    }

    pub fn set_verification(&mut self, token: OneTimeToken) {
        self.verification = Some(token);
        self.updated_at = Utc::now();
    }

    pub fn set_password_reset(&mut self, token: OneTimeToken) {
        self.password_reset = Some(token);
        self.updated_at = Utc::now();
    }

    /// New password; clears the reset token and revokes the refresh token
    pub fn change_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.password_reset = None;
        self.refresh_token_digest = None;
        self.updated_at = Utc::now();
    }

    pub fn has_live_verification(&self, now: DateTime<Utc>) -> bool {
        self.verification.as_ref().is_some_and(|t| t.is_live(now))
    }

    pub fn has_live_reset(&self, now: DateTime<Utc>) -> bool {
        self.password_reset.as_ref().is_some_and(|t| t.is_live(now))
    }
}
