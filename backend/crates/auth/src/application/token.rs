//! Token Service
//!
//! HS256 JWTs. Access and refresh tokens are signed with distinct secrets,
//! so one can never be accepted in place of the other even before the
//! `typ` claim is checked.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::application::config::AuthConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub typ: TokenKind,
    pub iat: i64,
    pub exp: i64,
    /// Distinguishes tokens minted within the same second
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.user_id)
    }
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Keys {
    fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    access: Keys,
    refresh: Keys,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: Keys::new(&config.access_secret, config.access_ttl),
            refresh: Keys::new(&config.refresh_secret, config.refresh_ttl),
            validation,
        }
    }

    fn keys(&self, kind: TokenKind) -> &Keys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn issue(&self, user_id: &UserId, kind: TokenKind) -> Result<String, TokenError> {
        let keys = self.keys(kind);
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: *user_id.as_uuid(),
            typ: kind,
            iat: now,
            exp: now + keys.ttl.as_secs() as i64,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Access token (15 min) + refresh token (7 days)
    pub fn issue_token_pair(&self, user_id: &UserId) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue(user_id, TokenKind::Access)?,
            refresh_token: self.issue(user_id, TokenKind::Refresh)?,
        })
    }

    pub fn issue_access_token(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.issue(user_id, TokenKind::Access)
    }

    /// Check signature, expiry and token kind
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)?;
        if data.claims.typ != kind {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (TokenService, AuthConfig) {
        let config = AuthConfig::development();
        (TokenService::new(&config), config)
    }

    #[test]
    fn test_pair_roundtrip() {
        let (tokens, _) = service();
        let user_id = UserId::new();
        let pair = tokens.issue_token_pair(&user_id).unwrap();

        let access = tokens.verify(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(access.user_id(), user_id);
        assert_eq!(access.exp - access.iat, 15 * 60);

        let refresh = tokens.verify(&pair.refresh_token, TokenKind::Refresh).unwrap();
        assert_eq!(refresh.user_id(), user_id);
        assert_eq!(refresh.exp - refresh.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_kinds_are_not_interchangeable() {
        let (tokens, _) = service();
        let pair = tokens.issue_token_pair(&UserId::new()).unwrap();

        assert_eq!(
            tokens.verify(&pair.access_token, TokenKind::Refresh).unwrap_err(),
            TokenError::Invalid
        );
        assert_eq!(
            tokens.verify(&pair.refresh_token, TokenKind::Access).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_tokens_in_same_second_differ() {
        let (tokens, _) = service();
        let user_id = UserId::new();
        let a = tokens.issue_access_token(&user_id).unwrap();
        let b = tokens.issue_access_token(&user_id).unwrap();
        assert_ne!(a, b);
    }

    /// Token of `kind` issued at `iat`, expiring one lifetime later
    fn signed(secret: &str, kind: TokenKind, iat: i64, lifetime: i64) -> String {
        let claims = Claims {
            user_id: Uuid::new_v4(),
            typ: kind,
            iat,
            exp: iat + lifetime,
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_expired_token() {
        let (tokens, config) = service();
        let now = Utc::now().timestamp();
        let token = signed(&config.access_secret, TokenKind::Access, now - 16 * 60, 15 * 60);

        assert_eq!(
            tokens.verify(&token, TokenKind::Access).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_refresh_token_expires_after_seven_days() {
        let (tokens, config) = service();
        let now = Utc::now().timestamp();
        let week = 7 * 24 * 3600;

        let stale = signed(&config.refresh_secret, TokenKind::Refresh, now - week - 60, week);
        assert_eq!(
            tokens.verify(&stale, TokenKind::Refresh).unwrap_err(),
            TokenError::Expired
        );

        let nearly_stale = signed(&config.refresh_secret, TokenKind::Refresh, now - week + 60, week);
        assert!(tokens.verify(&nearly_stale, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_wrong_secret_and_garbage() {
        let (tokens, _) = service();
        let (other, _) = service();
        let token = other.issue_access_token(&UserId::new()).unwrap();

        assert_eq!(tokens.verify(&token, TokenKind::Access).unwrap_err(), TokenError::Invalid);
        assert_eq!(tokens.verify("not.a.jwt", TokenKind::Access).unwrap_err(), TokenError::Invalid);
    }
}
