//! Refresh Token Use Case
//!
//! Rotates both tokens. The stored digest is swapped with a compare-and-set,
//! so of two requests presenting the same refresh token only one wins.

use std::sync::Arc;

use platform::crypto::token_digest;

use crate::application::token::{TokenKind, TokenPair, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> RefreshTokenUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<TokenPair> {
        let refresh_token = refresh_token.ok_or(AuthError::InvalidRefreshToken)?;

        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| AuthError::InvalidRefreshToken)?;
        let user_id = claims.user_id();

        let user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !user.refresh_token_matches(refresh_token) {
            return Err(AuthError::InvalidRefreshToken);
        }

        let pair = self.tokens.issue_token_pair(&user_id)?;
        let swapped = self
            .repo
            .replace_refresh_token(
                &user_id,
                &token_digest(refresh_token),
                Some(&token_digest(&pair.refresh_token)),
            )
            .await?;

        if !swapped {
            tracing::warn!(user_id = %user_id, "Refresh token already rotated");
            return Err(AuthError::InvalidRefreshToken);
        }

        tracing::debug!(user_id = %user_id, "Token pair rotated");
        Ok(pair)
    }
}
