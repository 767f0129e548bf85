//! Authenticate Use Case
//!
//! Backs the auth middleware: accept a valid access token, otherwise fall
//! back to the refresh token and mint a new access token inline.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::token::{TokenKind, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Outcome of a successful check
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user_id: UserId,
    /// Set when the access token was renewed from the refresh token
    pub renewed_access_token: Option<String>,
}

pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Every failure is `AuthError::Unauthenticated`
    pub async fn execute(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> AuthResult<Authenticated> {
        let access_token = access_token.ok_or(AuthError::Unauthenticated)?;

        match self.tokens.verify(access_token, TokenKind::Access) {
            Ok(claims) => Ok(Authenticated {
                user_id: claims.user_id(),
                renewed_access_token: None,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected, trying refresh token");
                self.renew(refresh_token).await
            }
        }
    }

    async fn renew(&self, refresh_token: Option<&str>) -> AuthResult<Authenticated> {
        let refresh_token = refresh_token.ok_or(AuthError::Unauthenticated)?;

        let claims = self
            .tokens
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| AuthError::Unauthenticated)?;

        let user = self
            .repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !user.refresh_token_matches(refresh_token) {
            return Err(AuthError::Unauthenticated);
        }

        let access_token = self.tokens.issue_access_token(&user.user_id)?;
        tracing::debug!(user_id = %user.user_id, "Access token renewed inline");

        Ok(Authenticated {
            user_id: user.user_id,
            renewed_access_token: Some(access_token),
        })
    }
}
