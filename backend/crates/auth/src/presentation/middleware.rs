//! Auth Middleware
//!
//! Protects routes of every crate. The credential is the `token` cookie or,
//! failing that, an `Authorization: Bearer` header. An invalid or expired
//! access token is renewed inline from the `refreshToken` cookie; the new
//! access token is returned as a `Set-Cookie` on the response.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use platform::client::extract_bearer_token;
use platform::cookie::extract_cookie;
use std::sync::Arc;

use crate::application::config::{ACCESS_COOKIE, AuthConfig, REFRESH_COOKIE};
use crate::application::{AuthenticateUseCase, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGuard<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

/// Identity attached to authenticated requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Middleware that requires an authenticated user
///
/// ```rust,ignore
/// Router::new()
///     .route("/me", get(me))
///     .route_layer(axum::middleware::from_fn_with_state(guard, require_auth::<R>))
/// ```
pub async fn require_auth<R>(
    State(guard): State<AuthGuard<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();
    let access_token =
        extract_cookie(headers, ACCESS_COOKIE).or_else(|| extract_bearer_token(headers));
    let refresh_token = extract_cookie(headers, REFRESH_COOKIE);

    let use_case = AuthenticateUseCase::new(guard.repo.clone(), guard.tokens.clone());
    let authenticated = match use_case
        .execute(access_token.as_deref(), refresh_token.as_deref())
        .await
    {
        Ok(authenticated) => authenticated,
        Err(e @ (AuthError::Database(_) | AuthError::Internal(_))) => return e.into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "Request not authenticated");
            return AuthError::Unauthenticated.into_response();
        }
    };

    req.extensions_mut().insert(AuthUser {
        user_id: authenticated.user_id,
    });

    let mut response = next.run(req).await;

    if let Some(token) = authenticated.renewed_access_token {
        response
            .headers_mut()
            .append(header::SET_COOKIE, guard.config.access_cookie().set_header(&token));
    }

    response
}
