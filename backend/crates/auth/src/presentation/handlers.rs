//! HTTP Handlers

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use kernel::extract::{Json, Path};
use kernel::response;
use platform::cookie::extract_cookie;
use platform::mail::MailTransport;
use std::sync::Arc;

use crate::application::config::{AuthConfig, REFRESH_COOKIE};
use crate::application::{
    CurrentUserUseCase, RefreshTokenUseCase, RequestPasswordResetUseCase,
    ResendVerificationUseCase, ResetPasswordUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase, TokenPair, TokenService, VerifyEmailUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CredentialsRequest, NewPasswordRequest, PasswordResetRequest, UserPayload,
};
use crate::presentation::middleware::{AuthGuard, AuthUser};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub mailer: Arc<MailTransport>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig, mailer: MailTransport) -> Self {
        Self {
            repo: Arc::new(repo),
            tokens: Arc::new(TokenService::new(&config)),
            mailer: Arc::new(mailer),
            config: Arc::new(config),
        }
    }

    /// Middleware state for protecting routes of any crate
    pub fn guard(&self) -> AuthGuard<R> {
        AuthGuard {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up / Sign In / Refresh / Sign Out
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CredentialsRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        session_cookies(&state.config, &output.tokens),
        response::created(UserPayload::from(&output.user)),
    ))
}

/// POST /api/auth/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CredentialsRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        session_cookies(&state.config, &output.tokens),
        response::ok(UserPayload::from(&output.user)),
    ))
}

/// POST /api/auth/refresh-token
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let presented = extract_cookie(&headers, REFRESH_COOKIE);

    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.tokens.clone());
    let pair = use_case.execute(presented.as_deref()).await?;

    Ok((session_cookies(&state.config, &pair), response::done()))
}

/// POST /api/auth/logout (protected)
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthUser,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    SignOutUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    Ok((clear_cookies(&state.config), response::done()))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me (protected)
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthUser,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    Ok(response::ok(UserPayload::from(&user)))
}

// ============================================================================
// Email Verification
// ============================================================================

/// GET /api/auth/verify-email/{token}
pub async fn verify_email<R>(
    State(state): State<AuthAppState<R>>,
    Path(token): Path<String>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    VerifyEmailUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone())
        .execute(&token)
        .await?;

    Ok(response::message(StatusCode::OK, "Email verified successfully"))
}

/// POST /api/auth/resend-verification (protected)
pub async fn resend_verification<R>(
    State(state): State<AuthAppState<R>>,
    user: AuthUser,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    ResendVerificationUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone())
        .execute(&user.user_id)
        .await?;

    Ok(response::message(StatusCode::OK, "Verification email sent"))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/reset-password
pub async fn request_password_reset<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<PasswordResetRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    RequestPasswordResetUseCase::new(state.repo.clone(), state.mailer.clone(), state.config.clone())
        .execute(&req.email)
        .await?;

    Ok(response::message(StatusCode::OK, "Password reset email sent"))
}

/// POST /api/auth/reset-password/{token}
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Path(token): Path<String>,
    Json(req): Json<NewPasswordRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    ResetPasswordUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&token, req.password)
        .await?;

    Ok(response::message(StatusCode::OK, "Password reset successful"))
}

// ============================================================================
// Helper Functions
// ============================================================================

type CookieHeaders = AppendHeaders<[(HeaderName, HeaderValue); 2]>;

fn session_cookies(config: &AuthConfig, pair: &TokenPair) -> CookieHeaders {
    AppendHeaders([
        (
            header::SET_COOKIE,
            config.access_cookie().set_header(&pair.access_token),
        ),
        (
            header::SET_COOKIE,
            config.refresh_cookie().set_header(&pair.refresh_token),
        ),
    ])
}

fn clear_cookies(config: &AuthConfig) -> CookieHeaders {
    AppendHeaders([
        (header::SET_COOKIE, config.access_cookie().delete_header()),
        (header::SET_COOKIE, config.refresh_cookie().delete_header()),
    ])
}
