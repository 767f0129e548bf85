//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message returned for every failed authentication check
pub const PLEASE_AUTHENTICATE: &str = "Please authenticate";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input (email format, password policy, …)
    #[error("{0}")]
    Validation(String),

    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, invalid or expired access credentials
    #[error("Please authenticate")]
    Unauthenticated,

    /// Refresh token missing, expired, or superseded
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or expired verification token")]
    InvalidVerificationToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::EmailTaken
            | AuthError::InvalidVerificationToken
            | AuthError::InvalidResetToken
            | AuthError::AlreadyVerified => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidRefreshToken => ErrorKind::Unauthorized,
            AuthError::Token(TokenError::Expired | TokenError::Invalid) => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Token(TokenError::Encoding(_))
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Token(TokenError::Encoding(msg)) => {
                tracing::error!(message = %msg, "Token encoding failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Rejected refresh token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            // Token verification details stay in the logs
            AuthError::Token(TokenError::Expired | TokenError::Invalid) => {
                AppError::unauthorized(PLEASE_AUTHENTICATE)
            }
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::EmailTaken.kind().status_code(), 400);
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::UserNotFound.kind().status_code(), 404);
        assert_eq!(AuthError::Internal("x".into()).kind().status_code(), 500);
    }

    #[test]
    fn test_token_errors_are_generic() {
        let err = AppError::from(AuthError::Token(TokenError::Expired));
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.message(), PLEASE_AUTHENTICATE);
    }

    #[test]
    fn test_database_errors_keep_their_class() {
        let err = AppError::from(AuthError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.public_message(), "Service temporarily unavailable");

        let err = AppError::from(AuthError::Database(sqlx::Error::Protocol("bad frame".into())));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_messages() {
        assert_eq!(AuthError::EmailTaken.to_string(), "Email is already registered");
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password");
        assert_eq!(
            AuthError::InvalidResetToken.to_string(),
            "Invalid or expired reset token"
        );
    }
}
