//! Payment Error Types
//!
//! Payment-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::PaymentStatus;

/// Payment-specific result type alias
pub type PaymentResult<T> = Result<T, PaymentError>;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Malformed payment request
    #[error("{0}")]
    Validation(String),

    /// Unknown transaction id, or owned by another user
    #[error("Payment not found")]
    NotFound,

    /// Only `pending → completed` and `pending → failed` are allowed
    #[error("Cannot change payment status from {from} to {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Validation(_) | PaymentError::InvalidTransition { .. } => {
                ErrorKind::BadRequest
            }
            PaymentError::NotFound => ErrorKind::NotFound,
            PaymentError::Database(_) | PaymentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PaymentError::Database(e) => {
                tracing::error!(error = %e, "Payment database error");
            }
            PaymentError::Internal(msg) => {
                tracing::error!(message = %msg, "Payment internal error");
            }
            PaymentError::InvalidTransition { from, to } => {
                tracing::warn!(%from, %to, "Rejected payment transition");
            }
            _ => {
                tracing::debug!(error = %self, "Payment error");
            }
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
