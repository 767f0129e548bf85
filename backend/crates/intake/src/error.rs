//! Intake Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type IntakeResult<T> = Result<T, IntakeError>;

#[derive(Debug, Error)]
pub enum IntakeError {
    /// Missing or malformed form field
    #[error("{0}")]
    Validation(String),

    #[error("Contact submission not found")]
    ContactNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IntakeError::Validation(_) => ErrorKind::BadRequest,
            IntakeError::ContactNotFound | IntakeError::ApplicationNotFound => ErrorKind::NotFound,
            IntakeError::Database(_) | IntakeError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            IntakeError::Database(e) => {
                tracing::error!(error = %e, "Intake database error");
            }
            IntakeError::Internal(msg) => {
                tracing::error!(message = %msg, "Intake internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Intake error");
            }
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        let err = AppError::from(IntakeError::ContactNotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Contact submission not found");

        let err = AppError::from(IntakeError::Validation("Name is required".into()));
        assert_eq!(err.status_code(), 400);

        let err = AppError::from(IntakeError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), 503);
    }
}
