//! Client Error Types

use platform::config::ConfigError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response; `message` is the server's `error` string
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport or body decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Polling gave up before the payment left `pending`
    #[error("Payment {transaction_id} still pending after {attempts} checks")]
    PollTimeout { transaction_id: String, attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status() == Some(401)
    }
}
