//! Response Envelope
//!
//! Every API response carries a `success` flag plus either a payload or a
//! short `error` string:
//!
//! ```json
//! { "success": true, "user": { "id": "…", "email": "a@x.com" } }
//! { "success": false, "error": "Please authenticate" }
//! ```

use serde::{Deserialize, Serialize};

/// Successful response: `success: true` with the payload fields flattened in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failed response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Payload for endpoints that only report a human readable message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Payload for endpoints with nothing to report beyond `success`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(feature = "axum")]
mod http {
    use axum::Json;
    use axum::http::StatusCode;
    use serde::Serialize;

    use super::{Empty, Envelope, ErrorBody, MessageBody};

    /// 200 with payload
    pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
        (StatusCode::OK, Json(Envelope::ok(data)))
    }

    /// 201 with payload
    pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
        (StatusCode::CREATED, Json(Envelope::ok(data)))
    }

    /// 200 `{ "success": true }`
    pub fn done() -> (StatusCode, Json<Envelope<Empty>>) {
        ok(Empty {})
    }

    /// `{ "success": true, "message": … }` with the given status
    pub fn message(
        status: StatusCode,
        message: impl Into<String>,
    ) -> (StatusCode, Json<Envelope<MessageBody>>) {
        (
            status,
            Json(Envelope::ok(MessageBody {
                message: message.into(),
            })),
        )
    }

    /// `{ "success": false, "error": … }` with the given status
    pub fn failure(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
        (status, Json(ErrorBody::new(error)))
    }
}

#[cfg(feature = "axum")]
pub use http::{created, done, failure, message, ok};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct UserPayload {
        user: &'static str,
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let value = serde_json::to_value(Envelope::ok(UserPayload { user: "a@x.com" })).unwrap();
        assert_eq!(value, json!({ "success": true, "user": "a@x.com" }));
    }

    #[test]
    fn test_empty_envelope() {
        let value = serde_json::to_value(Envelope::ok(Empty {})).unwrap();
        assert_eq!(value, json!({ "success": true }));
    }

    #[test]
    fn test_error_body() {
        let value = serde_json::to_value(ErrorBody::new("Please authenticate")).unwrap();
        assert_eq!(
            value,
            json!({ "success": false, "error": "Please authenticate" })
        );
    }
}
