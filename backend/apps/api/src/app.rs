//! Router composition
//!
//! Mounts every feature router under `/api`, adds the health check, and
//! wraps the whole tree in request tracing and the CORS policy.

use axum::http::{HeaderValue, Method, header, request};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use platform::cors::OriginPolicy;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Feature routers, already bound to their state
pub struct Routers {
    pub auth: Router,
    pub payments: Router,
    pub contact: Router,
    pub career: Router,
}

pub fn compose(routers: Routers, policy: OriginPolicy) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", routers.auth)
        .nest("/api/payments", routers.payments)
        .nest("/api/contact", routers.contact)
        .nest("/api/career", routers.career)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(policy))
}

/// Credentialed CORS restricted to the origins the policy accepts
pub fn cors_layer(policy: OriginPolicy) -> CorsLayer {
    let policy = Arc::new(policy);

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &request::Parts| policy.allows_header(origin),
        ))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

/// GET /
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "message": "API is running",
        "timestamp": chrono::Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{AuthAppState, AuthConfig, InMemoryAuthRepository, auth_router_generic};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use intake::{InMemoryIntakeRepository, career_router_generic, contact_router_generic};
    use payment::{InMemoryPaymentRepository, payment_router_generic};
    use platform::mail::{MailTransport, MemoryMailer};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AuthAppState::new(
            InMemoryAuthRepository::new(),
            AuthConfig::development(),
            MailTransport::Memory(MemoryMailer::new()),
        );
        let guard = state.guard();
        let intake = InMemoryIntakeRepository::new();

        compose(
            Routers {
                auth: auth_router_generic(state),
                payments: payment_router_generic(InMemoryPaymentRepository::new(), guard.clone()),
                contact: contact_router_generic(intake.clone(), guard.clone()),
                career: career_router_generic(intake, guard),
            },
            OriginPolicy::for_environment(["https://shop.example.com"], true),
        )
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/payments/history")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "API is running");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_feature_routers_are_mounted() {
        let response = app()
            .oneshot(Request::get("/api/payments/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app()
            .oneshot(Request::get("/api/contact").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_and_hosted_origins() {
        for origin in [
            "http://localhost:5173",
            "https://shop.example.com",
            "https://preview-42.onrender.com",
        ] {
            let response = app().oneshot(preflight(origin)).await.unwrap();
            let headers = response.headers();
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                origin
            );
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
                "true"
            );
        }
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let response = app().oneshot(preflight("https://evil.test")).await.unwrap();
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
