//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(state: AuthAppState<PgAuthRepository>) -> Router {
    auth_router_generic(state)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me::<R>))
        .route("/logout", post(handlers::sign_out::<R>))
        .route(
            "/resend-verification",
            post(handlers::resend_verification::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.guard(),
            require_auth::<R>,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::sign_in::<R>))
        .route("/refresh-token", post(handlers::refresh_token::<R>))
        .route("/verify-email/{token}", get(handlers::verify_email::<R>))
        .route(
            "/reset-password",
            post(handlers::request_password_reset::<R>),
        )
        .route(
            "/reset-password/{token}",
            post(handlers::reset_password::<R>),
        )
        .merge(protected)
        .with_state(state)
}
