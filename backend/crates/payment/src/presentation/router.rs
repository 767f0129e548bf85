//! Payment Router

use std::sync::Arc;

use auth::{AuthGuard, PgAuthRepository, require_auth};
use auth::domain::repository::UserRepository;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::PaymentRepository;
use crate::infra::postgres::PgPaymentRepository;
use crate::presentation::handlers::{self, PaymentAppState};

/// Create the Payment router with PostgreSQL repositories
pub fn payment_router(repo: PgPaymentRepository, guard: AuthGuard<PgAuthRepository>) -> Router {
    payment_router_generic(repo, guard)
}

/// Create a generic Payment router for any repository implementation
pub fn payment_router_generic<P, A>(repo: P, guard: AuthGuard<A>) -> Router
where
    P: PaymentRepository + Clone + Send + Sync + 'static,
    A: UserRepository + Clone + Send + Sync + 'static,
{
    let state = PaymentAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/create", post(handlers::create_payment::<P>))
        .route("/history", get(handlers::history::<P>))
        .route("/status/{transaction_id}", get(handlers::status::<P>))
        .route("/update/{transaction_id}", put(handlers::update_status::<P>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<A>))
        .with_state(state)
}
