//! Intake Routers
//!
//! Submitting is public; listing and triage require a logged-in user.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthGuard, PgAuthRepository, require_auth};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::{ApplicationRepository, ContactRepository};
use crate::infra::postgres::PgIntakeRepository;
use crate::presentation::handlers::{self, IntakeAppState};

/// Contact router mounted at `/api/contact`
pub fn contact_router(repo: PgIntakeRepository, guard: AuthGuard<PgAuthRepository>) -> Router {
    contact_router_generic(repo, guard)
}

pub fn contact_router_generic<R, A>(repo: R, guard: AuthGuard<A>) -> Router
where
    R: ContactRepository + Clone + Send + Sync + 'static,
    A: UserRepository + Clone + Send + Sync + 'static,
{
    let state = IntakeAppState {
        repo: Arc::new(repo),
    };

    let protected = Router::new()
        .route("/", get(handlers::list_contacts::<R>))
        .route("/{id}", put(handlers::update_contact_status::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<A>));

    Router::new()
        .route("/", post(handlers::submit_contact::<R>))
        .merge(protected)
        .with_state(state)
}

/// Career router mounted at `/api/career`
pub fn career_router(repo: PgIntakeRepository, guard: AuthGuard<PgAuthRepository>) -> Router {
    career_router_generic(repo, guard)
}

pub fn career_router_generic<R, A>(repo: R, guard: AuthGuard<A>) -> Router
where
    R: ApplicationRepository + Clone + Send + Sync + 'static,
    A: UserRepository + Clone + Send + Sync + 'static,
{
    let state = IntakeAppState {
        repo: Arc::new(repo),
    };

    let protected = Router::new()
        .route("/applications", get(handlers::list_applications::<R>))
        .route(
            "/application/{id}",
            put(handlers::update_application_status::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<A>));

    Router::new()
        .route("/apply", post(handlers::submit_application::<R>))
        .merge(protected)
        .with_state(state)
}
