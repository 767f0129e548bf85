//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

mod app;

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, AuthConfig, PgAuthRepository, auth_router};
use intake::{PgIntakeRepository, career_router, contact_router};
use payment::{PgPaymentRepository, payment_router};
use platform::config::{Environment, env_list, env_opt, env_parse, env_required};
use platform::cors::OriginPolicy;
use platform::mail::MailTransport;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::Routers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,payment=info,intake=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let environment = Environment::from_env();

    // Database connection
    let database_url = env_required("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(env_parse("DATABASE_MAX_CONNECTIONS", 5u32)?)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Stale verification / reset links must not block startup
    let users = PgAuthRepository::new(pool.clone());
    if let Err(e) = users.cleanup_expired_tokens().await {
        tracing::warn!(error = %e, "Account token cleanup failed, continuing anyway");
    }

    let auth_state = AuthAppState::new(users, AuthConfig::from_env()?, MailTransport::from_env()?);
    let guard = auth_state.guard();
    let intake_repo = PgIntakeRepository::new(pool.clone());

    let routers = Routers {
        auth: auth_router(auth_state),
        payments: payment_router(PgPaymentRepository::new(pool.clone()), guard.clone()),
        contact: contact_router(intake_repo.clone(), guard.clone()),
        career: career_router(intake_repo, guard),
    };

    let mut origins = env_list("FRONTEND_ORIGINS");
    origins.extend(env_opt("FRONTEND_URL"));
    let policy = OriginPolicy::for_environment(origins, environment.is_production());

    let app = app::compose(routers, policy);

    let port: u16 = env_parse("PORT", 5000)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(environment = ?environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
