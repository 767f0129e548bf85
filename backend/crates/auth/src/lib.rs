//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Token service, use cases, account e-mails
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Features
//! - Email + password signup and login
//! - Access (15 min) / refresh (7 days) JWTs in httpOnly cookies
//! - Inline access token renewal in the auth middleware
//! - Email verification and password reset links
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Access and refresh tokens signed with distinct secrets
//! - One live refresh token per user, stored as a SHA-256 digest;
//!   a new login supersedes earlier sessions
//! - Verification / reset tokens stored as digests with an expiry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{AuthGuard, AuthUser, require_auth};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
