//! Intake Backend Module
//!
//! Contact-form messages and career applications submitted from the public
//! site, triaged by logged-in staff.
//!
//! Clean Architecture structure:
//! - `domain/` - Submission entities, status value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, routers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{IntakeError, IntakeResult};
pub use infra::{memory::InMemoryIntakeRepository, postgres::PgIntakeRepository};
pub use presentation::router::{
    career_router, career_router_generic, contact_router, contact_router_generic,
};
