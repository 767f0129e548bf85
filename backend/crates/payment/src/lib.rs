//! Payment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Payment entity, method/status value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Payment intents
//! - Created `pending` with a server-generated transaction id
//! - Move once to `completed` or `failed`; terminal states are final
//! - Every lookup is scoped to the owning user
//!
//! No gateway is contacted: the status update endpoint stands in for the
//! mobile money / bank confirmation callback.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::entity::Payment;
pub use domain::value_object::{PaymentMethod, PaymentStatus};
pub use error::{PaymentError, PaymentResult};
pub use infra::{memory::InMemoryPaymentRepository, postgres::PgPaymentRepository};
pub use presentation::router::{payment_router, payment_router_generic};
