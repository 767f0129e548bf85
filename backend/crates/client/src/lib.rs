//! API Client
//!
//! Rust client for the portal API.
//!
//! - `session` - `SessionController`: current user, auth calls, one silent
//!   retry through `/auth/refresh-token` after a 401
//! - `payments` - payment calls and `PaymentPoller`
//! - `intake` - contact form and career application calls
//!
//! ```rust,ignore
//! let session = SessionController::new(ClientConfig::from_env()?)?;
//! session.init().await?;
//! let user = session.login("a@x.com", "secret1").await?;
//! let payment = session.create_payment(&NewPayment::mobile_money("Standard Plan", 2.0, PaymentMethod::Mtn, "670000000")).await?;
//! let settled = PaymentPoller::new(&session).wait(&payment.transaction_id).await?;
//! session.teardown().await;
//! ```

pub mod config;
pub mod error;
pub mod intake;
pub mod payments;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use payments::PaymentPoller;
pub use session::SessionController;
pub use types::{NewPayment, Payment, PaymentMethod, PaymentStatus, User};
