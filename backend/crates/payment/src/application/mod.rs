//! Application Layer
//!
//! Use cases for the payment intent lifecycle.

pub mod create_payment;
pub mod payment_query;
pub mod update_status;

pub use create_payment::{CreatePaymentInput, CreatePaymentUseCase};
pub use payment_query::{PaymentHistoryUseCase, PaymentStatusUseCase};
pub use update_status::UpdatePaymentStatusUseCase;
