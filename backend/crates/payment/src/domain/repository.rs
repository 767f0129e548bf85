//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::Payment;
use crate::error::PaymentResult;

/// Payment Record Store
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    async fn create(&self, payment: &Payment) -> PaymentResult<()>;

    /// Look up a payment by transaction id, only if `user_id` owns it
    async fn find_owned(
        &self,
        transaction_id: &str,
        user_id: &UserId,
    ) -> PaymentResult<Option<Payment>>;

    /// All payments of a user, newest first
    async fn list_by_user(&self, user_id: &UserId) -> PaymentResult<Vec<Payment>>;

    /// Persist a transition of `payment` out of `pending`
    ///
    /// Returns `false` when the stored record is no longer pending.
    async fn settle(&self, payment: &Payment) -> PaymentResult<bool>;
}
