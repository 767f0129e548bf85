//! Payment Queries
//!
//! Read side: history for the dashboard and single-payment status for
//! client polling.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::Payment;
use crate::domain::repository::PaymentRepository;
use crate::error::{PaymentError, PaymentResult};

pub struct PaymentHistoryUseCase<P>
where
    P: PaymentRepository,
{
    repo: Arc<P>,
}

impl<P> PaymentHistoryUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    /// Newest first
    pub async fn execute(&self, user_id: &UserId) -> PaymentResult<Vec<Payment>> {
        self.repo.list_by_user(user_id).await
    }
}

pub struct PaymentStatusUseCase<P>
where
    P: PaymentRepository,
{
    repo: Arc<P>,
}

impl<P> PaymentStatusUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, transaction_id: &str, user_id: &UserId) -> PaymentResult<Payment> {
        self.repo
            .find_owned(transaction_id, user_id)
            .await?
            .ok_or(PaymentError::NotFound)
    }
}
