//! Update Payment Status Use Case
//!
//! Stands in for the gateway confirmation: moves a pending payment to
//! `completed` or `failed` exactly once.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::Payment;
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::PaymentStatus;
use crate::error::{PaymentError, PaymentResult};

pub struct UpdatePaymentStatusUseCase<P>
where
    P: PaymentRepository,
{
    repo: Arc<P>,
}

impl<P> UpdatePaymentStatusUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        transaction_id: &str,
        user_id: &UserId,
        status: &str,
    ) -> PaymentResult<Payment> {
        let next: PaymentStatus = status.parse()?;

        let mut payment = self
            .repo
            .find_owned(transaction_id, user_id)
            .await?
            .ok_or(PaymentError::NotFound)?;

        payment.transition(next, Utc::now())?;

        if !self.repo.settle(&payment).await? {
            // Lost a race with a concurrent update; report what is stored now
            let stored = self
                .repo
                .find_owned(transaction_id, user_id)
                .await?
                .ok_or(PaymentError::NotFound)?;
            return Err(PaymentError::InvalidTransition {
                from: stored.status,
                to: next,
            });
        }

        tracing::info!(
            transaction_id = %payment.transaction_id,
            user_id = %user_id,
            status = %payment.status,
            "Payment settled"
        );

        Ok(payment)
    }
}
