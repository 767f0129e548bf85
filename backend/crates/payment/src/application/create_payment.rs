//! Create Payment Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::{Payment, PaymentIntent};
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::PaymentMethod;
use crate::error::PaymentResult;

/// Input DTO for create payment
#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    pub plan_id: String,
    pub amount: f64,
    /// Wire name of the method (`mtn`, `orange`, `bank_transfer`, `credit_card`)
    pub method: String,
    pub mobile_number: Option<String>,
}

pub struct CreatePaymentUseCase<P>
where
    P: PaymentRepository,
{
    repo: Arc<P>,
}

impl<P> CreatePaymentUseCase<P>
where
    P: PaymentRepository,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId, input: CreatePaymentInput) -> PaymentResult<Payment> {
        let method: PaymentMethod = input.method.parse()?;

        let payment = Payment::open(
            user_id,
            PaymentIntent {
                plan_id: input.plan_id,
                amount: input.amount,
                method,
                mobile_number: input.mobile_number,
            },
        )?;

        self.repo.create(&payment).await?;

        tracing::info!(
            transaction_id = %payment.transaction_id,
            user_id = %user_id,
            method = %payment.method,
            amount = payment.amount,
            "Payment created"
        );

        Ok(payment)
    }
}
