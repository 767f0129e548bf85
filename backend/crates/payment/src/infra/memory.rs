//! In-Memory Repository Implementation
//!
//! Backs the router tests and the client crate's end-to-end tests.

use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::Payment;
use crate::domain::repository::PaymentRepository;
use crate::domain::value_object::PaymentStatus;
use crate::error::PaymentResult;

#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
    /// Insertion order
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: &Payment) -> PaymentResult<()> {
        self.payments.write().await.push(payment.clone());
        Ok(())
    }

    async fn find_owned(
        &self,
        transaction_id: &str,
        user_id: &UserId,
    ) -> PaymentResult<Option<Payment>> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .find(|p| p.transaction_id == transaction_id && &p.user_id == user_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> PaymentResult<Vec<Payment>> {
        let mut owned: Vec<Payment> = self
            .payments
            .read()
            .await
            .iter()
            .rev()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn settle(&self, payment: &Payment) -> PaymentResult<bool> {
        let mut payments = self.payments.write().await;
        let stored = payments.iter_mut().find(|p| {
            p.transaction_id == payment.transaction_id
                && p.user_id == payment.user_id
                && p.status == PaymentStatus::Pending
        });

        match stored {
            Some(stored) => {
                stored.status = payment.status;
                stored.completed_at = payment.completed_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::PaymentIntent;
    use crate::domain::value_object::PaymentMethod;
    use chrono::Utc;

    fn open(user_id: UserId) -> Payment {
        Payment::open(
            user_id,
            PaymentIntent {
                plan_id: "Standard Plan".to_string(),
                amount: 2.0,
                method: PaymentMethod::BankTransfer,
                mobile_number: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_settle_is_conditional() {
        let repo = InMemoryPaymentRepository::new();
        let user_id = UserId::new();
        let payment = open(user_id);
        repo.create(&payment).await.unwrap();

        let mut completed = payment.clone();
        completed.transition(PaymentStatus::Completed, Utc::now()).unwrap();
        let mut failed = payment.clone();
        failed.transition(PaymentStatus::Failed, Utc::now()).unwrap();

        assert!(repo.settle(&completed).await.unwrap());
        assert!(!repo.settle(&failed).await.unwrap());

        let stored = repo
            .find_owned(&payment.transaction_id, &user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn test_lookups_are_owner_scoped() {
        let repo = InMemoryPaymentRepository::new();
        let owner = UserId::new();
        let payment = open(owner);
        repo.create(&payment).await.unwrap();

        let stranger = UserId::new();
        assert!(
            repo.find_owned(&payment.transaction_id, &stranger)
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.list_by_user(&stranger).await.unwrap().is_empty());
        assert_eq!(repo.list_by_user(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let repo = InMemoryPaymentRepository::new();
        let user_id = UserId::new();
        let first = open(user_id);
        let second = open(user_id);
        repo.create(&first).await.unwrap();
        repo.create(&second).await.unwrap();

        let history = repo.list_by_user(&user_id).await.unwrap();
        assert_eq!(history[0].transaction_id, second.transaction_id);
        assert_eq!(history[1].transaction_id, first.transaction_id);
    }
}
