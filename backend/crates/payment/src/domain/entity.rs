//! Payment Entity

use chrono::{DateTime, Utc};
use kernel::id::{PaymentId, UserId};
use uuid::Uuid;

use crate::domain::value_object::{PaymentMethod, PaymentStatus};
use crate::error::{PaymentError, PaymentResult};

/// Customer request for a new payment
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub plan_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    pub mobile_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub payment_id: PaymentId,
    /// UUID v4 string handed to the customer
    pub transaction_id: String,
    pub user_id: UserId,
    pub plan_id: String,
    pub amount: f64,
    pub method: PaymentMethod,
    /// Present iff `method` is mobile money
    pub mobile_number: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    /// Present iff `status` is completed
    pub completed_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Validate an intent and open a `pending` payment for it
    pub fn open(user_id: UserId, intent: PaymentIntent) -> PaymentResult<Self> {
        let plan_id = intent.plan_id.trim();
        if plan_id.is_empty() {
            return Err(PaymentError::Validation("Plan is required".to_string()));
        }

        if !intent.amount.is_finite() || intent.amount <= 0.0 {
            return Err(PaymentError::Validation(
                "Amount must be greater than 0".to_string(),
            ));
        }

        let mobile_number = intent
            .mobile_number
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        match (intent.method.is_mobile_money(), &mobile_number) {
            (true, None) => {
                return Err(PaymentError::Validation(
                    "Mobile number is required for mobile money payments".to_string(),
                ));
            }
            (false, Some(_)) => {
                return Err(PaymentError::Validation(
                    "Mobile number is only accepted for mobile money payments".to_string(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            payment_id: PaymentId::new(),
            transaction_id: Uuid::new_v4().to_string(),
            user_id,
            plan_id: plan_id.to_string(),
            amount: intent.amount,
            method: intent.method,
            mobile_number,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    /// Apply a status change; `completed` stamps `completed_at`
    pub fn transition(&mut self, next: PaymentStatus, now: DateTime<Utc>) -> PaymentResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(PaymentError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        if next == PaymentStatus::Completed {
            self.completed_at = Some(now);
        }
        Ok(())
    }
}
