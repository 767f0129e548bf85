//! Wire Types
//!
//! Mirrors of the server's JSON bodies. The `success` flag of the envelope
//! is implied by the status code and ignored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub email_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Mtn,
    Orange,
    BankTransfer,
    CreditCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub transaction_id: String,
    pub plan_id: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub mobile_number: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Body of `POST /payments/create`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub plan_id: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

impl NewPayment {
    pub fn bank_transfer(plan_id: impl Into<String>, amount: f64) -> Self {
        Self {
            plan_id: plan_id.into(),
            amount,
            payment_method: PaymentMethod::BankTransfer,
            mobile_number: None,
        }
    }

    pub fn mobile_money(
        plan_id: impl Into<String>,
        amount: f64,
        operator: PaymentMethod,
        mobile_number: impl Into<String>,
    ) -> Self {
        Self {
            plan_id: plan_id.into(),
            amount,
            payment_method: operator,
            mobile_number: Some(mobile_number.into()),
        }
    }
}

/// Body of `POST /contact`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

/// Body of `POST /career/apply`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: i32,
    pub education: String,
    pub resume_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

// ============================================================================
// Envelope payloads
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct UserBody {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentBody {
    pub payment: Payment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentListBody {
    pub payments: Vec<Payment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Any success body; only the status matters
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {}
