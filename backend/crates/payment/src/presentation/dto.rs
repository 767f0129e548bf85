//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Payment;
use crate::domain::value_object::{PaymentMethod, PaymentStatus};

// ============================================================================
// Requests
// ============================================================================

/// POST /create body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub plan_id: String,
    pub amount: f64,
    pub payment_method: String,
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// PUT /update/{transactionId} body
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub transaction_id: String,
    pub plan_id: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Payment> for PaymentResponse {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.payment_id.to_string(),
            transaction_id: payment.transaction_id.clone(),
            plan_id: payment.plan_id.clone(),
            amount: payment.amount,
            payment_method: payment.method,
            mobile_number: payment.mobile_number.clone(),
            status: payment.status,
            created_at: payment.created_at,
            completed_at: payment.completed_at,
        }
    }
}

/// `{ "payment": … }`, flattened into the success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPayload {
    pub payment: PaymentResponse,
}

impl From<&Payment> for PaymentPayload {
    fn from(payment: &Payment) -> Self {
        Self {
            payment: payment.into(),
        }
    }
}

/// `{ "payments": [ … ] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentListPayload {
    pub payments: Vec<PaymentResponse>,
}
