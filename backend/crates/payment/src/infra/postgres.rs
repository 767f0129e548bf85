//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{PaymentId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Payment;
use crate::domain::repository::PaymentRepository;
use crate::error::{PaymentError, PaymentResult};

const PAYMENT_COLUMNS: &str = r#"
    payment_id,
    transaction_id,
    user_id,
    plan_id,
    amount,
    payment_method,
    mobile_number,
    status,
    created_at,
    completed_at
"#;

/// PostgreSQL-backed Payment Record Store
#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PaymentRepository for PgPaymentRepository {
    async fn create(&self, payment: &Payment) -> PaymentResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id,
                transaction_id,
                user_id,
                plan_id,
                amount,
                payment_method,
                mobile_number,
                status,
                created_at,
                completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(&payment.transaction_id)
        .bind(payment.user_id.as_uuid())
        .bind(&payment.plan_id)
        .bind(payment.amount)
        .bind(payment.method.as_str())
        .bind(payment.mobile_number.as_deref())
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .bind(payment.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_owned(
        &self,
        transaction_id: &str,
        user_id: &UserId,
    ) -> PaymentResult<Option<Payment>> {
        let sql = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE transaction_id = $1 AND user_id = $2"
        );
        let row = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(transaction_id)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PaymentRow::into_payment).transpose()
    }

    async fn list_by_user(&self, user_id: &UserId) -> PaymentResult<Vec<Payment>> {
        let sql = format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(PaymentRow::into_payment).collect()
    }

    async fn settle(&self, payment: &Payment) -> PaymentResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE payments
            SET status = $3, completed_at = $4
            WHERE transaction_id = $1 AND user_id = $2 AND status = 'pending'
            "#,
        )
        .bind(&payment.transaction_id)
        .bind(payment.user_id.as_uuid())
        .bind(payment.status.as_str())
        .bind(payment.completed_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    transaction_id: String,
    user_id: Uuid,
    plan_id: String,
    amount: f64,
    payment_method: String,
    mobile_number: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl PaymentRow {
    fn into_payment(self) -> PaymentResult<Payment> {
        let corrupt = |e: PaymentError| {
            PaymentError::Internal(format!("Corrupt payment {}: {e}", self.transaction_id))
        };

        Ok(Payment {
            payment_id: PaymentId::from_uuid(self.payment_id),
            method: self.payment_method.parse().map_err(corrupt)?,
            status: self.status.parse().map_err(corrupt)?,
            transaction_id: self.transaction_id,
            user_id: UserId::from_uuid(self.user_id),
            plan_id: self.plan_id,
            amount: self.amount,
            mobile_number: self.mobile_number,
            created_at: self.created_at,
            completed_at: self.completed_at,
        })
    }
}
