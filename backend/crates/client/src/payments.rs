//! Payment Calls and Status Polling

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::config::MIN_POLL_INTERVAL;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionController;
use crate::types::{NewPayment, Payment, PaymentBody, PaymentListBody, PaymentStatus};

impl SessionController {
    pub async fn create_payment(&self, payment: &NewPayment) -> ClientResult<Payment> {
        let body: PaymentBody = self
            .request(Method::POST, "/payments/create", Some(payment))
            .await?;
        Ok(body.payment)
    }

    /// Newest first
    pub async fn payment_history(&self) -> ClientResult<Vec<Payment>> {
        let body: PaymentListBody = self
            .request::<_, ()>(Method::GET, "/payments/history", None)
            .await?;
        Ok(body.payments)
    }

    pub async fn payment_status(&self, transaction_id: &str) -> ClientResult<Payment> {
        let body: PaymentBody = self
            .request::<_, ()>(
                Method::GET,
                &format!("/payments/status/{transaction_id}"),
                None,
            )
            .await?;
        Ok(body.payment)
    }

    /// Settle a pending payment as `completed` or `failed`
    pub async fn update_payment_status(
        &self,
        transaction_id: &str,
        status: PaymentStatus,
    ) -> ClientResult<Payment> {
        #[derive(Serialize)]
        struct Body {
            status: PaymentStatus,
        }

        let body: PaymentBody = self
            .request(
                Method::PUT,
                &format!("/payments/update/{transaction_id}"),
                Some(&Body { status }),
            )
            .await?;
        Ok(body.payment)
    }
}

/// Polls a payment until it leaves `pending`
///
/// Dropping the `wait` future stops polling.
pub struct PaymentPoller<'a> {
    session: &'a SessionController,
    interval: Duration,
    max_attempts: Option<u32>,
}

impl<'a> PaymentPoller<'a> {
    /// Interval and attempt bound from the session's `ClientConfig`
    pub fn new(session: &'a SessionController) -> Self {
        Self {
            session,
            interval: session.config().poll_interval,
            max_attempts: session.config().max_poll_attempts,
        }
    }

    /// Raised to `MIN_POLL_INTERVAL` when shorter
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Check every interval, the first check one interval from now.
    /// Returns the payment once, in its terminal state.
    pub async fn wait(&self, transaction_id: &str) -> ClientResult<Payment> {
        // `ClientConfig` fields are public, so the bound is applied here too
        let period = self.interval.max(MIN_POLL_INTERVAL);
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut attempts = 0u32;
        loop {
            ticker.tick().await;
            attempts += 1;

            let payment = self.session.payment_status(transaction_id).await?;
            if payment.status.is_terminal() {
                tracing::info!(
                    transaction_id,
                    status = ?payment.status,
                    attempts,
                    "Payment settled"
                );
                return Ok(payment);
            }

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(ClientError::PollTimeout {
                    transaction_id: transaction_id.to_string(),
                    attempts,
                });
            }

            tracing::debug!(transaction_id, attempts, "Payment still pending");
        }
    }
}
