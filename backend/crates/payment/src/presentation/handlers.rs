//! HTTP Handlers
//!
//! Every route sits behind `auth::require_auth`; the caller is read from
//! the `AuthUser` extension.

use std::sync::Arc;

use auth::AuthUser;
use axum::extract::State;
use axum::response::IntoResponse;
use kernel::extract::{Json, Path};
use kernel::response;

use crate::application::{
    CreatePaymentInput, CreatePaymentUseCase, PaymentHistoryUseCase, PaymentStatusUseCase,
    UpdatePaymentStatusUseCase,
};
use crate::domain::repository::PaymentRepository;
use crate::error::PaymentResult;
use crate::presentation::dto::{
    CreatePaymentRequest, PaymentListPayload, PaymentPayload, UpdateStatusRequest,
};

/// Shared state for payment handlers
#[derive(Clone)]
pub struct PaymentAppState<P>
where
    P: PaymentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
}

/// POST /api/payments/create
pub async fn create_payment<P>(
    State(state): State<PaymentAppState<P>>,
    user: AuthUser,
    Json(req): Json<CreatePaymentRequest>,
) -> PaymentResult<impl IntoResponse>
where
    P: PaymentRepository + Clone + Send + Sync + 'static,
{
    let payment = CreatePaymentUseCase::new(state.repo.clone())
        .execute(
            user.user_id,
            CreatePaymentInput {
                plan_id: req.plan_id,
                amount: req.amount,
                method: req.payment_method,
                mobile_number: req.mobile_number,
            },
        )
        .await?;

    Ok(response::created(PaymentPayload::from(&payment)))
}

/// GET /api/payments/history
pub async fn history<P>(
    State(state): State<PaymentAppState<P>>,
    user: AuthUser,
) -> PaymentResult<impl IntoResponse>
where
    P: PaymentRepository + Clone + Send + Sync + 'static,
{
    let payments = PaymentHistoryUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    Ok(response::ok(PaymentListPayload {
        payments: payments.iter().map(Into::into).collect(),
    }))
}

/// GET /api/payments/status/{transactionId}
pub async fn status<P>(
    State(state): State<PaymentAppState<P>>,
    user: AuthUser,
    Path(transaction_id): Path<String>,
) -> PaymentResult<impl IntoResponse>
where
    P: PaymentRepository + Clone + Send + Sync + 'static,
{
    let payment = PaymentStatusUseCase::new(state.repo.clone())
        .execute(&transaction_id, &user.user_id)
        .await?;

    Ok(response::ok(PaymentPayload::from(&payment)))
}

/// PUT /api/payments/update/{transactionId}
pub async fn update_status<P>(
    State(state): State<PaymentAppState<P>>,
    user: AuthUser,
    Path(transaction_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> PaymentResult<impl IntoResponse>
where
    P: PaymentRepository + Clone + Send + Sync + 'static,
{
    let payment = UpdatePaymentStatusUseCase::new(state.repo.clone())
        .execute(&transaction_id, &user.user_id, &req.status)
        .await?;

    Ok(response::ok(PaymentPayload::from(&payment)))
}
