//! HTTP Handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::{Json, Path};
use kernel::response;

use crate::application::{
    ListApplicationsUseCase, ListContactsUseCase, SubmitApplicationUseCase, SubmitContactUseCase,
    UpdateApplicationStatusUseCase, UpdateContactStatusUseCase,
};
use crate::domain::repository::{ApplicationRepository, ContactRepository};
use crate::error::IntakeResult;
use crate::presentation::dto::{
    ApplicationListPayload, ApplicationPayload, ApplicationRequest, ContactListPayload,
    ContactPayload, ContactRequest, StatusRequest,
};

const CONTACT_THANKS: &str = "Thank you for your message. We will get back to you soon.";
const APPLICATION_THANKS: &str = "Your application has been submitted successfully.";

/// Shared state for intake handlers
#[derive(Clone)]
pub struct IntakeAppState<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Contact
// ============================================================================

/// POST /api/contact
pub async fn submit_contact<R>(
    State(state): State<IntakeAppState<R>>,
    Json(req): Json<ContactRequest>,
) -> IntakeResult<impl IntoResponse>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    SubmitContactUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    Ok(response::message(StatusCode::CREATED, CONTACT_THANKS))
}

/// GET /api/contact (protected)
pub async fn list_contacts<R>(
    State(state): State<IntakeAppState<R>>,
) -> IntakeResult<impl IntoResponse>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let contacts = ListContactsUseCase::new(state.repo.clone()).execute().await?;

    Ok(response::ok(ContactListPayload {
        contacts: contacts.iter().map(Into::into).collect(),
    }))
}

/// PUT /api/contact/{id} (protected)
pub async fn update_contact_status<R>(
    State(state): State<IntakeAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> IntakeResult<impl IntoResponse>
where
    R: ContactRepository + Clone + Send + Sync + 'static,
{
    let contact = UpdateContactStatusUseCase::new(state.repo.clone())
        .execute(&id, &req.status)
        .await?;

    Ok(response::ok(ContactPayload {
        contact: (&contact).into(),
    }))
}

// ============================================================================
// Career
// ============================================================================

/// POST /api/career/apply
pub async fn submit_application<R>(
    State(state): State<IntakeAppState<R>>,
    Json(req): Json<ApplicationRequest>,
) -> IntakeResult<impl IntoResponse>
where
    R: ApplicationRepository + Clone + Send + Sync + 'static,
{
    SubmitApplicationUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    Ok(response::message(StatusCode::CREATED, APPLICATION_THANKS))
}

/// GET /api/career/applications (protected)
pub async fn list_applications<R>(
    State(state): State<IntakeAppState<R>>,
) -> IntakeResult<impl IntoResponse>
where
    R: ApplicationRepository + Clone + Send + Sync + 'static,
{
    let applications = ListApplicationsUseCase::new(state.repo.clone())
        .execute()
        .await?;

    Ok(response::ok(ApplicationListPayload {
        applications: applications.iter().map(Into::into).collect(),
    }))
}

/// PUT /api/career/application/{id} (protected)
pub async fn update_application_status<R>(
    State(state): State<IntakeAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> IntakeResult<impl IntoResponse>
where
    R: ApplicationRepository + Clone + Send + Sync + 'static,
{
    let application = UpdateApplicationStatusUseCase::new(state.repo.clone())
        .execute(&id, &req.status)
        .await?;

    Ok(response::ok(ApplicationPayload {
        application: (&application).into(),
    }))
}
