//! Career Application Use Cases

use std::sync::Arc;

use kernel::id::ApplicationId;

use crate::domain::entity::{ApplicationForm, JobApplication};
use crate::domain::repository::ApplicationRepository;
use crate::domain::value_object::ApplicationStatus;
use crate::error::{IntakeError, IntakeResult};

pub struct SubmitApplicationUseCase<R>
where
    R: ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitApplicationUseCase<R>
where
    R: ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, form: ApplicationForm) -> IntakeResult<JobApplication> {
        let application = JobApplication::submit(form)?;
        self.repo.create_application(&application).await?;

        tracing::info!(
            application_id = %application.application_id,
            position = %application.position,
            "Job application received"
        );
        Ok(application)
    }
}

pub struct ListApplicationsUseCase<R>
where
    R: ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> ListApplicationsUseCase<R>
where
    R: ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> IntakeResult<Vec<JobApplication>> {
        self.repo.list_applications().await
    }
}

pub struct UpdateApplicationStatusUseCase<R>
where
    R: ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateApplicationStatusUseCase<R>
where
    R: ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, application_id: &str, status: &str) -> IntakeResult<JobApplication> {
        let status: ApplicationStatus = status.parse()?;
        let application_id: ApplicationId = application_id
            .parse()
            .map_err(|_| IntakeError::ApplicationNotFound)?;

        let application = self
            .repo
            .update_application_status(&application_id, status)
            .await?
            .ok_or(IntakeError::ApplicationNotFound)?;

        tracing::info!(
            application_id = %application_id,
            status = %status,
            "Application status updated"
        );
        Ok(application)
    }
}
