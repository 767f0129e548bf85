//! Repository Traits

use kernel::id::{ApplicationId, ContactId};

use crate::domain::entity::{ContactSubmission, JobApplication};
use crate::domain::value_object::{ApplicationStatus, ContactStatus};
use crate::error::IntakeResult;

#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn create_contact(&self, contact: &ContactSubmission) -> IntakeResult<()>;

    /// Newest first
    async fn list_contacts(&self) -> IntakeResult<Vec<ContactSubmission>>;

    /// Returns the updated record, `None` when the id is unknown
    async fn update_contact_status(
        &self,
        contact_id: &ContactId,
        status: ContactStatus,
    ) -> IntakeResult<Option<ContactSubmission>>;
}

#[trait_variant::make(ApplicationRepository: Send)]
pub trait LocalApplicationRepository {
    async fn create_application(&self, application: &JobApplication) -> IntakeResult<()>;

    /// Newest first
    async fn list_applications(&self) -> IntakeResult<Vec<JobApplication>>;

    /// Returns the updated record, `None` when the id is unknown
    async fn update_application_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> IntakeResult<Option<JobApplication>>;
}
