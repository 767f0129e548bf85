//! In-Memory Repository Implementation

use std::sync::Arc;

use kernel::id::{ApplicationId, ContactId};
use tokio::sync::RwLock;

use crate::domain::entity::{ContactSubmission, JobApplication};
use crate::domain::repository::{ApplicationRepository, ContactRepository};
use crate::domain::value_object::{ApplicationStatus, ContactStatus};
use crate::error::IntakeResult;

#[derive(Clone, Default)]
pub struct InMemoryIntakeRepository {
    contacts: Arc<RwLock<Vec<ContactSubmission>>>,
    applications: Arc<RwLock<Vec<JobApplication>>>,
}

impl InMemoryIntakeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactRepository for InMemoryIntakeRepository {
    async fn create_contact(&self, contact: &ContactSubmission) -> IntakeResult<()> {
        self.contacts.write().await.push(contact.clone());
        Ok(())
    }

    async fn list_contacts(&self) -> IntakeResult<Vec<ContactSubmission>> {
        Ok(self.contacts.read().await.iter().rev().cloned().collect())
    }

    async fn update_contact_status(
        &self,
        contact_id: &ContactId,
        status: ContactStatus,
    ) -> IntakeResult<Option<ContactSubmission>> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts
            .iter_mut()
            .find(|c| &c.contact_id == contact_id)
            .map(|c| {
                c.set_status(status);
                c.clone()
            }))
    }
}

impl ApplicationRepository for InMemoryIntakeRepository {
    async fn create_application(&self, application: &JobApplication) -> IntakeResult<()> {
        self.applications.write().await.push(application.clone());
        Ok(())
    }

    async fn list_applications(&self) -> IntakeResult<Vec<JobApplication>> {
        Ok(self.applications.read().await.iter().rev().cloned().collect())
    }

    async fn update_application_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> IntakeResult<Option<JobApplication>> {
        let mut applications = self.applications.write().await;
        Ok(applications
            .iter_mut()
            .find(|a| &a.application_id == application_id)
            .map(|a| {
                a.set_status(status);
                a.clone()
            }))
    }
}
