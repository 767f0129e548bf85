//! Contact Form Use Cases

use std::sync::Arc;

use kernel::id::ContactId;

use crate::domain::entity::{ContactForm, ContactSubmission};
use crate::domain::repository::ContactRepository;
use crate::domain::value_object::ContactStatus;
use crate::error::{IntakeError, IntakeResult};

pub struct SubmitContactUseCase<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitContactUseCase<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, form: ContactForm) -> IntakeResult<ContactSubmission> {
        let contact = ContactSubmission::submit(form)?;
        self.repo.create_contact(&contact).await?;

        tracing::info!(contact_id = %contact.contact_id, "Contact form received");
        Ok(contact)
    }
}

pub struct ListContactsUseCase<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> ListContactsUseCase<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> IntakeResult<Vec<ContactSubmission>> {
        self.repo.list_contacts().await
    }
}

pub struct UpdateContactStatusUseCase<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateContactStatusUseCase<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// An id that is not a UUID is reported like an unknown id
    pub async fn execute(&self, contact_id: &str, status: &str) -> IntakeResult<ContactSubmission> {
        let status: ContactStatus = status.parse()?;
        let contact_id: ContactId = contact_id
            .parse()
            .map_err(|_| IntakeError::ContactNotFound)?;

        let contact = self
            .repo
            .update_contact_status(&contact_id, status)
            .await?
            .ok_or(IntakeError::ContactNotFound)?;

        tracing::info!(contact_id = %contact_id, status = %status, "Contact status updated");
        Ok(contact)
    }
}
