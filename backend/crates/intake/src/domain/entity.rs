//! Submission Entities

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationId, ContactId};

use crate::domain::value_object::{
    ApplicationStatus, ContactStatus, contact_email, optional, required,
};
use crate::error::{IntakeError, IntakeResult};

/// Contact form fields as submitted
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn submit(form: ContactForm) -> IntakeResult<Self> {
        let now = Utc::now();
        Ok(Self {
            contact_id: ContactId::new(),
            name: required(&form.name, "Name")?,
            email: contact_email(&form.email)?,
            phone: optional(form.phone),
            message: required(&form.message, "Message")?,
            status: ContactStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_status(&mut self, status: ContactStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Career application fields as submitted
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: Option<i32>,
    pub education: String,
    pub resume_url: String,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobApplication {
    pub application_id: ApplicationId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    /// Years of experience
    pub experience: i32,
    pub education: String,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    pub fn submit(form: ApplicationForm) -> IntakeResult<Self> {
        let experience = form.experience.ok_or_else(|| {
            IntakeError::Validation("Years of experience is required".to_string())
        })?;
        if experience < 0 {
            return Err(IntakeError::Validation(
                "Experience years cannot be negative".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            application_id: ApplicationId::new(),
            full_name: required(&form.full_name, "Full name")?,
            email: contact_email(&form.email)?,
            phone: required(&form.phone, "Phone number")?,
            position: required(&form.position, "Position")?,
            experience,
            education: required(&form.education, "Education")?,
            resume_url: required(&form.resume_url, "Resume URL")?,
            cover_letter: optional(form.cover_letter),
            status: ApplicationStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> ApplicationForm {
        ApplicationForm {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            phone: "670000000".to_string(),
            position: "Actuary".to_string(),
            experience: Some(3),
            education: "BSc Mathematics".to_string(),
            resume_url: "https://cv.test/ada.pdf".to_string(),
            cover_letter: None,
        }
    }

    #[test]
    fn test_contact_defaults_to_new() {
        let contact = ContactSubmission::submit(ContactForm {
            name: "Ada".to_string(),
            email: "ADA@x.com".to_string(),
            phone: Some(String::new()),
            message: "Hello".to_string(),
        })
        .unwrap();
        assert_eq!(contact.status, ContactStatus::New);
        assert_eq!(contact.email, "ada@x.com");
        assert!(contact.phone.is_none());
    }

    #[test]
    fn test_contact_requires_message() {
        let err = ContactSubmission::submit(ContactForm {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            ..ContactForm::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Message is required");
    }

    #[test]
    fn test_application_checks() {
        let app = JobApplication::submit(application()).unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);

        let mut negative = application();
        negative.experience = Some(-1);
        assert!(JobApplication::submit(negative).is_err());

        let mut unknown = application();
        unknown.experience = None;
        assert!(JobApplication::submit(unknown).is_err());

        let mut missing = application();
        missing.resume_url = String::new();
        assert_eq!(
            JobApplication::submit(missing).unwrap_err().to_string(),
            "Resume URL is required"
        );
    }

    #[test]
    fn test_any_status_from_any_status() {
        let mut app = JobApplication::submit(application()).unwrap();
        app.set_status(ApplicationStatus::Rejected);
        app.set_status(ApplicationStatus::Pending);
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert!(app.updated_at >= app.created_at);
    }
}
