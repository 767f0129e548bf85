//! API DTOs (Data Transfer Objects)
//!
//! Missing text fields deserialize as empty so the domain reports them by
//! name ("Name is required") instead of a generic body rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{ApplicationForm, ContactForm, ContactSubmission, JobApplication};
use crate::domain::value_object::{ApplicationStatus, ContactStatus};

// ============================================================================
// Requests
// ============================================================================

/// POST /api/contact body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl From<ContactRequest> for ContactForm {
    fn from(req: ContactRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            message: req.message,
        }
    }
}

/// POST /api/career/apply body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: Option<i32>,
    pub education: String,
    pub resume_url: String,
    pub cover_letter: Option<String>,
}

impl From<ApplicationRequest> for ApplicationForm {
    fn from(req: ApplicationRequest) -> Self {
        Self {
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            position: req.position,
            experience: req.experience,
            education: req.education,
            resume_url: req.resume_url,
            cover_letter: req.cover_letter,
        }
    }
}

/// PUT body for either submission kind
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ContactSubmission> for ContactResponse {
    fn from(c: &ContactSubmission) -> Self {
        Self {
            id: c.contact_id.to_string(),
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            message: c.message.clone(),
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub experience: i32,
    pub education: String,
    pub resume_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JobApplication> for ApplicationResponse {
    fn from(a: &JobApplication) -> Self {
        Self {
            id: a.application_id.to_string(),
            full_name: a.full_name.clone(),
            email: a.email.clone(),
            phone: a.phone.clone(),
            position: a.position.clone(),
            experience: a.experience,
            education: a.education.clone(),
            resume_url: a.resume_url.clone(),
            cover_letter: a.cover_letter.clone(),
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactPayload {
    pub contact: ContactResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactListPayload {
    pub contacts: Vec<ContactResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationPayload {
    pub application: ApplicationResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListPayload {
    pub applications: Vec<ApplicationResponse>,
}
