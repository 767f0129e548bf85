//! Domain Value Objects
//!
//! Triage statuses. Staff may set any status from any status.

use std::str::FromStr;

use auth::domain::value_object::email::Email;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, IntakeResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    #[display("new")]
    New,
    #[display("in_progress")]
    InProgress,
    #[display("resolved")]
    Resolved,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::InProgress => "in_progress",
            ContactStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for ContactStatus {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ContactStatus::New),
            "in_progress" => Ok(ContactStatus::InProgress),
            "resolved" => Ok(ContactStatus::Resolved),
            other => Err(IntakeError::Validation(format!("Invalid status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("reviewed")]
    Reviewed,
    #[display("interviewed")]
    Interviewed,
    #[display("accepted")]
    Accepted,
    #[display("rejected")]
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "reviewed" => Ok(ApplicationStatus::Reviewed),
            "interviewed" => Ok(ApplicationStatus::Interviewed),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(IntakeError::Validation(format!("Invalid status: {other}"))),
        }
    }
}

/// Trimmed, non-empty form field
pub fn required(value: &str, label: &str) -> IntakeResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(IntakeError::Validation(format!("{label} is required")));
    }
    Ok(value.to_string())
}

/// Blank optional fields are stored as absent
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lower-cased address, same rules as account emails
pub fn contact_email(value: &str) -> IntakeResult<String> {
    Email::new(value)
        .map(Email::into_db)
        .map_err(|e| IntakeError::Validation(e.to_string()))
}
