//! Verification Application Data Structure
//!
//! Users submit an identity document; an admin approves or rejects it, which
//! is the only way a user's verification state changes past `pending`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, SharedError> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(SharedError::unknown_variant("application status", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_url: String,
    pub note: Option<String>,
    pub status: ApplicationStatus,
    pub reviewer_id: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitVerificationRequest {
    pub document_url: String,
    pub note: Option<String>,
}

impl SubmitVerificationRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !(self.document_url.starts_with("https://") || self.document_url.starts_with("http://")) {
            return Err(SharedError::validation("document_url", "Document must be an http(s) URL"));
        }
        if self.note.as_ref().is_some_and(|note| note.chars().count() > 1000) {
            return Err(SharedError::validation("note", "Note must be at most 1000 characters"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RejectVerificationRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationQuery {
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListVerificationsResponse {
    pub applications: Vec<VerificationApplication>,
}
