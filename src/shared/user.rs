//! User Data Structures
//!
//! Roles, verification states and the client-safe views of a user account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Looking for housing
    Student,
    /// Lists housing
    Landlord,
    /// Reviews identity verification applications
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Landlord => "landlord",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, SharedError> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "landlord" => Ok(Role::Landlord),
            "admin" => Ok(Role::Admin),
            other => Err(SharedError::unknown_variant("role", other)),
        }
    }
}

/// Identity verification state of an account
///
/// Moves `none -> pending` when the user submits an application, and
/// `pending -> approved | rejected` only through an admin decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    None,
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::None => "none",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Approved => "approved",
            VerificationStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, SharedError> {
        match s.to_lowercase().as_str() {
            "none" => Ok(VerificationStatus::None),
            "pending" => Ok(VerificationStatus::Pending),
            "approved" => Ok(VerificationStatus::Approved),
            "rejected" => Ok(VerificationStatus::Rejected),
            other => Err(SharedError::unknown_variant("verification status", other)),
        }
    }
}

/// Account as seen by its owner (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub university: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Account as seen by other users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicProfile {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub university: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for PublicProfile {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            role: profile.role,
            verification_status: profile.verification_status,
            full_name: profile.full_name,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            university: profile.university,
            created_at: profile.created_at,
        }
    }
}

/// Shortest accepted password, in bytes
pub const MIN_PASSWORD_LEN: usize = 8;

/// Profile fields a user may change on their own account
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub university: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(name) = &self.full_name {
            if name.chars().count() > 100 {
                return Err(SharedError::validation("full_name", "Full name must be at most 100 characters"));
            }
        }
        if let Some(bio) = &self.bio {
            if bio.chars().count() > 1000 {
                return Err(SharedError::validation("bio", "Bio must be at most 1000 characters"));
            }
        }
        if let Some(phone) = &self.phone {
            if phone.chars().count() > 30 {
                return Err(SharedError::validation("phone", "Phone number is too long"));
            }
        }
        Ok(())
    }
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.new_password.len() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "new_password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        Ok(())
    }
}
