/**
 * Authentication Request and Response Types
 *
 * This module defines the request and response types used by authentication
 * handlers. These types are serialized/deserialized from JSON.
 */

use serde::{Deserialize, Serialize};

use crate::shared::user::{UserProfile, MIN_PASSWORD_LEN};
use crate::shared::{Role, SharedError};

/// Signup request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupRequest {
    /// Username (3-30 chars, starts with a letter, letters/digits/underscores)
    pub username: String,
    /// User email address
    pub email: String,
    /// User password (will be hashed before storage)
    pub password: String,
    /// Student or landlord; admin cannot be self-assigned
    pub role: Role,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !is_valid_username(&self.username) {
            return Err(SharedError::validation(
                "username",
                "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email format"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if self.role == Role::Admin {
            return Err(SharedError::validation("role", "Role must be student or landlord"));
        }
        Ok(())
    }
}

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Login request
///
/// `username` may also hold an email address.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

/// Authentication response
///
/// Returned by signup and login.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthResponse {
    /// JWT token for authentication
    pub token: String,
    pub user: UserProfile,
}
