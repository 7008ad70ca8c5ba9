//! Conversation Data Structure
//!
//! A conversation ties exactly one student, one landlord and one property. It is
//! created lazily on first contact and there is at most one per
//! (student, property) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::user::Role;

/// A student-landlord thread about one property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conversation {
    pub id: Uuid,
    pub student_id: Uuid,
    pub landlord_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Check if user is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.student_id == user_id || self.landlord_id == user_id
    }

    /// Whichever of the two participants is not `current_user_id`
    ///
    /// Returns `None` when `current_user_id` is not a participant.
    pub fn other_participant(&self, current_user_id: Uuid) -> Option<Uuid> {
        if current_user_id == self.student_id {
            Some(self.landlord_id)
        } else if current_user_id == self.landlord_id {
            Some(self.student_id)
        } else {
            None
        }
    }
}

/// Conversation as listed in a user's inbox
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: String,
    pub other_user_id: Uuid,
    pub other_username: String,
    pub other_role: Role,
    /// Preview text of last message
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Response for listing conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConversationsResponse {
    pub conversations: Vec<ConversationSummary>,
}

/// Request to open (or reopen) a conversation about a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationRequest {
    pub property_id: Uuid,
}
