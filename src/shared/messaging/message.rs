//! Chat Message Data Structure
//!
//! Messages belong to exactly one conversation, are immutable once created and
//! are ordered by creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Longest accepted message body, in characters
pub const MAX_MESSAGE_LEN: usize = 2000;

/// Represents a chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    /// Written by the assistant on the landlord's behalf
    #[serde(default)]
    pub is_ai_generated: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            content,
            is_ai_generated: false,
            created_at: Utc::now(),
        }
    }

    /// Mark as produced by the assistant
    pub fn ai_generated(mut self) -> Self {
        self.is_ai_generated = true;
        self
    }

    /// Get a preview of the message (first N characters)
    pub fn preview(&self, max_len: usize) -> String {
        preview(&self.content, max_len)
    }
}

/// Truncate `content` to `max_len` characters, ending in "..." when cut
pub fn preview(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        content.to_string()
    } else {
        let mut preview: String = content.chars().take(max_len.saturating_sub(3)).collect();
        preview.push_str("...");
        preview
    }
}

/// Validate a message body before it is persisted
pub fn validate_content(content: &str) -> Result<(), SharedError> {
    if content.trim().is_empty() {
        return Err(SharedError::validation("content", "Message cannot be empty"));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(SharedError::validation(
            "content",
            format!("Message must be at most {} characters", MAX_MESSAGE_LEN),
        ));
    }
    Ok(())
}

/// Request to send a message over REST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Request to have the assistant answer a question in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiReplyRequest {
    pub question: String,
}

/// Response for listing messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<ChatMessage>,
}
