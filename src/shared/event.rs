/**
 * Real-time Frames
 *
 * This module defines the JSON frames carried over the `/ws` WebSocket.
 *
 * Client to server:
 * - `{"type": "auth", "token": "<jwt>"}`
 * - `{"type": "message", "payload": {"conversation_id": "...", "content": "..."}}`
 *
 * Server to client:
 * - `{"type": "newMessage", "payload": <ChatMessage>}`
 * - `{"type": "newNotification", "payload": <Notification>}`
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;
use super::messaging::ChatMessage;
use super::notification::Notification;

/// Frame received from a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Authenticate the connection with a session token
    Auth { token: String },
    /// Send a chat message
    Message { payload: OutgoingMessage },
}

/// Body of a client `message` frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub conversation_id: Uuid,
    pub content: String,
}

/// Frame pushed to a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerFrame {
    NewMessage { payload: ChatMessage },
    NewNotification { payload: Notification },
}

impl ServerFrame {
    pub fn new_message(message: ChatMessage) -> Self {
        Self::NewMessage { payload: message }
    }

    pub fn new_notification(notification: Notification) -> Self {
        Self::NewNotification { payload: notification }
    }
}

impl ClientFrame {
    /// Parse a text frame
    ///
    /// Malformed JSON and unknown frame types are serialization errors.
    pub fn parse(text: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(text)?)
    }
}
