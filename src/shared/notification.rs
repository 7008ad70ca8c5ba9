//! Notification Data Structure
//!
//! Notifications belong to exactly one recipient. The only mutation after
//! creation is the bulk unread -> read flip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;

/// What the notification is about
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    Favorite,
    Review,
    Verification,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Message => "message",
            NotificationKind::Favorite => "favorite",
            NotificationKind::Review => "review",
            NotificationKind::Verification => "verification",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, SharedError> {
        match s {
            "message" => Ok(NotificationKind::Message),
            "favorite" => Ok(NotificationKind::Favorite),
            "review" => Ok(NotificationKind::Review),
            "verification" => Ok(NotificationKind::Verification),
            other => Err(SharedError::unknown_variant("notification kind", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    /// Client route the notification points at
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, kind: NotificationKind, message: String, link: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            message,
            link,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}
