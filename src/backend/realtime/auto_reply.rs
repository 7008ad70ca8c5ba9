//! Scripted Auto-Reply
//!
//! When a student asks about availability or viewings, a canned reply is
//! posted on the landlord's behalf after a short delay. The reply is a
//! regular message: persisted, then relayed to both participants.

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::backend::messaging::dispatch::store_and_publish;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{ChatMessage, Conversation};

/// Case-insensitive keywords that trigger the reply
pub const TRIGGER_KEYWORDS: &[&str] = &["available", "viewing"];

pub const AUTO_REPLY_TEXT: &str = "Thanks for your message! The property is still available \
and viewings can usually be arranged on weekdays. I'll get back to you shortly to confirm a time.";

pub fn contains_trigger(content: &str) -> bool {
    let content = content.to_lowercase();
    TRIGGER_KEYWORDS.iter().any(|keyword| content.contains(keyword))
}

/// Whether `sender_id` posting `content` should get the canned reply
///
/// Only messages from the conversation's student trigger it.
pub fn should_auto_reply(conversation: &Conversation, sender_id: Uuid, content: &str) -> bool {
    sender_id == conversation.student_id && contains_trigger(content)
}

/// Post the canned reply after the configured delay
pub fn schedule(state: AppState, conversation: Conversation) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(state.config.auto_reply_delay).await;

        let reply = ChatMessage::new(conversation.id, conversation.landlord_id, AUTO_REPLY_TEXT.to_string());
        match store_and_publish(&state, &conversation, &reply).await {
            Ok(()) => tracing::info!("[AutoReply] Replied in conversation {}", conversation.id),
            Err(e) => tracing::error!("[AutoReply] Failed in conversation {}: {}", conversation.id, e),
        }
    })
}
