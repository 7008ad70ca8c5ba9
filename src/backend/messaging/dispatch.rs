/**
 * Message Dispatch
 *
 * The single path a chat message takes once its conversation is known,
 * whether it arrived over REST, over the WebSocket relay or was written by
 * the assistant:
 *
 * 1. Validate and persist the message
 * 2. Push a `newMessage` frame to both participants (best-effort)
 * 3. Notify the counterparty
 * 4. Schedule the scripted auto-reply when a student's message asks about
 *    availability or viewings
 */

use uuid::Uuid;

use super::db;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::notifications::notify_or_log;
use crate::backend::realtime::auto_reply;
use crate::backend::server::state::AppState;
use crate::shared::messaging::message::{preview, validate_content};
use crate::shared::messaging::{ChatMessage, Conversation};
use crate::shared::notification::NotificationKind;
use crate::shared::ServerFrame;

/// Length of the message excerpt carried by a notification
const NOTIFICATION_PREVIEW_LEN: usize = 60;

/// Push a stored message to both participants
///
/// # Returns
/// Number of participants it was pushed to
pub async fn publish_message(state: &AppState, conversation: &Conversation, message: &ChatMessage) -> usize {
    let delivered = state
        .registry
        .deliver(
            &[conversation.student_id, conversation.landlord_id],
            &ServerFrame::new_message(message.clone()),
        )
        .await;
    tracing::debug!("[Relay] Message {} pushed to {} participant(s)", message.id, delivered);
    delivered
}

/// Persist a message and push it to both participants
pub async fn store_and_publish(
    state: &AppState,
    conversation: &Conversation,
    message: &ChatMessage,
) -> BackendResult<()> {
    db::insert_message(&state.db_pool, message).await?;
    publish_message(state, conversation, message).await;
    Ok(())
}

/// Post a participant's message into a conversation
///
/// # Errors
///
/// * `400 Bad Request` - If the content is empty or too long
/// * `403 Forbidden` - If the sender is not a participant
pub async fn post_message(
    state: &AppState,
    conversation: &Conversation,
    sender_id: Uuid,
    content: String,
) -> BackendResult<ChatMessage> {
    let recipient_id = conversation.other_participant(sender_id).ok_or_else(|| {
        tracing::warn!("User {} is not a participant of conversation {}", sender_id, conversation.id);
        BackendError::forbidden("Not a participant of this conversation")
    })?;
    validate_content(&content)?;

    let message = ChatMessage::new(conversation.id, sender_id, content);
    store_and_publish(state, conversation, &message).await?;

    notify_or_log(
        state,
        recipient_id,
        NotificationKind::Message,
        format!("New message: {}", preview(&message.content, NOTIFICATION_PREVIEW_LEN)),
        Some(format!("/messages/{}", conversation.id)),
    )
    .await;

    if auto_reply::should_auto_reply(conversation, sender_id, &message.content) {
        auto_reply::schedule(state.clone(), conversation.clone());
    }

    tracing::info!("Message {} posted to conversation {}", message.id, conversation.id);
    Ok(message)
}
