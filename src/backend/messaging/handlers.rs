//! Messaging HTTP Handlers
//!
//! Conversations are opened by students about a specific property. Only the
//! two participants may read or post in a conversation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::{db, dispatch};
use crate::backend::error::{is_unique_violation, BackendError, BackendResult};
use crate::backend::listings::load_property;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    ChatMessage, Conversation, ListConversationsResponse, ListMessagesResponse, SendMessageRequest,
    StartConversationRequest,
};
use crate::shared::Role;

/// Load a conversation the caller takes part in
///
/// # Errors
///
/// * `404 Not Found` - If the conversation does not exist
/// * `403 Forbidden` - If the caller is not a participant
pub async fn load_participant_conversation(
    state: &AppState,
    conversation_id: Uuid,
    user_id: Uuid,
) -> BackendResult<Conversation> {
    let conversation = db::get_conversation(&state.db_pool, conversation_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Conversation not found"))?;

    if !conversation.has_participant(user_id) {
        tracing::warn!("User {} denied access to conversation {}", user_id, conversation_id);
        return Err(BackendError::forbidden("Not a participant of this conversation"));
    }
    Ok(conversation)
}

/// POST /api/conversations
///
/// Returns the existing conversation when the student already has one about
/// this property.
///
/// # Errors
///
/// * `400 Bad Request` - If the caller owns the property
/// * `403 Forbidden` - If the caller is not a student
/// * `404 Not Found` - If the property does not exist
pub async fn start_conversation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<StartConversationRequest>,
) -> BackendResult<Json<Conversation>> {
    let property = load_property(&state, request.property_id).await?;

    if property.landlord_id == user.user_id {
        return Err(BackendError::bad_request("You cannot message yourself about your own property"));
    }
    user.require_role(Role::Student)?;

    if let Some(existing) = db::find_conversation(&state.db_pool, user.user_id, property.id).await? {
        return Ok(Json(existing));
    }

    match db::create_conversation(&state.db_pool, user.user_id, property.landlord_id, property.id).await {
        Ok(conversation) => {
            tracing::info!("Conversation {} opened by {} about {}", conversation.id, user.user_id, property.id);
            Ok(Json(conversation))
        }
        // Lost a race with a concurrent request for the same pair
        Err(e) if is_unique_violation(&e) => db::find_conversation(&state.db_pool, user.user_id, property.id)
            .await?
            .map(Json)
            .ok_or_else(|| BackendError::from(e)),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<ListConversationsResponse>> {
    let conversations = db::list_conversations(&state.db_pool, user.user_id).await?;
    Ok(Json(ListConversationsResponse { conversations }))
}

/// GET /api/conversations/{id}/messages
pub async fn get_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(conversation_id): Path<Uuid>,
) -> BackendResult<Json<ListMessagesResponse>> {
    let conversation = load_participant_conversation(&state, conversation_id, user.user_id).await?;
    let messages = db::list_messages(&state.db_pool, conversation.id).await?;
    Ok(Json(ListMessagesResponse { messages }))
}

/// POST /api/conversations/{id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(conversation_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> BackendResult<(StatusCode, Json<ChatMessage>)> {
    let conversation = load_participant_conversation(&state, conversation_id, user.user_id).await?;
    let message = dispatch::post_message(&state, &conversation, user.user_id, request.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
