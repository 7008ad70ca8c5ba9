//! AI HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::prompts;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::listings::load_property;
use crate::backend::messaging::handlers::load_participant_conversation;
use crate::backend::messaging::store_and_publish;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::listing::{GenerateDescriptionRequest, GenerateDescriptionResponse};
use crate::shared::messaging::message::validate_content;
use crate::shared::messaging::{AiReplyRequest, ChatMessage};
use crate::shared::Role;

/// POST /api/ai/description
///
/// # Errors
///
/// * `403 Forbidden` - If the caller is not a landlord
/// * `503 Service Unavailable` - If no API key is configured
pub async fn generate_description(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<GenerateDescriptionRequest>,
) -> BackendResult<Json<GenerateDescriptionResponse>> {
    user.require_role(Role::Landlord)?;
    request.validate()?;
    let ai = state.ai_client()?;

    let description = ai
        .generate(prompts::DESCRIPTION_SYSTEM_PROMPT, &prompts::description_prompt(&request))
        .await?;

    tracing::info!("Generated description for landlord {} ({} chars)", user.user_id, description.len());
    Ok(Json(GenerateDescriptionResponse { description }))
}

/// POST /api/conversations/{id}/ai-reply
///
/// Answers the student's question from the listing details and posts the
/// answer into the conversation as the landlord's message, flagged as AI
/// generated.
///
/// # Errors
///
/// * `403 Forbidden` - If the caller is not the conversation's student
/// * `503 Service Unavailable` - If no API key is configured
pub async fn ai_reply(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(conversation_id): Path<Uuid>,
    Json(request): Json<AiReplyRequest>,
) -> BackendResult<(StatusCode, Json<ChatMessage>)> {
    let conversation = load_participant_conversation(&state, conversation_id, user.user_id).await?;
    if conversation.student_id != user.user_id {
        return Err(BackendError::forbidden("Only the student can ask the assistant"));
    }
    validate_content(&request.question)?;
    let ai = state.ai_client()?;

    let property = load_property(&state, conversation.property_id).await?;
    let answer = ai
        .generate(prompts::QA_SYSTEM_PROMPT, &prompts::question_prompt(&property, &request.question))
        .await?;

    let message = ChatMessage::new(conversation.id, conversation.landlord_id, answer).ai_generated();
    store_and_publish(&state, &conversation, &message).await?;

    tracing::info!("AI reply {} posted to conversation {}", message.id, conversation.id);
    Ok((StatusCode::CREATED, Json(message)))
}
