//! Review HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::ai::prompts;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{is_unique_violation, BackendError, BackendResult};
use crate::backend::listings::load_property;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::notify_or_log;
use crate::backend::server::state::AppState;
use crate::shared::notification::NotificationKind;
use crate::shared::review::{CreateReviewRequest, ListReviewsResponse, Review, ReviewSummaryResponse};

/// GET /api/properties/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> BackendResult<Json<ListReviewsResponse>> {
    let property = load_property(&state, property_id).await?;
    let reviews = db::list_reviews(&state.db_pool, property.id).await?;
    let rating = db::rating_summary(&state.db_pool, property.id).await?;
    Ok(Json(ListReviewsResponse { reviews, rating }))
}

/// POST /api/properties/{id}/reviews
///
/// # Errors
///
/// * `400 Bad Request` - If the rating or comment is out of bounds
/// * `403 Forbidden` - If the caller owns the property
/// * `409 Conflict` - If the caller already reviewed it
pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(property_id): Path<Uuid>,
    Json(request): Json<CreateReviewRequest>,
) -> BackendResult<(StatusCode, Json<Review>)> {
    request.validate()?;
    let property = load_property(&state, property_id).await?;
    if property.landlord_id == user.user_id {
        return Err(BackendError::forbidden("You cannot review your own property"));
    }

    let author = get_user_by_id(&state.db_pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User no longer exists"))?;

    let review = db::insert_review(&state.db_pool, property.id, author.id, &author.username, request)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Duplicate review: user {} property {}", author.id, property.id);
                BackendError::conflict("You have already reviewed this property")
            } else {
                BackendError::from(e)
            }
        })?;

    notify_or_log(
        &state,
        property.landlord_id,
        NotificationKind::Review,
        format!("{} rated \"{}\" {}/5", author.username, property.title, review.rating),
        Some(format!("/properties/{}", property.id)),
    )
    .await;

    tracing::info!("Review {} created for property {}", review.id, property.id);
    Ok((StatusCode::CREATED, Json(review)))
}

/// DELETE /api/reviews/{id}
///
/// Only the author may delete a review.
pub async fn delete_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(review_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    let review = db::get_review(&state.db_pool, review_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Review not found"))?;

    if review.user_id != user.user_id {
        return Err(BackendError::forbidden("Only the author can delete this review"));
    }

    db::delete_review(&state.db_pool, review.id).await?;
    tracing::info!("Review {} deleted", review.id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/properties/{id}/reviews/summary
///
/// No upstream call is made for a property without reviews.
pub async fn review_summary(
    State(state): State<AppState>,
    Path(property_id): Path<Uuid>,
) -> BackendResult<Json<ReviewSummaryResponse>> {
    let property = load_property(&state, property_id).await?;
    let reviews = db::list_reviews(&state.db_pool, property.id).await?;
    let review_count = reviews.len() as i64;

    if reviews.is_empty() {
        return Ok(Json(ReviewSummaryResponse { summary: None, review_count }));
    }

    let ai = state.ai_client()?;
    let summary = ai
        .generate(
            prompts::REVIEW_SUMMARY_SYSTEM_PROMPT,
            &prompts::review_summary_prompt(&property.title, &reviews),
        )
        .await?;

    Ok(Json(ReviewSummaryResponse {
        summary: Some(summary),
        review_count,
    }))
}
