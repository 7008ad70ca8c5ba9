//! Favorites HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::error::{is_unique_violation, BackendError, BackendResult};
use crate::backend::listings::load_property;
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::notify_or_log;
use crate::backend::server::state::AppState;
use crate::shared::favorite::{AddFavoriteRequest, Favorite, ListFavoritesResponse};
use crate::shared::notification::NotificationKind;

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<ListFavoritesResponse>> {
    let favorites = db::list_favorites(&state.db_pool, user.user_id).await?;
    Ok(Json(ListFavoritesResponse { favorites }))
}

/// POST /api/favorites
///
/// # Errors
///
/// * `404 Not Found` - If the property does not exist
/// * `409 Conflict` - If the property is already a favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<AddFavoriteRequest>,
) -> BackendResult<(StatusCode, Json<Favorite>)> {
    let property = load_property(&state, request.property_id).await?;

    let favorite = db::add_favorite(&state.db_pool, user.user_id, property.id)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!("Duplicate favorite: user {} property {}", user.user_id, property.id);
                BackendError::conflict("Property already in favorites")
            } else {
                BackendError::from(e)
            }
        })?;

    if property.landlord_id != user.user_id {
        notify_or_log(
            &state,
            property.landlord_id,
            NotificationKind::Favorite,
            format!("Someone saved your property \"{}\"", property.title),
            Some(format!("/properties/{}", property.id)),
        )
        .await;
    }

    tracing::info!("User {} favorited property {}", user.user_id, property.id);
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/favorites/{property_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(property_id): Path<Uuid>,
) -> BackendResult<StatusCode> {
    if !db::remove_favorite(&state.db_pool, user.user_id, property_id).await? {
        return Err(BackendError::not_found("Favorite not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
