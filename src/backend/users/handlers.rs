//! Account HTTP Handlers
//!
//! Public profiles plus self-service profile edits, password changes and
//! account deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bcrypt::{hash, verify};
use uuid::Uuid;

use crate::backend::auth::users::{self, get_user_by_id};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::user::{ChangePasswordRequest, PublicProfile, UpdateProfileRequest, UserProfile};

/// GET /api/users/{id}
pub async fn get_public_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> BackendResult<Json<PublicProfile>> {
    let user = get_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    Ok(Json(user.public_profile()))
}

/// PUT /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> BackendResult<Json<UserProfile>> {
    request.validate()?;

    let updated = users::update_profile(&state.db_pool, user.user_id, &request)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("Profile updated for {}", user.user_id);
    Ok(Json(updated.profile()))
}

/// PUT /api/users/me/password
///
/// # Errors
///
/// * `400 Bad Request` - If the new password is too short
/// * `401 Unauthorized` - If the current password is wrong
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> BackendResult<StatusCode> {
    request.validate()?;

    let account = get_user_by_id(&state.db_pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User no longer exists"))?;

    if !verify(&request.current_password, &account.password_hash)? {
        tracing::warn!("Wrong current password for {}", user.user_id);
        return Err(BackendError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash(&request.new_password, state.config.bcrypt_cost)?;
    users::update_password(&state.db_pool, account.id, &password_hash).await?;

    tracing::info!("Password changed for {}", account.id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/users/me
///
/// Deleting a landlord removes their listings and everything attached to
/// them. A live WebSocket connection of the user is closed.
pub async fn delete_me(State(state): State<AppState>, AuthUser(user): AuthUser) -> BackendResult<StatusCode> {
    if !users::delete_user(&state.db_pool, user.user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    if let Some(handle) = state.registry.get(user.user_id).await {
        state.registry.unregister(user.user_id, handle.conn_id()).await;
        handle.close();
    }

    tracing::info!("Account {} deleted", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
