/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * information about the currently authenticated user.
 *
 * The route sits behind `auth_middleware`, so the token has already been
 * verified and the user ID is available from `AuthUser`.
 */

use axum::{
    extract::State,
    response::Json,
};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::user::UserProfile;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the token is missing or invalid (middleware)
/// * `404 Not Found` - If user was deleted in the meantime
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> BackendResult<Json<UserProfile>> {
    let user = get_user_by_id(&state.db_pool, auth.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", auth.user_id);
            BackendError::not_found("User not found")
        })?;

    Ok(Json(user.profile()))
}
