/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username (or email when the identifier contains '@')
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown users and wrong passwords both return 401 with the same message
 * - User passwords are never returned in responses
 */

use axum::{
    extract::State,
    response::Json,
};
use bcrypt::verify;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{get_user_by_email, get_user_by_username};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `500 Internal Server Error` - If database query or token generation fails
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> BackendResult<Json<AuthResponse>> {
    tracing::info!("Login request for: {}", request.username);

    let user = if request.username.contains('@') {
        get_user_by_email(&state.db_pool, &request.username).await?
    } else {
        get_user_by_username(&state.db_pool, &request.username).await?
    };

    let user = user.ok_or_else(|| {
        tracing::warn!("User not found: {}", request.username);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(
        &state.config.jwt_secret,
        state.config.token_ttl_days,
        user.id,
        &user.email,
        user.role,
    )?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.profile(),
    }))
}
