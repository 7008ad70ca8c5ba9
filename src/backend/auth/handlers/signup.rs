/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email, password and role
 * 2. Check if username or email already exists
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Generate JWT token
 * 6. Return token and user info
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with the configured cost
 * - Passwords are never returned in responses
 * - `admin` cannot be chosen at signup
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use bcrypt::hash;

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username, NewUser};
use crate::backend::error::{is_unique_violation, BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If any field fails validation
/// * `409 Conflict` - If the username or email is taken
/// * `500 Internal Server Error` - If hashing, storage or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "securepassword123",
///   "role": "student"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> BackendResult<(StatusCode, Json<AuthResponse>)> {
    tracing::info!("Signup request for username: {}, email: {}", request.username, request.email);

    request.validate()?;

    if get_user_by_username(&state.db_pool, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::conflict("Username already taken"));
    }

    if get_user_by_email(&state.db_pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;

    let user = create_user(
        &state.db_pool,
        NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: request.role,
            full_name: request.full_name,
        },
    )
    .await
    .map_err(|e| {
        // Lost a race with a concurrent signup
        if is_unique_violation(&e) {
            BackendError::conflict("Username or email already registered")
        } else {
            BackendError::from(e)
        }
    })?;

    let token = create_token(
        &state.config.jwt_secret,
        state.config.token_ttl_days,
        user.id,
        &user.email,
        user.role,
    )?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.profile(),
        }),
    ))
}
