/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the user to handlers.
 *
 * Role and verification state are read from the database on every request,
 * so an admin decision takes effect without a new token.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::{Role, VerificationStatus};

/// Authenticated user data attached to request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
}

impl AuthenticatedUser {
    /// Fail with 403 unless the user has the given role
    pub fn require_role(&self, role: Role) -> BackendResult<()> {
        if self.role != role {
            tracing::warn!("User {} with role {} needs role {}", self.user_id, self.role.as_str(), role.as_str());
            return Err(BackendError::forbidden(format!("Only {}s can do this", role.as_str())));
        }
        Ok(())
    }

    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Approved
    }
}

/// Extract the bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verify a token and load the user it names
///
/// Returns 401 for bad or expired tokens and for users that no longer exist.
pub async fn authenticate(state: &AppState, token: &str) -> BackendResult<AuthenticatedUser> {
    let claims = verify_token(&state.config.jwt_secret, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Invalid user ID in token: {}", claims.sub);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user = get_user_by_id(&state.db_pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found in database: {}", user_id);
        BackendError::unauthorized("User no longer exists")
    })?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
        verification_status: user.verification_status,
    })
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts JWT token from Authorization header
/// 2. Verifies the token
/// 3. Loads the user from the database
/// 4. Attaches user data to request extensions for use in handlers
///
/// Returns 401 Unauthorized if token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthorized("Missing bearer token")
    })?;

    let user = authenticate(&app_state, token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// Requires `auth_middleware` on the route.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Missing bearer token")
            })?;

        Ok(AuthUser(user))
    }
}

/// Axum extractor for routes that personalise output when a token is present
///
/// A missing or invalid token yields `None` rather than a rejection.
#[derive(Clone, Debug)]
pub struct OptionalAuthUser(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(OptionalAuthUser(Some(user.clone())));
        }

        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(OptionalAuthUser(None));
        };

        match authenticate(state, token).await {
            Ok(user) => Ok(OptionalAuthUser(Some(user))),
            Err(BackendError::HandlerError { .. }) => Ok(OptionalAuthUser(None)),
            Err(e) => Err(e),
        }
    }
}
