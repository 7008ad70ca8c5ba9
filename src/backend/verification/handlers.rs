//! Verification HTTP Handlers
//!
//! Students and landlords submit applications; admins decide them. A
//! landlord needs an approved verification before listing properties.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::list_users;
use crate::backend::error::{is_unique_violation, BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::notifications::notify_or_log;
use crate::backend::server::state::AppState;
use crate::shared::notification::NotificationKind;
use crate::shared::user::UserProfile;
use crate::shared::verification::{
    ApplicationStatus, ListVerificationsResponse, RejectVerificationRequest, SubmitVerificationRequest,
    VerificationApplication, VerificationQuery,
};
use crate::shared::{Role, VerificationStatus};

/// POST /api/verification
///
/// # Errors
///
/// * `400 Bad Request` - If the user is already verified or the URL is invalid
/// * `403 Forbidden` - If the caller is an admin
/// * `409 Conflict` - If an application is already pending
pub async fn submit_verification(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SubmitVerificationRequest>,
) -> BackendResult<(StatusCode, Json<VerificationApplication>)> {
    if user.role == Role::Admin {
        return Err(BackendError::forbidden("Admins do not need verification"));
    }
    if user.verification_status == VerificationStatus::Approved {
        return Err(BackendError::bad_request("Account is already verified"));
    }
    request.validate()?;

    if db::has_pending(&state.db_pool, user.user_id).await? {
        tracing::warn!("User {} already has a pending application", user.user_id);
        return Err(BackendError::conflict("A verification application is already pending"));
    }

    let application = db::submit_application(&state.db_pool, user.user_id, request)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent submission
            if is_unique_violation(&e) {
                BackendError::conflict("A verification application is already pending")
            } else {
                BackendError::from(e)
            }
        })?;
    tracing::info!("Verification application {} submitted by {}", application.id, user.user_id);
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/verification
pub async fn my_verification(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Option<VerificationApplication>>> {
    Ok(Json(db::latest_for_user(&state.db_pool, user.user_id).await?))
}

/// GET /api/admin/verifications
pub async fn list_verifications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<VerificationQuery>,
) -> BackendResult<Json<ListVerificationsResponse>> {
    user.require_role(Role::Admin)?;
    let applications = db::list_applications(&state.db_pool, query.status).await?;
    Ok(Json(ListVerificationsResponse { applications }))
}

/// POST /api/admin/verifications/{id}/approve
pub async fn approve_verification(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(application_id): Path<Uuid>,
) -> BackendResult<Json<VerificationApplication>> {
    user.require_role(Role::Admin)?;
    let application = decide(&state, application_id, user.user_id, true, None).await?;
    Ok(Json(application))
}

/// POST /api/admin/verifications/{id}/reject
pub async fn reject_verification(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(application_id): Path<Uuid>,
    request: Option<Json<RejectVerificationRequest>>,
) -> BackendResult<Json<VerificationApplication>> {
    user.require_role(Role::Admin)?;
    let reason = request
        .and_then(|Json(request)| request.reason)
        .filter(|reason| !reason.trim().is_empty());
    let application = decide(&state, application_id, user.user_id, false, reason).await?;
    Ok(Json(application))
}

/// Apply a decision and notify the applicant
///
/// # Errors
///
/// * `404 Not Found` - If the application does not exist
/// * `409 Conflict` - If it was already decided
async fn decide(
    state: &AppState,
    application_id: Uuid,
    reviewer_id: Uuid,
    approve: bool,
    reason: Option<String>,
) -> BackendResult<VerificationApplication> {
    let existing = db::get_application(&state.db_pool, application_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Verification application not found"))?;

    if existing.status != ApplicationStatus::Pending {
        return Err(BackendError::conflict("Application has already been decided"));
    }

    let application = db::decide_application(&state.db_pool, application_id, reviewer_id, approve, reason)
        .await?
        .ok_or_else(|| BackendError::conflict("Application has already been decided"))?;

    let message = match (&application.status, &application.rejection_reason) {
        (ApplicationStatus::Approved, _) => "Your verification was approved".to_string(),
        (_, Some(reason)) => format!("Your verification was rejected: {}", reason),
        _ => "Your verification was rejected".to_string(),
    };
    notify_or_log(
        state,
        application.user_id,
        NotificationKind::Verification,
        message,
        Some("/verification".to_string()),
    )
    .await;

    tracing::info!(
        "Verification {} {} by {}",
        application.id,
        application.status.as_str(),
        reviewer_id
    );
    Ok(application)
}

/// GET /api/admin/users
pub async fn admin_list_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<Vec<UserProfile>>> {
    user.require_role(Role::Admin)?;
    let users = list_users(&state.db_pool).await?;
    Ok(Json(users.iter().map(|u| u.profile()).collect()))
}
