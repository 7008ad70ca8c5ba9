//! Notification HTTP Handlers

use axum::{extract::State, Json};

use super::db;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::notification::{ListNotificationsResponse, MarkAllReadResponse, UnreadCountResponse};

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<ListNotificationsResponse>> {
    let notifications = db::list_for_user(&state.db_pool, user.user_id).await?;
    Ok(Json(ListNotificationsResponse { notifications }))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<UnreadCountResponse>> {
    let count = db::unread_count(&state.db_pool, user.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> BackendResult<Json<MarkAllReadResponse>> {
    let updated = db::mark_all_read(&state.db_pool, user.user_id).await?;
    tracing::info!("Marked {} notifications read for {}", updated, user.user_id);
    Ok(Json(MarkAllReadResponse { updated }))
}
