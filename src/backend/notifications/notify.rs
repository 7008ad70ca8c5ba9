/**
 * Notification Dispatch
 *
 * Persists a notification and pushes it to the recipient's live connection
 * as a `newNotification` frame. Delivery is best-effort: an offline recipient
 * sees the notification next time they list them.
 */

use uuid::Uuid;

use super::db;
use crate::backend::error::BackendResult;
use crate::backend::server::state::AppState;
use crate::shared::notification::{Notification, NotificationKind};
use crate::shared::ServerFrame;

/// Persist a notification and push it if the recipient is online
pub async fn notify(
    state: &AppState,
    user_id: Uuid,
    kind: NotificationKind,
    message: impl Into<String>,
    link: Option<String>,
) -> BackendResult<Notification> {
    let notification = Notification::new(user_id, kind, message.into(), link);
    db::insert_notification(&state.db_pool, &notification).await?;

    let pushed = state
        .registry
        .send_to(user_id, ServerFrame::new_notification(notification.clone()))
        .await;
    tracing::debug!(
        "[Notify] {} notification for {} (pushed: {})",
        kind.as_str(),
        user_id,
        pushed
    );

    Ok(notification)
}

/// Like `notify`, for side effects that must not fail the surrounding request
pub async fn notify_or_log(
    state: &AppState,
    user_id: Uuid,
    kind: NotificationKind,
    message: impl Into<String>,
    link: Option<String>,
) {
    if let Err(e) = notify(state, user_id, kind, message, link).await {
        tracing::error!("Failed to create {} notification for {}: {}", kind.as_str(), user_id, e);
    }
}
