//! Database operations for notifications

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::notification::{Notification, NotificationKind};

/// Most notifications returned by a single listing
pub const LIST_LIMIT: i64 = 100;

fn notification_from_row(row: &SqliteRow) -> Result<Notification, sqlx::Error> {
    let kind: String = row.try_get("kind")?;
    Ok(Notification {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        kind: NotificationKind::from_str(&kind).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        message: row.try_get("message")?,
        link: row.try_get("link")?,
        is_read: row.try_get("is_read")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn insert_notification(pool: &SqlitePool, notification: &Notification) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, kind, message, link, is_read, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(notification.id)
    .bind(notification.user_id)
    .bind(notification.kind.as_str())
    .bind(&notification.message)
    .bind(&notification.link)
    .bind(notification.is_read)
    .bind(notification.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// A user's notifications, newest first
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, kind, message, link, is_read, created_at
        FROM notifications
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await?;

    rows.iter().map(notification_from_row).collect()
}

pub async fn unread_count(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Flip every unread notification of a user to read
///
/// # Returns
/// Number of notifications changed
pub async fn mark_all_read(pool: &SqlitePool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
