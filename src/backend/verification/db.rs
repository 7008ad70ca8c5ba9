//! Database operations for verification applications
//!
//! Every write that changes an application also updates the applicant's
//! `users.verification_status` inside the same transaction.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::users::set_verification_status;
use crate::shared::verification::{ApplicationStatus, SubmitVerificationRequest, VerificationApplication};
use crate::shared::VerificationStatus;

const APPLICATION_COLUMNS: &str =
    "id, user_id, document_url, note, status, reviewer_id, rejection_reason, created_at, reviewed_at";

fn application_from_row(row: &SqliteRow) -> Result<VerificationApplication, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(VerificationApplication {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        document_url: row.try_get("document_url")?,
        note: row.try_get("note")?,
        status: ApplicationStatus::from_str(&status).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        reviewer_id: row.try_get("reviewer_id")?,
        rejection_reason: row.try_get("rejection_reason")?,
        created_at: row.try_get("created_at")?,
        reviewed_at: row.try_get("reviewed_at")?,
    })
}

pub async fn get_application<'e, E>(executor: E, id: Uuid) -> Result<Option<VerificationApplication>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!(
        "SELECT {} FROM verification_applications WHERE id = ?",
        APPLICATION_COLUMNS
    ))
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(application_from_row).transpose()
}

/// A user's most recent application
pub async fn latest_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Option<VerificationApplication>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM verification_applications WHERE user_id = ? ORDER BY created_at DESC, rowid DESC LIMIT 1",
        APPLICATION_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(application_from_row).transpose()
}

pub async fn has_pending(pool: &SqlitePool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM verification_applications WHERE user_id = ? AND status = 'pending'",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Applications, oldest first, optionally filtered by status
pub async fn list_applications(
    pool: &SqlitePool,
    status: Option<ApplicationStatus>,
) -> Result<Vec<VerificationApplication>, sqlx::Error> {
    let rows = match status {
        Some(status) => {
            sqlx::query(&format!(
                "SELECT {} FROM verification_applications WHERE status = ? ORDER BY created_at ASC, rowid ASC",
                APPLICATION_COLUMNS
            ))
            .bind(status.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "SELECT {} FROM verification_applications ORDER BY created_at ASC, rowid ASC",
                APPLICATION_COLUMNS
            ))
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(application_from_row).collect()
}

/// Store a pending application and mark the user pending
pub async fn submit_application(
    pool: &SqlitePool,
    user_id: Uuid,
    request: SubmitVerificationRequest,
) -> Result<VerificationApplication, sqlx::Error> {
    let application = VerificationApplication {
        id: Uuid::new_v4(),
        user_id,
        document_url: request.document_url,
        note: request.note.filter(|note| !note.trim().is_empty()),
        status: ApplicationStatus::Pending,
        reviewer_id: None,
        rejection_reason: None,
        created_at: Utc::now(),
        reviewed_at: None,
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO verification_applications (id, user_id, document_url, note, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(application.id)
    .bind(application.user_id)
    .bind(&application.document_url)
    .bind(&application.note)
    .bind(application.status.as_str())
    .bind(application.created_at)
    .execute(&mut *tx)
    .await?;

    set_verification_status(&mut *tx, user_id, VerificationStatus::Pending).await?;

    tx.commit().await?;
    Ok(application)
}

/// Approve or reject a pending application
///
/// # Returns
/// The decided application, or None if it was not pending
pub async fn decide_application(
    pool: &SqlitePool,
    id: Uuid,
    reviewer_id: Uuid,
    approve: bool,
    rejection_reason: Option<String>,
) -> Result<Option<VerificationApplication>, sqlx::Error> {
    let (status, user_status) = if approve {
        (ApplicationStatus::Approved, VerificationStatus::Approved)
    } else {
        (ApplicationStatus::Rejected, VerificationStatus::Rejected)
    };
    let rejection_reason = if approve { None } else { rejection_reason };

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE verification_applications
        SET status = ?, reviewer_id = ?, rejection_reason = ?, reviewed_at = ?
        WHERE id = ? AND status = 'pending'
        "#,
    )
    .bind(status.as_str())
    .bind(reviewer_id)
    .bind(&rejection_reason)
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let application = get_application(&mut *tx, id).await?;
    if let Some(application) = &application {
        set_verification_status(&mut *tx, application.user_id, user_status).await?;
    }

    tx.commit().await?;
    Ok(application)
}
