//! Database operations for reviews

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::listing::RatingSummary;
use crate::shared::review::{CreateReviewRequest, Review};

fn review_from_row(row: &SqliteRow) -> Result<Review, sqlx::Error> {
    Ok(Review {
        id: row.try_get("id")?,
        property_id: row.try_get("property_id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Average rating and review count of a property
pub async fn rating_summary(pool: &SqlitePool, property_id: Uuid) -> Result<RatingSummary, sqlx::Error> {
    let row = sqlx::query("SELECT AVG(rating) AS average, COUNT(*) AS count FROM reviews WHERE property_id = ?")
        .bind(property_id)
        .fetch_one(pool)
        .await?;

    Ok(RatingSummary {
        average: row.try_get("average")?,
        count: row.try_get("count")?,
    })
}

/// Insert a review
///
/// A second review by the same user for the same property fails with a
/// unique violation.
pub async fn insert_review(
    pool: &SqlitePool,
    property_id: Uuid,
    user_id: Uuid,
    username: &str,
    request: CreateReviewRequest,
) -> Result<Review, sqlx::Error> {
    let review = Review {
        id: Uuid::new_v4(),
        property_id,
        user_id,
        username: username.to_string(),
        rating: request.rating,
        comment: request.comment.trim().to_string(),
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO reviews (id, property_id, user_id, rating, comment, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(review.id)
    .bind(review.property_id)
    .bind(review.user_id)
    .bind(review.rating)
    .bind(&review.comment)
    .bind(review.created_at)
    .execute(pool)
    .await?;

    Ok(review)
}

pub async fn get_review(pool: &SqlitePool, id: Uuid) -> Result<Option<Review>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT r.id, r.property_id, r.user_id, u.username, r.rating, r.comment, r.created_at
        FROM reviews r
        INNER JOIN users u ON u.id = r.user_id
        WHERE r.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(review_from_row).transpose()
}

/// Reviews of a property with author usernames, newest first
pub async fn list_reviews(pool: &SqlitePool, property_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.property_id, r.user_id, u.username, r.rating, r.comment, r.created_at
        FROM reviews r
        INNER JOIN users u ON u.id = r.user_id
        WHERE r.property_id = ?
        ORDER BY r.created_at DESC, r.rowid DESC
        "#,
    )
    .bind(property_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(review_from_row).collect()
}

pub async fn delete_review(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
