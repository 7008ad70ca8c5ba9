//! Aggregate queries behind the dashboards

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::backend::listings::db::recently_viewed;
use crate::backend::notifications::db::unread_count;
use crate::shared::dashboard::{AdminDashboard, LandlordDashboard, PropertyStats, StudentDashboard};

/// Distinct listings shown under "recently viewed"
pub const RECENTLY_VIEWED_LIMIT: i64 = 5;

async fn count_for_user(pool: &SqlitePool, sql: &str, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(sql).bind(user_id).fetch_one(pool).await
}

async fn conversations_count(pool: &SqlitePool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM conversations WHERE student_id = ? OR landlord_id = ?")
        .bind(user_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn student_dashboard(pool: &SqlitePool, user_id: Uuid) -> Result<StudentDashboard, sqlx::Error> {
    Ok(StudentDashboard {
        favorites_count: count_for_user(pool, "SELECT COUNT(*) FROM favorites WHERE user_id = ?", user_id).await?,
        conversations_count: conversations_count(pool, user_id).await?,
        reviews_count: count_for_user(pool, "SELECT COUNT(*) FROM reviews WHERE user_id = ?", user_id).await?,
        unread_notifications: unread_count(pool, user_id).await?,
        recently_viewed: recently_viewed(pool, user_id, RECENTLY_VIEWED_LIMIT).await?,
    })
}

pub async fn landlord_dashboard(pool: &SqlitePool, user_id: Uuid) -> Result<LandlordDashboard, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT p.id, p.title,
               (SELECT COUNT(*) FROM property_views v WHERE v.property_id = p.id) AS views,
               (SELECT COUNT(*) FROM favorites f WHERE f.property_id = p.id) AS favorites,
               (SELECT COUNT(*) FROM reviews r WHERE r.property_id = p.id) AS reviews,
               (SELECT AVG(r.rating) FROM reviews r WHERE r.property_id = p.id) AS average_rating
        FROM properties p
        WHERE p.landlord_id = ?
        ORDER BY p.created_at DESC, p.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let properties = rows
        .iter()
        .map(|row| {
            Ok(PropertyStats {
                property_id: row.try_get("id")?,
                title: row.try_get("title")?,
                views: row.try_get("views")?,
                favorites: row.try_get("favorites")?,
                reviews: row.try_get("reviews")?,
                average_rating: row.try_get("average_rating")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    let average_rating: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT AVG(r.rating)
        FROM reviews r
        INNER JOIN properties p ON p.id = r.property_id
        WHERE p.landlord_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(LandlordDashboard {
        properties_count: properties.len() as i64,
        total_views: properties.iter().map(|p| p.views).sum(),
        total_favorites: properties.iter().map(|p| p.favorites).sum(),
        conversations_count: conversations_count(pool, user_id).await?,
        unread_notifications: unread_count(pool, user_id).await?,
        average_rating,
        properties,
    })
}

pub async fn admin_dashboard(pool: &SqlitePool) -> Result<AdminDashboard, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS total_users,
               COALESCE(SUM(CASE WHEN role = 'student' THEN 1 ELSE 0 END), 0) AS students,
               COALESCE(SUM(CASE WHEN role = 'landlord' THEN 1 ELSE 0 END), 0) AS landlords
        FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    let total_properties: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties").fetch_one(pool).await?;
    let pending_verifications: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM verification_applications WHERE status = 'pending'")
            .fetch_one(pool)
            .await?;

    Ok(AdminDashboard {
        total_users: row.try_get("total_users")?,
        students: row.try_get("students")?,
        landlords: row.try_get("landlords")?,
        total_properties,
        pending_verifications,
    })
}
