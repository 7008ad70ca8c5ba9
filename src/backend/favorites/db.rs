//! Database operations for favorites

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::backend::listings::db::property_from_row;
use crate::shared::favorite::{Favorite, FavoriteEntry};

/// Insert a favorite
///
/// A second favorite for the same (user, property) fails with a unique
/// violation.
pub async fn add_favorite(pool: &SqlitePool, user_id: Uuid, property_id: Uuid) -> Result<Favorite, sqlx::Error> {
    let favorite = Favorite {
        id: Uuid::new_v4(),
        user_id,
        property_id,
        created_at: Utc::now(),
    };

    sqlx::query("INSERT INTO favorites (id, user_id, property_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(favorite.id)
        .bind(favorite.user_id)
        .bind(favorite.property_id)
        .bind(favorite.created_at)
        .execute(pool)
        .await?;

    Ok(favorite)
}

/// Remove a favorite
///
/// # Returns
/// True if the favorite existed
pub async fn remove_favorite(pool: &SqlitePool, user_id: Uuid, property_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND property_id = ?")
        .bind(user_id)
        .bind(property_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn is_favorited(pool: &SqlitePool, user_id: Uuid, property_id: Uuid) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = ? AND property_id = ?")
        .bind(user_id)
        .bind(property_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// A user's favorites with the listings they point at, newest first
pub async fn list_favorites(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<FavoriteEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT f.id AS favorite_id, f.created_at AS favorited_at,
               p.id, p.landlord_id, p.title, p.description, p.price, p.address, p.city,
               p.property_type, p.bedrooms, p.bathrooms, p.area_sqm, p.furnished, p.available_from,
               p.images, p.amenities, p.latitude, p.longitude, p.created_at, p.updated_at
        FROM favorites f
        INNER JOIN properties p ON p.id = f.property_id
        WHERE f.user_id = ?
        ORDER BY f.created_at DESC, f.rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(FavoriteEntry {
                id: row.try_get("favorite_id")?,
                property: property_from_row(row)?.summary(),
                created_at: row.try_get("favorited_at")?,
            })
        })
        .collect()
}
