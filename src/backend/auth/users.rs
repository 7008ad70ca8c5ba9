/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::shared::user::{PublicProfile, UpdateProfileRequest, UserProfile};
use crate::shared::{Role, VerificationStatus};

const USER_COLUMNS: &str = "id, username, email, password_hash, role, verification_status, \
     full_name, phone, bio, avatar_url, university, created_at, updated_at";

/// User struct representing a user in the database
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub university: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Account view for its owner
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            verification_status: self.verification_status,
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            bio: self.bio.clone(),
            avatar_url: self.avatar_url.clone(),
            university: self.university.clone(),
            created_at: self.created_at,
        }
    }

    /// Account view for other users
    pub fn public_profile(&self) -> PublicProfile {
        self.profile().into()
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Fields needed to create an account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub full_name: Option<String>,
}

/// Map a `users` row
pub fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    let role: String = row.try_get("role")?;
    let verification_status: String = row.try_get("verification_status")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: Role::from_str(&role).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        verification_status: VerificationStatus::from_str(&verification_status)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        full_name: row.try_get("full_name")?,
        phone: row.try_get("phone")?,
        bio: row.try_get("bio")?,
        avatar_url: row.try_get("avatar_url")?,
        university: row.try_get("university")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Create a new user
///
/// Unique violations on username or email are returned as database errors;
/// callers map them to 409.
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, role, verification_status, full_name, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .bind(VerificationStatus::None.as_str())
    .bind(&new_user.full_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_user_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get user by email
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users WHERE email = ? COLLATE NOCASE", USER_COLUMNS);
    let row = sqlx::query(&query).bind(email).fetch_optional(pool).await?;
    row.as_ref().map(user_from_row).transpose()
}

/// Get user by username
pub async fn get_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS);
    let row = sqlx::query(&query).bind(username).fetch_optional(pool).await?;
    row.as_ref().map(user_from_row).transpose()
}

/// Get user by ID
pub async fn get_user_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
    let row = sqlx::query(&query).bind(id).fetch_optional(executor).await?;
    row.as_ref().map(user_from_row).transpose()
}

/// List all users, newest first
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users ORDER BY created_at DESC", USER_COLUMNS);
    let rows = sqlx::query(&query).fetch_all(pool).await?;
    rows.iter().map(user_from_row).collect()
}

/// Update the profile fields present in the request
///
/// # Returns
/// Updated user, or None if the user does not exist
pub async fn update_profile(
    pool: &SqlitePool,
    user_id: Uuid,
    update: &UpdateProfileRequest,
) -> Result<Option<User>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET full_name = COALESCE(?, full_name),
            phone = COALESCE(?, phone),
            bio = COALESCE(?, bio),
            avatar_url = COALESCE(?, avatar_url),
            university = COALESCE(?, university),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(&update.bio)
    .bind(&update.avatar_url)
    .bind(&update.university)
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    get_user_by_id(pool, user_id).await
}

pub async fn update_password(pool: &SqlitePool, user_id: Uuid, password_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Set a user's verification state
pub async fn set_verification_status<'e, E>(
    executor: E,
    user_id: Uuid,
    status: VerificationStatus,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE users SET verification_status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Delete a user
///
/// Foreign keys cascade to everything the account owns: properties and,
/// through them, favorites, conversations, messages, views and reviews.
///
/// # Returns
/// True if a row was deleted
pub async fn delete_user(pool: &SqlitePool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
