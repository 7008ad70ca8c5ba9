//! Database operations for conversations and messages

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::messaging::message::preview;
use crate::shared::messaging::{ChatMessage, Conversation, ConversationSummary};
use crate::shared::Role;

/// Length of the last-message preview shown in the inbox
pub const PREVIEW_LEN: usize = 80;

fn conversation_from_row(row: &SqliteRow) -> Result<Conversation, sqlx::Error> {
    Ok(Conversation {
        id: row.try_get("id")?,
        student_id: row.try_get("student_id")?,
        landlord_id: row.try_get("landlord_id")?,
        property_id: row.try_get("property_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn message_from_row(row: &SqliteRow) -> Result<ChatMessage, sqlx::Error> {
    Ok(ChatMessage {
        id: row.try_get("id")?,
        conversation_id: row.try_get("conversation_id")?,
        sender_id: row.try_get("sender_id")?,
        content: row.try_get("content")?,
        is_ai_generated: row.try_get("is_ai_generated")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn get_conversation(pool: &SqlitePool, id: Uuid) -> Result<Option<Conversation>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, student_id, landlord_id, property_id, created_at, updated_at FROM conversations WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(conversation_from_row).transpose()
}

/// The conversation a student already has about a property, if any
pub async fn find_conversation(
    pool: &SqlitePool,
    student_id: Uuid,
    property_id: Uuid,
) -> Result<Option<Conversation>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, student_id, landlord_id, property_id, created_at, updated_at
        FROM conversations
        WHERE student_id = ? AND property_id = ?
        "#,
    )
    .bind(student_id)
    .bind(property_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(conversation_from_row).transpose()
}

/// Create a conversation
///
/// A second conversation for the same (student, property) fails with a
/// unique violation.
pub async fn create_conversation(
    pool: &SqlitePool,
    student_id: Uuid,
    landlord_id: Uuid,
    property_id: Uuid,
) -> Result<Conversation, sqlx::Error> {
    let now = Utc::now();
    let conversation = Conversation {
        id: Uuid::new_v4(),
        student_id,
        landlord_id,
        property_id,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO conversations (id, student_id, landlord_id, property_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(conversation.id)
    .bind(conversation.student_id)
    .bind(conversation.landlord_id)
    .bind(conversation.property_id)
    .bind(conversation.created_at)
    .bind(conversation.updated_at)
    .execute(pool)
    .await?;

    Ok(conversation)
}

/// A user's inbox, most recently active first
pub async fn list_conversations(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<ConversationSummary>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT c.id, c.property_id, c.updated_at,
               p.title AS property_title,
               u.id AS other_user_id, u.username AS other_username, u.role AS other_role,
               (SELECT m.content FROM messages m WHERE m.conversation_id = c.id
                ORDER BY m.created_at DESC, m.rowid DESC LIMIT 1) AS last_message,
               (SELECT m.created_at FROM messages m WHERE m.conversation_id = c.id
                ORDER BY m.created_at DESC, m.rowid DESC LIMIT 1) AS last_message_at
        FROM conversations c
        INNER JOIN properties p ON p.id = c.property_id
        INNER JOIN users u ON u.id = CASE WHEN c.student_id = ? THEN c.landlord_id ELSE c.student_id END
        WHERE c.student_id = ? OR c.landlord_id = ?
        ORDER BY c.updated_at DESC, c.rowid DESC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let other_role: String = row.try_get("other_role")?;
            let last_message: Option<String> = row.try_get("last_message")?;
            let last_message_at: Option<DateTime<Utc>> = row.try_get("last_message_at")?;
            Ok(ConversationSummary {
                id: row.try_get("id")?,
                property_id: row.try_get("property_id")?,
                property_title: row.try_get("property_title")?,
                other_user_id: row.try_get("other_user_id")?,
                other_username: row.try_get("other_username")?,
                other_role: Role::from_str(&other_role).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
                last_message_preview: last_message.map(|content| preview(&content, PREVIEW_LEN)),
                last_message_at,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect()
}

/// Persist a message and bump its conversation's `updated_at`
pub async fn insert_message(pool: &SqlitePool, message: &ChatMessage) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO messages (id, conversation_id, sender_id, content, is_ai_generated, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(message.id)
    .bind(message.conversation_id)
    .bind(message.sender_id)
    .bind(&message.content)
    .bind(message.is_ai_generated)
    .bind(message.created_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE conversations SET updated_at = ? WHERE id = ?")
        .bind(message.created_at)
        .bind(message.conversation_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Messages of a conversation, oldest first
pub async fn list_messages(pool: &SqlitePool, conversation_id: Uuid) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, conversation_id, sender_id, content, is_ai_generated, created_at
        FROM messages
        WHERE conversation_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(message_from_row).collect()
}
