//! Storage facade over the chat database.
//!
//! Each storage wraps the shared [`SqlitePool`] and performs one to three
//! sequential reads/writes per operation. Identifiers are opaque UUIDv7
//! strings; callers hand them in unparsed and get [`ChatError::InvalidIdentifier`]
//! back when they are malformed.

mod accounts;
mod chats;
mod debug;
mod models;

pub use accounts::AccountsStorage;
pub use chats::ChatsStorage;
pub use debug::{DebugStorage, MessageOverview, UserOverview};
pub use models::{ChatGroup, ChatSummary, MessageData, Role, User};

use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::result::{ChatError, Entity};

/// Canonical text form of a caller-supplied id.
pub(crate) fn parse_id(raw: &str, entity: Entity) -> Result<String, ChatError> {
    Uuid::parse_str(raw.trim())
        .map(|id| id.to_string())
        .map_err(|_| ChatError::InvalidIdentifier(entity))
}

pub(crate) fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub(crate) fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

pub(crate) fn from_millis(millis: i64) -> Result<OffsetDateTime, sqlx::Error> {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Inserts the user unless the name is taken. Returns whether a row was written.
pub(crate) async fn insert_user(
    db_pool: &SqlitePool,
    name: &str,
    role: Role,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO users (id,name,role,created_at) VALUES (?,?,?,?) ON CONFLICT(name) DO NOTHING",
    )
    .bind(new_id())
    .bind(name)
    .bind(role)
    .bind(now_millis())
    .execute(db_pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub(crate) async fn user_exists(db_pool: &SqlitePool, user_id: &str) -> Result<bool, sqlx::Error> {
    Ok(sqlx::query("SELECT 1 FROM users WHERE id=?")
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?
        .is_some())
}

pub(crate) async fn group_exists(db_pool: &SqlitePool, group_id: &str) -> Result<bool, sqlx::Error> {
    Ok(sqlx::query("SELECT 1 FROM chat_groups WHERE id=?")
        .bind(group_id)
        .fetch_optional(db_pool)
        .await?
        .is_some())
}

/// Summaries of the groups `member` belongs to, in join order, or of every
/// group when `member` is `None`.
pub(crate) async fn chat_summaries(
    db_pool: &SqlitePool,
    member: Option<&str>,
) -> Result<Vec<ChatSummary>, sqlx::Error> {
    const LAST_MESSAGE: &str = "COALESCE((SELECT m.body FROM messages m WHERE m.group_id = g.id \
         ORDER BY m.created_at DESC, m.rowid DESC LIMIT 1), '') AS last_message";

    match member {
        Some(user_id) => {
            sqlx::query_as(&format!(
                "SELECT g.id, g.name, {LAST_MESSAGE} FROM chat_groups g \
                 JOIN group_members gm ON gm.group_id = g.id \
                 WHERE gm.user_id = ? ORDER BY gm.rowid"
            ))
            .bind(user_id)
            .fetch_all(db_pool)
            .await
        }
        None => {
            sqlx::query_as(&format!(
                "SELECT g.id, g.name, {LAST_MESSAGE} FROM chat_groups g ORDER BY g.rowid"
            ))
            .fetch_all(db_pool)
            .await
        }
    }
}
