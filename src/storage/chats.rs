use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::result::{ChatError, ChatResult, Entity};

use super::{
    from_millis, group_exists, new_id, now_millis, parse_id, user_exists, ChatGroup, MessageData,
};

/// Chat groups, their membership and their message logs.
#[derive(Clone)]
pub struct ChatsStorage {
    db_pool: SqlitePool,
}

impl ChatsStorage {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Creates a group whose only member is its creator. Returns the group id.
    pub async fn create_group(&self, name: &str, creator_id: &str) -> ChatResult<String> {
        let creator_id = parse_id(creator_id, Entity::User)?;
        if !user_exists(&self.db_pool, &creator_id).await? {
            return Err(ChatError::UserNotFound);
        }

        let id = new_id();
        let mut tx = self.db_pool.begin().await?;
        sqlx::query("INSERT INTO chat_groups (id,name,created_at) VALUES (?,?,?)")
            .bind(&id)
            .bind(name)
            .bind(now_millis())
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO group_members (group_id,user_id) VALUES (?,?)")
            .bind(&id)
            .bind(&creator_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(group_id = %id, name, creator_id = %creator_id, "created group");
        Ok(id)
    }

    /// Adds the user to the group. Joining a group twice is a no-op.
    pub async fn join_group(&self, user_id: &str, group_id: &str) -> ChatResult<()> {
        let user_id = parse_id(user_id, Entity::User)?;
        let group_id = parse_id(group_id, Entity::Group)?;

        if !user_exists(&self.db_pool, &user_id).await? {
            return Err(ChatError::UserNotFound);
        }
        if !group_exists(&self.db_pool, &group_id).await? {
            return Err(ChatError::GroupNotFound);
        }

        let result = sqlx::query(
            "INSERT INTO group_members (group_id,user_id) VALUES (?,?) \
             ON CONFLICT(group_id,user_id) DO NOTHING",
        )
        .bind(&group_id)
        .bind(&user_id)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 1 {
            info!(group_id = %group_id, user_id = %user_id, "joined group");
        }
        Ok(())
    }

    pub async fn get_group(&self, group_id: &str) -> ChatResult<ChatGroup> {
        let group_id = parse_id(group_id, Entity::Group)?;

        let Some((name, created_at)): Option<(String, i64)> =
            sqlx::query_as("SELECT name,created_at FROM chat_groups WHERE id=?")
                .bind(&group_id)
                .fetch_optional(&self.db_pool)
                .await?
        else {
            return Err(ChatError::GroupNotFound);
        };

        let members: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM group_members WHERE group_id=? ORDER BY rowid")
                .bind(&group_id)
                .fetch_all(&self.db_pool)
                .await?;

        Ok(ChatGroup {
            id: group_id,
            name,
            created: from_millis(created_at)?,
            members: members.into_iter().map(|(user_id,)| user_id).collect(),
        })
    }

    /// Appends a message to the group's log. Returns the message id.
    pub async fn add_message(&self, user_id: &str, group_id: &str, body: &str) -> ChatResult<String> {
        let user_id = parse_id(user_id, Entity::User)?;
        let group_id = parse_id(group_id, Entity::Group)?;

        if !user_exists(&self.db_pool, &user_id).await? {
            return Err(ChatError::UserNotFound);
        }
        if !group_exists(&self.db_pool, &group_id).await? {
            return Err(ChatError::GroupNotFound);
        }

        let id = new_id();
        sqlx::query("INSERT INTO messages (id,group_id,user_id,body,created_at) VALUES (?,?,?,?,?)")
            .bind(&id)
            .bind(&group_id)
            .bind(&user_id)
            .bind(body)
            .bind(now_millis())
            .execute(&self.db_pool)
            .await?;

        debug!(message_id = %id, group_id = %group_id, user_id = %user_id, "added message");
        Ok(id)
    }

    /// The group's messages in the order they were added, with author names.
    pub async fn list_messages(&self, group_id: &str) -> ChatResult<Vec<MessageData>> {
        let group_id = parse_id(group_id, Entity::Group)?;
        if !group_exists(&self.db_pool, &group_id).await? {
            return Err(ChatError::GroupNotFound);
        }

        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT user_id,body FROM messages WHERE group_id=? ORDER BY rowid")
                .bind(&group_id)
                .fetch_all(&self.db_pool)
                .await?;

        let mut names: HashMap<String, String> = HashMap::new();
        let mut messages = Vec::with_capacity(rows.len());
        for (user_id, body) in rows {
            let user_name = match names.get(&user_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.user_name(&user_id).await?;
                    names.insert(user_id, name.clone());
                    name
                }
            };

            messages.push(MessageData {
                user_name,
                message: body,
            });
        }

        Ok(messages)
    }

    async fn user_name(&self, user_id: &str) -> Result<String, sqlx::Error> {
        let name: Option<(String,)> = sqlx::query_as("SELECT name FROM users WHERE id=?")
            .bind(user_id)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(name.map(|(name,)| name).unwrap_or_default())
    }
}
