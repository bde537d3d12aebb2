use sqlx::SqlitePool;
use tracing::info;

use crate::result::{ChatError, ChatResult, Entity};

use super::{chat_summaries, insert_user, parse_id, user_exists, ChatSummary, Role, User};

/// Users and the groups they belong to.
#[derive(Clone)]
pub struct AccountsStorage {
    db_pool: SqlitePool,
}

impl AccountsStorage {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Fetches the user called `name`, registering them first if needed.
    ///
    /// The insert is conditional on the unique name index, so two concurrent
    /// calls with the same new name still produce a single record.
    pub async fn get_or_add_user(&self, name: &str) -> ChatResult<User> {
        if insert_user(&self.db_pool, name, Role::User).await? {
            info!(name, "registered user");
        }

        self.find_by_name(name).await?.ok_or(ChatError::UserNotFound)
    }

    /// Registers a new user, refusing names that are already taken.
    pub async fn sign_up(&self, name: &str) -> ChatResult<User> {
        if !insert_user(&self.db_pool, name, Role::User).await? {
            return Err(ChatError::AlreadyRegistered);
        }
        info!(name, "registered user");

        self.find_by_name(name).await?.ok_or(ChatError::UserNotFound)
    }

    pub async fn get_user(&self, user_id: &str) -> ChatResult<User> {
        let user_id = parse_id(user_id, Entity::User)?;

        sqlx::query_as("SELECT id,name,role FROM users WHERE id=?")
            .bind(&user_id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(ChatError::UserNotFound)
    }

    /// Every group the user is a member of, with its newest message.
    pub async fn get_user_chats(&self, user_id: &str) -> ChatResult<Vec<ChatSummary>> {
        let user_id = parse_id(user_id, Entity::User)?;
        if !user_exists(&self.db_pool, &user_id).await? {
            return Err(ChatError::UserNotFound);
        }

        Ok(chat_summaries(&self.db_pool, Some(&user_id)).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as("SELECT id,name,role FROM users WHERE name=?")
            .bind(name)
            .fetch_optional(&self.db_pool)
            .await
    }
}
