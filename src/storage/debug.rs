use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::result::ChatResult;

use super::{chat_summaries, insert_user, ChatSummary, Role, User};

pub const ADMIN_NAME: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOverview {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub chats: Vec<ChatSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageOverview {
    pub user_name: String,
    pub message: String,
    pub chat_group: String,
}

/// Seeding, wiping and dumping the whole store. Not meant for production.
#[derive(Clone)]
pub struct DebugStorage {
    db_pool: SqlitePool,
}

impl DebugStorage {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Adds the admin account when there are no users yet. Returns whether it did.
    pub async fn seed(&self) -> ChatResult<bool> {
        let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db_pool)
            .await?;
        if users > 0 {
            return Ok(false);
        }

        let seeded = insert_user(&self.db_pool, ADMIN_NAME, Role::Admin).await?;
        if seeded {
            info!("seeded {ADMIN_NAME} account");
        }
        Ok(seeded)
    }

    pub async fn clear(&self) -> ChatResult<()> {
        let mut tx = self.db_pool.begin().await?;
        for table in ["messages", "group_members", "chat_groups", "users"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!("cleared store");
        Ok(())
    }

    pub async fn reinitialize(&self) -> ChatResult<()> {
        self.clear().await?;
        self.seed().await?;
        Ok(())
    }

    pub async fn users(&self) -> ChatResult<Vec<UserOverview>> {
        let users: Vec<User> = sqlx::query_as("SELECT id,name,role FROM users ORDER BY rowid")
            .fetch_all(&self.db_pool)
            .await?;

        let mut overviews = Vec::with_capacity(users.len());
        for User { id, name, role } in users {
            let chats = chat_summaries(&self.db_pool, Some(&id)).await?;
            overviews.push(UserOverview {
                id,
                name,
                role,
                chats,
            });
        }
        Ok(overviews)
    }

    pub async fn groups(&self) -> ChatResult<Vec<ChatSummary>> {
        Ok(chat_summaries(&self.db_pool, None).await?)
    }

    pub async fn messages(&self) -> ChatResult<Vec<MessageOverview>> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT COALESCE(u.name, ''), m.body, COALESCE(g.name, '') FROM messages m \
             LEFT JOIN users u ON u.id = m.user_id \
             LEFT JOIN chat_groups g ON g.id = m.group_id \
             ORDER BY m.rowid",
        )
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_name, message, chat_group)| MessageOverview {
                user_name,
                message,
                chat_group,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        db,
        storage::{AccountsStorage, ChatsStorage},
    };

    use super::*;

    struct Store {
        accounts: AccountsStorage,
        chats: ChatsStorage,
        debug: DebugStorage,
    }

    async fn store() -> Store {
        let db_pool = db::memory().await.unwrap();
        Store {
            accounts: AccountsStorage::new(db_pool.clone()),
            chats: ChatsStorage::new(db_pool.clone()),
            debug: DebugStorage::new(db_pool),
        }
    }

    #[tokio::test]
    async fn seed_only_into_an_empty_store() {
        let store = store().await;

        assert!(store.debug.seed().await.unwrap());
        assert!(!store.debug.seed().await.unwrap());

        let users = store.debug.users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, ADMIN_NAME);
        assert_eq!(users[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn seed_skips_populated_store() {
        let store = store().await;
        store.accounts.get_or_add_user("alice").await.unwrap();

        assert!(!store.debug.seed().await.unwrap());
    }

    #[tokio::test]
    async fn reinitialize_leaves_only_admin() {
        let store = store().await;
        let alice = store.accounts.get_or_add_user("alice").await.unwrap();
        let id = store.chats.create_group("general", &alice.id).await.unwrap();
        store.chats.add_message(&alice.id, &id, "hello").await.unwrap();

        store.debug.reinitialize().await.unwrap();

        let users = store.debug.users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, ADMIN_NAME);
        assert!(users[0].chats.is_empty());
        assert!(store.debug.groups().await.unwrap().is_empty());
        assert!(store.debug.messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dumps_resolve_names() {
        let store = store().await;
        let alice = store.accounts.get_or_add_user("alice").await.unwrap();
        let id = store.chats.create_group("general", &alice.id).await.unwrap();
        store.chats.add_message(&alice.id, &id, "hello").await.unwrap();

        assert_eq!(
            store.debug.messages().await.unwrap(),
            vec![MessageOverview {
                user_name: "alice".to_owned(),
                message: "hello".to_owned(),
                chat_group: "general".to_owned(),
            }]
        );

        let users = store.debug.users().await.unwrap();
        assert_eq!(users[0].chats[0].last_message, "hello");
        assert_eq!(store.debug.groups().await.unwrap()[0].id, id);
    }
}
