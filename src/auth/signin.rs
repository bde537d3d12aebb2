use axum::{
    debug_handler,
    extract::{Query, State},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::info;

use crate::{
    result::{ChatResult, Envelope},
    session,
    storage::{AccountsStorage, User},
    AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct NickQuery {
    nick: String,
}

/// Signs in as `nick`, registering the name on first use.
#[debug_handler(state = AppState)]
pub(crate) async fn signin(
    Query(NickQuery { nick }): Query<NickQuery>,
    State(accounts): State<AccountsStorage>,
    session: Session,
) -> AppResult<Envelope<User>> {
    let user = accounts.get_or_add_user(&nick).await;
    welcome(&session, user).await
}

/// Registers `nick` and signs in; fails if the name is taken.
#[debug_handler(state = AppState)]
pub(crate) async fn signup(
    Query(NickQuery { nick }): Query<NickQuery>,
    State(accounts): State<AccountsStorage>,
    session: Session,
) -> AppResult<Envelope<User>> {
    let user = accounts.sign_up(&nick).await;
    welcome(&session, user).await
}

async fn welcome(session: &Session, user: ChatResult<User>) -> AppResult<Envelope<User>> {
    if let Ok(user) = &user {
        session::remember(session, user).await?;
        info!(user_id = %user.id, name = %user.name, "signed in");
    }
    Envelope::from_result(user)
}
