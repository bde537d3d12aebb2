use axum::{
    debug_handler,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{result::Envelope, session::CurrentUser, storage::ChatsStorage, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateGroupQuery {
    name: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_group(
    CurrentUser(user_id): CurrentUser,
    State(chats): State<ChatsStorage>,
    Query(CreateGroupQuery { name }): Query<CreateGroupQuery>,
) -> AppResult<Envelope<String>> {
    Envelope::from_result(chats.create_group(&name, &user_id).await)
}
