use axum::{
    debug_handler,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{result::Envelope, session::CurrentUser, storage::ChatsStorage, AppResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JoinGroupQuery {
    chat_group_id: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn join_group(
    CurrentUser(user_id): CurrentUser,
    State(chats): State<ChatsStorage>,
    Query(JoinGroupQuery { chat_group_id }): Query<JoinGroupQuery>,
) -> AppResult<Envelope<()>> {
    Envelope::from_result(chats.join_group(&user_id, &chat_group_id).await)
}
