use axum::{
    debug_handler,
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    result::Envelope,
    session::CurrentUser,
    storage::{ChatsStorage, MessageData},
    AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages))
        .route("/add", post(add_message))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessagesQuery {
    chat_group_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddMessageQuery {
    chat_group_id: String,
    message: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn add_message(
    CurrentUser(user_id): CurrentUser,
    State(chats): State<ChatsStorage>,
    Query(AddMessageQuery { chat_group_id, message }): Query<AddMessageQuery>,
) -> AppResult<Envelope<String>> {
    Envelope::from_result(chats.add_message(&user_id, &chat_group_id, &message).await)
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_messages(
    CurrentUser(_): CurrentUser,
    State(chats): State<ChatsStorage>,
    Query(MessagesQuery { chat_group_id }): Query<MessagesQuery>,
) -> AppResult<Envelope<Vec<MessageData>>> {
    Envelope::from_result(chats.list_messages(&chat_group_id).await)
}
