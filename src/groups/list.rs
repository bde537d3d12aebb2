use axum::{
    debug_handler,
    extract::{Path, State},
};

use crate::{
    result::Envelope,
    session::CurrentUser,
    storage::{AccountsStorage, ChatGroup, ChatSummary, ChatsStorage},
    AppResult, AppState,
};

/// Groups the caller has joined, each with its newest message.
#[debug_handler(state = AppState)]
pub(crate) async fn my_groups(
    CurrentUser(user_id): CurrentUser,
    State(accounts): State<AccountsStorage>,
) -> AppResult<Envelope<Vec<ChatSummary>>> {
    Envelope::from_result(accounts.get_user_chats(&user_id).await)
}

#[debug_handler(state = AppState)]
pub(crate) async fn group(
    CurrentUser(_): CurrentUser,
    State(chats): State<ChatsStorage>,
    Path(chat_group_id): Path<String>,
) -> AppResult<Envelope<ChatGroup>> {
    Envelope::from_result(chats.get_group(&chat_group_id).await)
}
