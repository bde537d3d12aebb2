use axum::{debug_handler, extract::State};

use crate::{
    result::Envelope,
    session::CurrentUser,
    storage::{AccountsStorage, User},
    AppResult, AppState,
};

#[debug_handler(state = AppState)]
pub(crate) async fn who_am_i(
    CurrentUser(user_id): CurrentUser,
    State(accounts): State<AccountsStorage>,
) -> AppResult<Envelope<User>> {
    Envelope::from_result(accounts.get_user(&user_id).await)
}

/// 200 with the caller's id, or 401 from the extractor.
#[debug_handler]
pub(crate) async fn signed_in(CurrentUser(user_id): CurrentUser) -> Envelope<String> {
    Envelope::success(user_id)
}
