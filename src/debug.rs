//! Store maintenance endpoints for local development.

use axum::{debug_handler, extract::State, routing::get, Router};

use crate::{
    result::Envelope,
    storage::{ChatSummary, DebugStorage, MessageOverview, UserOverview},
    AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/seed", get(seed))
        .route("/clear", get(clear))
        .route("/reinitialize", get(reinitialize))
        .route("/users", get(users))
        .route("/groups", get(groups))
        .route("/messages", get(messages))
}

#[debug_handler(state = AppState)]
async fn seed(State(debug): State<DebugStorage>) -> AppResult<Envelope<bool>> {
    Envelope::from_result(debug.seed().await)
}

#[debug_handler(state = AppState)]
async fn clear(State(debug): State<DebugStorage>) -> AppResult<Envelope<()>> {
    Envelope::from_result(debug.clear().await)
}

#[debug_handler(state = AppState)]
async fn reinitialize(State(debug): State<DebugStorage>) -> AppResult<Envelope<()>> {
    Envelope::from_result(debug.reinitialize().await)
}

#[debug_handler(state = AppState)]
async fn users(State(debug): State<DebugStorage>) -> AppResult<Envelope<Vec<UserOverview>>> {
    Envelope::from_result(debug.users().await)
}

#[debug_handler(state = AppState)]
async fn groups(State(debug): State<DebugStorage>) -> AppResult<Envelope<Vec<ChatSummary>>> {
    Envelope::from_result(debug.groups().await)
}

#[debug_handler(state = AppState)]
async fn messages(State(debug): State<DebugStorage>) -> AppResult<Envelope<Vec<MessageOverview>>> {
    Envelope::from_result(debug.messages().await)
}
