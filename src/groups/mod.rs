mod create;
mod join;
mod list;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::my_groups))
        .route("/create", post(create::create_group))
        .route("/join", post(join::join_group))
        .route("/{chat_group_id}", get(list::group))
}
