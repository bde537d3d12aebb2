mod signin;
mod signout;
mod whoami;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signin", post(signin::signin))
        .route("/signup", post(signin::signup))
        .route("/signout", post(signout::signout))
        .route("/who-am-i", get(whoami::who_am_i))
        .route("/signed-in", get(whoami::signed_in))
}
