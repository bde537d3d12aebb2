use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::{
    result::{ChatError, Envelope},
    storage::User,
    AppError,
};

pub const USER_ID: &str = "user_id";

/// The signed-in caller's user id, taken from the session cookie.
///
/// Rejects with a 401 `Unauthenticated` envelope when nobody is signed in.
pub struct CurrentUser(pub String);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session.get::<String>(USER_ID).await {
            Ok(Some(user_id)) => Ok(CurrentUser(user_id)),
            Ok(None) => Err(Envelope::<()>::failure(&ChatError::Unauthenticated).into_response()),
            Err(err) => Err(AppError::from(err).into_response()),
        }
    }
}

/// Binds the session to `user` under a fresh session id.
pub async fn remember(session: &Session, user: &User) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(USER_ID, &user.id).await
}
