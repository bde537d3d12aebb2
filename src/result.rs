//! The success/failure envelope every endpoint answers with, and the error
//! taxonomy behind its failure codes.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::AppResult;

/// Which kind of identifier failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Group,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Entity::User => write!(f, "User"),
            Entity::Group => write!(f, "Chat"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0} Id not valid")]
    InvalidIdentifier(Entity),

    #[error("User not found")]
    UserNotFound,

    #[error("Group not found")]
    GroupNotFound,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("User not signed in")]
    Unauthenticated,

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl ChatError {
    /// Wire code reported in the envelope. Zero is reserved for success.
    pub fn code(&self) -> i32 {
        use ChatError::*;
        match self {
            InvalidIdentifier(Entity::User) => 22,
            UserNotFound => 23,
            InvalidIdentifier(Entity::Group) => 43,
            GroupNotFound => 44,
            Unauthenticated => 401,
            AlreadyRegistered => 403,
            Store(_) => 500,
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub code: i32,
    pub message: Option<String>,
    pub is_failure: bool,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: None,
            is_failure: false,
            data: Some(data),
        }
    }

    pub fn failure(err: &ChatError) -> Self {
        let code = err.code();
        Self {
            code,
            message: Some(err.to_string()),
            is_failure: code > 0,
            data: None,
        }
    }

    /// Domain failures become envelopes; store faults escape as [`crate::AppError`].
    pub fn from_result(result: ChatResult<T>) -> AppResult<Self> {
        match result {
            Ok(data) => Ok(Self::success(data)),
            Err(ChatError::Store(err)) => Err(err.into()),
            Err(err) => Ok(Self::failure(&err)),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = if self.code == ChatError::Unauthenticated.code() {
            StatusCode::UNAUTHORIZED
        } else {
            StatusCode::OK
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_shape() {
        let envelope = Envelope::success(vec!["hello"]);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "code": 0, "message": null, "isFailure": false, "data": ["hello"] })
        );
    }

    #[test]
    fn failure_envelope_shape() {
        let envelope = Envelope::<()>::failure(&ChatError::GroupNotFound);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "code": 44, "message": "Group not found", "isFailure": true, "data": null })
        );
    }

    #[test]
    fn invalid_identifier_names_the_entity() {
        let user = ChatError::InvalidIdentifier(Entity::User);
        let group = ChatError::InvalidIdentifier(Entity::Group);
        assert_eq!(user.to_string(), "User Id not valid");
        assert_eq!(group.to_string(), "Chat Id not valid");
        assert_eq!((user.code(), group.code()), (22, 43));
    }

    #[test]
    fn store_errors_are_not_enveloped() {
        let result: ChatResult<()> = Err(ChatError::Store(sqlx::Error::RowNotFound));
        assert!(Envelope::from_result(result).is_err());
    }

    #[test]
    fn unauthenticated_answers_401() {
        let response = Envelope::<()>::failure(&ChatError::Unauthenticated).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = Envelope::<()>::failure(&ChatError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
