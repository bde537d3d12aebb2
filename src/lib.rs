pub mod auth;
pub mod config;
pub mod db;
pub mod debug;
pub mod groups;
pub mod messages;
pub mod result;
pub mod session;
pub mod storage;

use axum::{
    extract::FromRef,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

use config::Config;
use storage::{AccountsStorage, ChatsStorage, DebugStorage};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub accounts: AccountsStorage,
    pub chats: ChatsStorage,
    pub debug: DebugStorage,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            accounts: AccountsStorage::new(db_pool.clone()),
            chats: ChatsStorage::new(db_pool.clone()),
            debug: DebugStorage::new(db_pool),
        }
    }
}

/// Builds the full HTTP surface: routes, session cookie, CORS and request tracing.
pub fn app(app_state: AppState, config: &Config) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(config.session_idle));

    let cors_layer = CorsLayer::new()
        .allow_origin(config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    Router::new()
        .nest("/auth", auth::router())
        .nest("/groups", groups::router())
        .nest("/messages", messages::router())
        .nest("/debug", debug::router())
        .with_state(app_state)
        .layer(session_layer)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

pub type AppResult<T> = Result<T, AppError>;

/// Infrastructure failure that aborts the request with a 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("{:#}\n\n{}", self.0, self.0.backtrace());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
            .into_response()
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(sqlx::Error);
apperr_impl!(tower_sessions::session::Error);
