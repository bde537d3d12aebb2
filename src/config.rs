use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://chat.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5271";
pub const DEFAULT_SESSION_IDLE_MINUTES: i64 = 60;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub session_idle: time::Duration,
    pub cors_origin: HeaderValue,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5271)),
            session_idle: time::Duration::minutes(DEFAULT_SESSION_IDLE_MINUTES),
            cors_origin: HeaderValue::from_static(DEFAULT_CORS_ORIGIN),
        }
    }
}

impl Config {
    /// Reads the environment, with `.env` loaded into it first so `RUST_LOG`
    /// from the file reaches the tracing filter too.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let bind_addr = var("BIND_ADDR", DEFAULT_BIND_ADDR);
        let session_idle = match lookup("SESSION_IDLE_MINUTES") {
            Some(minutes) => minutes
                .parse()
                .with_context(|| format!("SESSION_IDLE_MINUTES={minutes} is not a number"))?,
            None => DEFAULT_SESSION_IDLE_MINUTES,
        };
        let cors_origin = var("CORS_ORIGIN", DEFAULT_CORS_ORIGIN);

        Ok(Config {
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr: bind_addr
                .parse()
                .with_context(|| format!("BIND_ADDR={bind_addr} is not a socket address"))?,
            session_idle: time::Duration::minutes(session_idle),
            cors_origin: HeaderValue::from_str(&cors_origin)
                .with_context(|| format!("CORS_ORIGIN={cors_origin} is not a header value"))?,
        })
    }
}
