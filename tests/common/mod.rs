//! Drives the router in-process, carrying the session cookie between requests
//! the way a browser would.

use axum::{
    body::Body,
    http::{
        header::{COOKIE, SET_COOKIE},
        Method, Request, StatusCode,
    },
    Router,
};
use chatapi::{app, config::Config, db, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub async fn new() -> Self {
        let db_pool = db::memory().await.expect("in-memory database");
        Self {
            router: app(AppState::new(db_pool), &Config::default()),
            cookie: None,
        }
    }

    /// Another browser against the same server, without a session.
    pub fn another(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri).await
    }

    pub async fn post(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::POST, uri).await
    }

    /// Signs in and returns the user id.
    pub async fn sign_in(&mut self, nick: &str) -> String {
        let (status, body) = self.post(&format!("/auth/signin?nick={nick}")).await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["id"].as_str().expect("user id").to_owned()
    }

    async fn send(&mut self, method: Method, uri: &str) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let cookie = set_cookie.to_str().unwrap();
            self.cookie = cookie.split(';').next().map(str::to_owned);
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }
}
