mod common;

use axum::http::StatusCode;
use common::TestClient;

#[tokio::test]
async fn signin_starts_a_session() {
    let mut client = TestClient::new().await;

    let (status, _) = client.get("/auth/signed-in").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user_id = client.sign_in("alice").await;

    let (status, body) = client.get("/auth/signed-in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], user_id.as_str());

    let (status, body) = client.get("/auth/who-am-i").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["isFailure"], false);
    assert_eq!(body["data"]["name"], "alice");
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
async fn signin_twice_is_the_same_user() {
    let mut client = TestClient::new().await;
    let first = client.sign_in("alice").await;

    let mut other = client.another();
    let second = other.sign_in("alice").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn signup_refuses_taken_names() {
    let mut client = TestClient::new().await;
    client.sign_in("alice").await;

    let mut other = client.another();
    let (status, body) = other.post("/auth/signup?nick=alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 403);
    assert_eq!(body["isFailure"], true);
    assert_eq!(body["message"], "User already registered");

    let (status, _) = other.get("/auth/signed-in").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = other.post("/auth/signup?nick=bob").await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["name"], "bob");
}

#[tokio::test]
async fn signout_ends_the_session() {
    let mut client = TestClient::new().await;
    client.sign_in("alice").await;

    let (status, _) = client.post("/auth/signout").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = client.get("/auth/who-am-i").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
}

#[tokio::test]
async fn debug_reinitialize_seeds_admin() {
    let mut client = TestClient::new().await;
    client.sign_in("alice").await;

    let (status, _) = client.get("/debug/reinitialize").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = client.get("/debug/users").await;
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["name"], "Admin");
    assert_eq!(users[0]["role"], "admin");

    // alice's session outlived her record
    let (_, body) = client.get("/auth/who-am-i").await;
    assert_eq!(body["code"], 23);
}
