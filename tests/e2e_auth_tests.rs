//! End-to-end tests for authentication endpoints
//!
//! Tests registration, login, logout and how sessions gate the
//! protected endpoints.

mod common;

use common::{TestClient, TestServer, OTHER_PASS, OTHER_USER, TEST_PASS, TEST_USER};
use reqwest::StatusCode;

#[tokio::test]
async fn test_register_creates_an_account() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.register("newpoet", "versecraft").await;
    assert_eq!(response.status(), StatusCode::OK);

    // The new account can log in right away
    let response = client.login("newpoet", "versecraft").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_with_taken_username() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.register(TEST_USER, "whatever").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_with_empty_fields() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.register("", "somepass").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client.register("someuser", "   ").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], TEST_USER);
    assert!(body["userId"].is_string());
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_login_with_invalid_password() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, "wrong_password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_nonexistent_user() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login("nonexistent_user", "password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = TestServer::spawn().await;
    let client = TestClient::authenticated(server.base_url.clone()).await;

    // Verify we can access a protected endpoint
    let response = client.create_poem("Before Logout", "still logged in").await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logout
    let response = client.logout().await;
    assert_eq!(response.status(), StatusCode::OK);

    // Verify we can no longer access protected endpoints
    let response = client.create_poem("After Logout", "should fail").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_requires_authentication() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.logout().await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalidated_token_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    let response = client.logout().await;
    assert_eq!(response.status(), StatusCode::OK);

    // The old token no longer works, even as a bare Authorization header
    let bare = reqwest::Client::new();
    let response = bare
        .post(format!("{}/api/poems", server.base_url))
        .header("Authorization", &token)
        .json(&serde_json::json!({ "title": "Stale", "content": "token" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_works_as_authorization_header() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.login(TEST_USER, TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    // A cookie-less client can authenticate with the token header
    let bare = reqwest::Client::new();
    let response = bare
        .post(format!("{}/api/poems", server.base_url))
        .header("Authorization", &token)
        .json(&serde_json::json!({ "title": "Header Auth", "content": "works" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_sessions_are_independent_per_user() {
    let server = TestServer::spawn().await;

    let first = TestClient::authenticated(server.base_url.clone()).await;
    let second = TestClient::new(server.base_url.clone());
    let response = second.login(OTHER_USER, OTHER_PASS).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logging out the second user does not touch the first session
    let response = second.logout().await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = first.create_poem("Still Here", "first session survives").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_stats_endpoint_reports_the_session() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    // Anonymous: no session token in the stats
    let response = client.stats().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["sessionToken"].is_null());
    assert!(body["uptime"].is_string());

    // Logged in: the stats echo the session token
    let response = client.login(TEST_USER, TEST_PASS).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.stats().await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["sessionToken"].is_string());
}
