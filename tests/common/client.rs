//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all forum endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new unauthenticated client
    ///
    /// Use this for testing authentication flows.
    /// For most tests, use `authenticated()` instead.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client pre-authenticated as the seeded test user
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let client = Self::new(base_url);

        let response = client.login(TEST_USER, TEST_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Test user authentication failed: {:?}",
            response.text().await
        );

        client
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /api/register
    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/api/register", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Register request failed")
    }

    /// POST /api/login
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/api/login", self.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Login request failed")
    }

    /// GET /api/logout
    pub async fn logout(&self) -> Response {
        self.client
            .get(format!("{}/api/logout", self.base_url))
            .send()
            .await
            .expect("Logout request failed")
    }

    // ========================================================================
    // Poem Endpoints
    // ========================================================================

    /// GET /api/poems
    pub async fn list_poems(&self) -> Response {
        self.client
            .get(format!("{}/api/poems", self.base_url))
            .send()
            .await
            .expect("List poems request failed")
    }

    /// POST /api/poems
    pub async fn create_poem(&self, title: &str, content: &str) -> Response {
        self.client
            .post(format!("{}/api/poems", self.base_url))
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await
            .expect("Create poem request failed")
    }

    /// POST /api/poems/{id}/comment
    pub async fn add_comment(&self, poem_id: &str, text: &str) -> Response {
        self.client
            .post(format!("{}/api/poems/{}/comment", self.base_url, poem_id))
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Add comment request failed")
    }

    // ========================================================================
    // Stats Endpoint
    // ========================================================================

    /// GET /
    pub async fn stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }
}
