//! Blocking HTTP client for the forum API, used by the terminal client.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::forum_store::{Comment, Poem};

pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: String,
    pub username: String,
    pub token: String,
}

#[derive(Deserialize)]
struct CreatedPoemResponse {
    poem: Poem,
}

#[derive(Deserialize)]
struct AddedCommentResponse {
    comment: Comment,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Turns a non-success response into an error carrying the server's
/// `message` body, falling back to the bare status code.
fn error_from_response(response: Response) -> anyhow::Error {
    let status = response.status();
    match response.json::<ErrorMessage>() {
        Ok(body) => anyhow!("{}", body.message),
        Err(_) => anyhow!("Request failed with status {}", status),
    }
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}/api/register", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .context("Failed to connect to the server")?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }
        Ok(())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/api/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .context("Failed to connect to the server")?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        response.json().context("Failed to parse login response")
    }

    pub fn logout(&self, token: &str) -> Result<()> {
        let url = format!("{}/api/logout", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, token)
            .send()
            .context("Failed to connect to the server")?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }
        Ok(())
    }

    pub fn list_poems(&self) -> Result<Vec<Poem>> {
        let url = format!("{}/api/poems", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .context("Failed to connect to the server")?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        response.json().context("Failed to parse the poem list")
    }

    pub fn create_poem(&self, token: &str, title: &str, content: &str) -> Result<Poem> {
        let url = format!("{}/api/poems", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, token)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .context("Failed to connect to the server")?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        let body: CreatedPoemResponse = response
            .json()
            .context("Failed to parse the created poem")?;
        Ok(body.poem)
    }

    pub fn add_comment(&self, token: &str, poem_id: &str, text: &str) -> Result<Comment> {
        let url = format!("{}/api/poems/{}/comment", self.base_url, poem_id);
        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, token)
            .json(&json!({ "text": text }))
            .send()
            .context("Failed to connect to the server")?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        let body: AddedCommentResponse = response
            .json()
            .context("Failed to parse the created comment")?;
        Ok(body.comment)
    }
}
