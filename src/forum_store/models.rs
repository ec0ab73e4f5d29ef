//! Forum data models
//!
//! These double as the wire format: everything serializes with camelCase
//! field names, matching what clients see on the HTTP API and what lands in
//! the persisted dump.

use serde::{Deserialize, Serialize};

use crate::user::PasswordCredentials;

/// A registered user as kept in the store. Only the salted hash of the
/// password is persisted, never the password itself.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: String,
    pub username: String,
    pub credentials: PasswordCredentials,
}

/// A poem with its comments in append order. `author_id` and `author_name`
/// are snapshots of the author's identity taken at creation time.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub comments: Vec<Comment>,
}

/// A comment on a poem. Immutable once appended.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub text: String,
}
