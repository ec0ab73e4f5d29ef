use super::models::{Comment, Poem, StoredUser};
use crate::user::{AuthToken, AuthTokenValue};
use anyhow::Result;

pub trait UserStore: Send + Sync {
    /// Adds a new user.
    /// Returns Err if a user with the same id or username already exists.
    fn add_user(&self, user: StoredUser) -> Result<()>;

    /// Returns the user with the given username, matched exactly
    /// (case-sensitive).
    /// Returns Ok(None) if the user does not exist.
    fn get_user_by_username(&self, username: &str) -> Result<Option<StoredUser>>;

    /// Returns the user with the given id.
    /// Returns Ok(None) if the user does not exist.
    fn get_user_by_id(&self, user_id: &str) -> Result<Option<StoredUser>>;

    /// Returns all usernames in registration order.
    fn get_all_usernames(&self) -> Result<Vec<String>>;
}

pub trait PoemStore: Send + Sync {
    /// Returns all poems in the order they were created.
    fn list_poems(&self) -> Result<Vec<Poem>>;

    /// Returns the poem with the given id.
    /// Returns Ok(None) if the poem does not exist.
    fn get_poem(&self, poem_id: &str) -> Result<Option<Poem>>;

    /// Appends a new poem.
    fn add_poem(&self, poem: Poem) -> Result<()>;

    /// Appends a comment to the poem with the given id.
    /// Returns Ok(None), leaving the store untouched, if the poem does not
    /// exist.
    fn append_comment(&self, poem_id: &str, comment: Comment) -> Result<Option<Comment>>;
}

pub trait AuthTokenStore: Send + Sync {
    /// Returns an authentication token given its value.
    /// Returns Ok(None) if the token does not exist.
    fn get_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>>;

    /// Adds a new auth token.
    /// Returns Err if a token with the same value already exists.
    fn add_auth_token(&self, token: AuthToken) -> Result<()>;

    /// Deletes an auth token given its value.
    /// Returns Ok(None) if the token does not exist.
    fn delete_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>>;
}

pub trait ForumStore: UserStore + PoemStore + AuthTokenStore + Send + Sync {}
