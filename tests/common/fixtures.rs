//! Test fixture creation for the forum store
//!
//! Each test server gets a fresh store file seeded with two users and two
//! poems by the first user.

use super::constants::*;
use anyhow::Result;
use std::sync::Arc;
use tempfile::TempDir;
use verseboard::forum_store::{FileForumStore, Poem, PoemStore};
use verseboard::user::AuthManager;

/// Creates a temporary seeded store. Returns the TempDir so it stays alive
/// for as long as the server does.
pub fn create_seeded_store() -> Result<(TempDir, Arc<FileForumStore>)> {
    let dir = TempDir::new()?;
    let store = Arc::new(FileForumStore::initialize(dir.path().join("forum.json")));

    let mut auth_manager = AuthManager::new(store.clone());
    let author = auth_manager.register(TEST_USER, TEST_PASS)?;
    auth_manager.register(OTHER_USER, OTHER_PASS)?;

    store.add_poem(Poem {
        id: POEM_1_ID.to_string(),
        title: POEM_1_TITLE.to_string(),
        author_id: author.id.clone(),
        author_name: author.username.clone(),
        content: "White fields at sunrise,\nthe fence posts wear silver caps.".to_string(),
        comments: vec![],
    })?;

    store.add_poem(Poem {
        id: POEM_2_ID.to_string(),
        title: POEM_2_TITLE.to_string(),
        author_id: author.id,
        author_name: author.username,
        content: "Green over the water,\nred answering from the pier.".to_string(),
        comments: vec![],
    })?;

    Ok((dir, store))
}
