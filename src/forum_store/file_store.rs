use super::models::{Comment, Poem, StoredUser};
use super::trait_def::{AuthTokenStore, ForumStore, PoemStore, UserStore};
use crate::user::{AuthToken, AuthTokenValue};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::File,
    io::{Read, Write},
    path::PathBuf,
    sync::Mutex,
};

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Dump {
    users: Vec<StoredUser>,
    poems: Vec<Poem>,
    auth_tokens: HashMap<AuthTokenValue, AuthToken>,
}

/// Forum store backed by a single JSON file. The whole state lives in memory
/// behind one mutex; every mutation rewrites the file wholesale while the
/// lock is held, so interleaved writers cannot lose each other's updates.
pub struct FileForumStore {
    file_path: PathBuf,
    dump: Mutex<Dump>,
}

impl FileForumStore {
    fn load_dump_from_file(file_path: &PathBuf) -> Result<Dump> {
        let mut file = File::open(file_path)?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Opens the store at the given path. A missing file means starting from
    /// an empty state; the file is created on the first save.
    pub fn initialize(file_path: PathBuf) -> FileForumStore {
        FileForumStore {
            file_path: file_path.clone(),
            dump: Mutex::new(Self::load_dump_from_file(&file_path).unwrap_or_default()),
        }
    }

    fn save_dump(&self, dump: &Dump) -> Result<()> {
        let json_string = serde_json::to_string_pretty(dump)?;
        let mut file = File::create(&self.file_path)?;
        file.write_all(json_string.as_bytes())?;
        Ok(())
    }
}

impl UserStore for FileForumStore {
    fn add_user(&self, user: StoredUser) -> Result<()> {
        let mut dump = self.dump.lock().unwrap();
        if dump
            .users
            .iter()
            .any(|u| u.id == user.id || u.username == user.username)
        {
            bail!("User {} already exists", user.username);
        }
        dump.users.push(user);
        self.save_dump(&dump)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<StoredUser>> {
        Ok(self
            .dump
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    fn get_user_by_id(&self, user_id: &str) -> Result<Option<StoredUser>> {
        Ok(self
            .dump
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    fn get_all_usernames(&self) -> Result<Vec<String>> {
        Ok(self
            .dump
            .lock()
            .unwrap()
            .users
            .iter()
            .map(|u| u.username.clone())
            .collect())
    }
}

impl PoemStore for FileForumStore {
    fn list_poems(&self) -> Result<Vec<Poem>> {
        Ok(self.dump.lock().unwrap().poems.clone())
    }

    fn get_poem(&self, poem_id: &str) -> Result<Option<Poem>> {
        Ok(self
            .dump
            .lock()
            .unwrap()
            .poems
            .iter()
            .find(|p| p.id == poem_id)
            .cloned())
    }

    fn add_poem(&self, poem: Poem) -> Result<()> {
        let mut dump = self.dump.lock().unwrap();
        if dump.poems.iter().any(|p| p.id == poem.id) {
            bail!("Poem {} already exists", poem.id);
        }
        dump.poems.push(poem);
        self.save_dump(&dump)
    }

    fn append_comment(&self, poem_id: &str, comment: Comment) -> Result<Option<Comment>> {
        let mut dump = self.dump.lock().unwrap();
        let poem = match dump.poems.iter_mut().find(|p| p.id == poem_id) {
            Some(poem) => poem,
            None => return Ok(None),
        };
        poem.comments.push(comment.clone());
        self.save_dump(&dump)?;
        Ok(Some(comment))
    }
}

impl AuthTokenStore for FileForumStore {
    fn get_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        Ok(self.dump.lock().unwrap().auth_tokens.get(value).cloned())
    }

    fn add_auth_token(&self, token: AuthToken) -> Result<()> {
        let mut dump = self.dump.lock().unwrap();
        if dump.auth_tokens.contains_key(&token.value) {
            bail!("Auth token already exists");
        }
        dump.auth_tokens.insert(token.value.clone(), token);
        self.save_dump(&dump)
    }

    fn delete_auth_token(&self, value: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let mut dump = self.dump.lock().unwrap();
        let removed = dump.auth_tokens.remove(value);
        if removed.is_some() {
            self.save_dump(&dump)?;
        }
        Ok(removed)
    }
}

impl ForumStore for FileForumStore {}
