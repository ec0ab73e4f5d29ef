use axum::extract::FromRef;

use crate::forum_store::ForumStore;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::user::AuthManager;

use super::ServerConfig;

pub type SharedForumStore = Arc<dyn ForumStore>;
pub type GuardedAuthManager = Arc<Mutex<AuthManager>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub store: SharedForumStore,
    pub auth_manager: GuardedAuthManager,
    pub hash: String,
}

impl FromRef<ServerState> for SharedForumStore {
    fn from_ref(input: &ServerState) -> Self {
        input.store.clone()
    }
}

impl FromRef<ServerState> for GuardedAuthManager {
    fn from_ref(input: &ServerState) -> Self {
        input.auth_manager.clone()
    }
}
