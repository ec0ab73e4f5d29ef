//! Verseboard Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod client;
pub mod forum_store;
pub mod render;
pub mod server;
pub mod user;

// Re-export commonly used types for convenience
pub use forum_store::{FileForumStore, ForumStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use user::AuthManager;
