mod file_store;
mod models;
mod trait_def;

pub use file_store::FileForumStore;
pub use models::{Comment, Poem, StoredUser};
pub use trait_def::{AuthTokenStore, ForumStore, PoemStore, UserStore};
