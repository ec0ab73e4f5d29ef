mod api;
mod profile;
mod view;

pub use api::{ApiClient, LoginResponse};
pub use profile::{ClientProfile, ClientSession, ProfileStore, Theme, DEFAULT_PROFILE_FILE};
pub use view::ViewState;
