use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;

pub const DEFAULT_PROFILE_FILE: &str = "verseboard_profile.json";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClientSession {
    pub user_id: String,
    pub username: String,
    pub token: String,
}

/// What the client remembers between runs: who is logged in and how the
/// board should look.
#[derive(Clone, Default, Serialize, Deserialize, Debug)]
pub struct ClientProfile {
    #[serde(default)]
    pub session: Option<ClientSession>,
    #[serde(default)]
    pub theme: Theme,
}

pub struct ProfileStore {
    file_path: PathBuf,
    profile: ClientProfile,
}

impl ProfileStore {
    fn load_profile_from_file(file_path: &PathBuf) -> Result<ClientProfile> {
        let mut file = File::open(file_path)?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the profile from the given file, or starts from defaults if the
    /// file does not exist or cannot be parsed.
    pub fn initialize(file_path: PathBuf) -> ProfileStore {
        ProfileStore {
            profile: Self::load_profile_from_file(&file_path).unwrap_or_default(),
            file_path,
        }
    }

    fn save_profile(&self) -> Result<()> {
        let json_string = serde_json::to_string_pretty(&self.profile)?;
        let mut file = File::create(&self.file_path)?;
        file.write_all(json_string.as_bytes())?;
        Ok(())
    }

    pub fn profile(&self) -> &ClientProfile {
        &self.profile
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    pub fn set_session(&mut self, session: Option<ClientSession>) -> Result<()> {
        self.profile.session = session;
        self.save_profile()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.profile.theme = theme;
        self.save_profile()
    }
}
