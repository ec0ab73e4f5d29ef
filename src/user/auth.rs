//! Credential hashing, session tokens and the register/login/logout flows.

use anyhow::Result;

use rand::{distr::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use std::str::FromStr;
use std::sync::Arc;
use std::time::SystemTime;

use crate::forum_store::{ForumStore, StoredUser};

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct AuthTokenValue(pub String);

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub user_id: String,
    pub created: SystemTime,
    pub last_used: Option<SystemTime>,
    pub value: AuthTokenValue,
}

impl AuthTokenValue {
    pub fn generate() -> AuthTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        AuthTokenValue(random_string)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("The username cannot be empty")]
    EmptyUsername,

    #[error("The password cannot be empty")]
    EmptyPassword,

    #[error("Invalid username or password")]
    BadCredentials,

    #[error("Auth token not found")]
    UnknownToken,

    #[error("Auth token does not belong to user {0}")]
    NotTokenOwner(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Owns every credential-touching flow. Passwords only ever cross this
/// boundary in plain text on the way into `hash` or `verify`; the store sees
/// salted hashes and opaque token values.
pub struct AuthManager {
    store: Arc<dyn ForumStore>,
    hasher: CredentialHasher,
}

impl AuthManager {
    pub fn new(store: Arc<dyn ForumStore>) -> AuthManager {
        AuthManager {
            store,
            hasher: CredentialHasher::default(),
        }
    }

    fn create_hashed_password(&self, password: &str) -> Result<PasswordCredentials> {
        let hasher = self.hasher.clone();
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        Ok(PasswordCredentials {
            salt,
            hash,
            hasher,
            created: SystemTime::now(),
        })
    }

    /// Creates a new user with hashed credentials. Does not log the user in.
    pub fn register(&mut self, username: &str, password: &str) -> Result<StoredUser, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if self.store.get_user_by_username(username)?.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let user = StoredUser {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            credentials: self.create_hashed_password(password)?,
        };
        self.store.add_user(user.clone())?;
        Ok(user)
    }

    /// Verifies the password and mints a fresh session token. A missing user
    /// and a wrong password are indistinguishable to the caller.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(StoredUser, AuthToken), AuthError> {
        let user = match self.store.get_user_by_username(username)? {
            Some(user) => user,
            None => return Err(AuthError::BadCredentials),
        };

        let credentials = &user.credentials;
        match credentials.hasher.verify(
            password,
            credentials.hash.as_str(),
            credentials.salt.as_str(),
        ) {
            Ok(true) => {}
            _ => return Err(AuthError::BadCredentials),
        }

        let token = AuthToken {
            user_id: user.id.clone(),
            value: AuthTokenValue::generate(),
            created: SystemTime::now(),
            last_used: None,
        };
        self.store.add_auth_token(token.clone())?;
        Ok((user, token))
    }

    /// Resolves a token value to the user it belongs to.
    /// Returns Ok(None) if the token is unknown or its user no longer exists.
    pub fn resolve_token(
        &self,
        value: &AuthTokenValue,
    ) -> Result<Option<(StoredUser, AuthToken)>> {
        let token = match self.store.get_auth_token(value)? {
            Some(token) => token,
            None => return Ok(None),
        };
        let user = match self.store.get_user_by_id(&token.user_id)? {
            Some(user) => user,
            None => return Ok(None),
        };
        Ok(Some((user, token)))
    }

    /// Deletes the token, re-inserting it if the authenticated user turns out
    /// not to be its owner.
    pub fn logout(&mut self, user_id: &str, token_value: &AuthTokenValue) -> Result<(), AuthError> {
        let removed = self.store.delete_auth_token(token_value)?;
        match removed {
            Some(removed) => {
                if removed.user_id == user_id {
                    Ok(())
                } else {
                    self.store.add_auth_token(removed.clone())?;
                    Err(AuthError::NotTokenOwner(user_id.to_string()))
                }
            }
            None => Err(AuthError::UnknownToken),
        }
    }
}

mod verseboard_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{
            rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        },
        Argon2,
    };

    pub fn generate_b64_salt() -> String {
        SaltString::generate(&mut OsRng).to_string()
    }

    pub fn hash<T: AsRef<str>>(plain: &[u8], b64_salt: T) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::from_b64(b64_salt.as_ref()).map_err(|err| anyhow!("{}", err))?;
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify<T: AsRef<str>>(plain_pw: &[u8], target_hash: T) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash =
            PasswordHash::new(target_hash.as_ref()).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain_pw, &password_hash).is_ok())
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub enum CredentialHasher {
    Argon2,
    /// Fast test-only hasher - DO NOT use in production!
    /// Simply stores password with a marker prefix for verification.
    #[cfg(feature = "test-fast-hasher")]
    TestFast,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        #[cfg(feature = "test-fast-hasher")]
        return CredentialHasher::TestFast;

        #[cfg(not(feature = "test-fast-hasher"))]
        CredentialHasher::Argon2
    }
}

impl FromStr for CredentialHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(CredentialHasher::Argon2),
            #[cfg(feature = "test-fast-hasher")]
            "test_fast" => Ok(CredentialHasher::TestFast),
            _ => anyhow::bail!("Unknown hasher {}", s),
        }
    }
}

impl std::fmt::Display for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialHasher::Argon2 => write!(f, "argon2"),
            #[cfg(feature = "test-fast-hasher")]
            CredentialHasher::TestFast => write!(f, "test_fast"),
        }
    }
}

impl CredentialHasher {
    pub fn generate_b64_salt(&self) -> String {
        match self {
            CredentialHasher::Argon2 => verseboard_argon2::generate_b64_salt(),
            #[cfg(feature = "test-fast-hasher")]
            CredentialHasher::TestFast => "test_salt".to_string(),
        }
    }

    pub fn hash<T: AsRef<str>>(&self, plain: &[u8], b64_salt: T) -> Result<String> {
        match self {
            CredentialHasher::Argon2 => verseboard_argon2::hash(plain, b64_salt),
            #[cfg(feature = "test-fast-hasher")]
            CredentialHasher::TestFast => {
                // Just store password as hex - instant "hashing"
                let hex: String = plain.iter().map(|b| format!("{:02x}", b)).collect();
                Ok(format!("$testfast${}${}", b64_salt.as_ref(), hex))
            }
        }
    }

    pub fn verify<T: AsRef<str>>(&self, plain_pw: T, target_hash: T, _salt: T) -> Result<bool> {
        match self {
            CredentialHasher::Argon2 => {
                verseboard_argon2::verify(plain_pw.as_ref().as_bytes(), target_hash)
            }
            #[cfg(feature = "test-fast-hasher")]
            CredentialHasher::TestFast => {
                // Extract the hex-encoded password from the hash and compare
                let hash = target_hash.as_ref();
                if let Some(hex) = hash
                    .strip_prefix("$testfast$")
                    .and_then(|s| s.split('$').nth(1))
                {
                    let decoded: Vec<u8> = (0..hex.len())
                        .step_by(2)
                        .filter_map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                        .collect();
                    Ok(decoded == plain_pw.as_ref().as_bytes())
                } else {
                    Ok(false)
                }
            }
        }
    }
}

/// Salted password hash as persisted for a user. The plain password is
/// dropped as soon as the hash is computed.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredentials {
    pub salt: String,
    pub hash: String,
    pub hasher: CredentialHasher,
    pub created: SystemTime,
}
