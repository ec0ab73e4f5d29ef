pub mod auth;

pub use auth::{
    AuthError, AuthManager, AuthToken, AuthTokenValue, CredentialHasher, PasswordCredentials,
};
