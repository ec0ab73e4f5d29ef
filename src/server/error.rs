//! API error taxonomy shared by all handlers.
//!
//! Every error surfaces to the client as a `{"message": ...}` JSON body with
//! the matching status code. Internal errors are logged server-side and never
//! leak their message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::user::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Username already taken at registration.
    #[error("{0}")]
    Conflict(String),

    /// Wrong username or password.
    #[error("Invalid username or password")]
    Unauthorized,

    /// Missing or invalid session token.
    #[error("Access denied")]
    AccessDenied,

    #[error("Poem {0} not found")]
    PoemNotFound(String),

    /// A required field is empty.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::PoemNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Internal(err) => {
                error!("Internal error: {:#}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::UsernameTaken(_) => ApiError::Conflict(message),
            AuthError::EmptyUsername | AuthError::EmptyPassword => ApiError::Validation(message),
            AuthError::BadCredentials => ApiError::Unauthorized,
            AuthError::UnknownToken | AuthError::NotTokenOwner(_) => ApiError::AccessDenied,
            AuthError::Store(err) => ApiError::Internal(err),
        }
    }
}
