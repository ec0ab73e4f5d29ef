//! Request logging middleware

use super::super::state::ServerState;
use axum::extract::State;
use axum::{
    body::Body,
    http::{header::HeaderMap, Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;
use tracing::{error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    Path,
    Headers,
    Body,
}

impl Default for RequestsLoggingLevel {
    fn default() -> Self {
        Self::Path
    }
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

/// The declared body size, or a reason why it could not be determined.
fn declared_body_size(headers: &HeaderMap) -> Result<usize, &'static str> {
    let value = headers
        .get("content-length")
        .ok_or("Content-length not set.")?;
    let value = value
        .to_str()
        .map_err(|_| "Unreadable Content-length value.")?;
    value
        .parse::<usize>()
        .map_err(|_| "Non-numeric Content-length value.")
}

pub async fn log_requests(
    State(state): State<ServerState>,
    mut request: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let level = state.config.requests_logging_level.clone();

    let start = Instant::now();

    let method = request.method().to_string();
    let uri = request.uri().to_string();

    if level > RequestsLoggingLevel::None {
        info!(">>> {} {}", method, uri);
    }

    if level >= RequestsLoggingLevel::Headers {
        info!("  Req Headers:");
        for (name, value) in request.headers().iter() {
            info!("    {:?}: {:?}", name, value);
        }
    }

    if level >= RequestsLoggingLevel::Body {
        match declared_body_size(request.headers()) {
            Err(reason) => info!("  Req Body: {}", reason),
            Ok(size) if size >= MAX_LOGGABLE_BODY_LENGTH => {
                info!(
                    "  Req Body: Too big to log ({:#})",
                    byte_unit::Byte::from(size)
                );
            }
            Ok(size) => {
                // Logging consumes the body, so it has to be buffered and
                // put back.
                let (parts, body) = request.into_parts();
                match axum::body::to_bytes(body, size).await {
                    Ok(bytes) => {
                        info!("  Req Body:\n{}", String::from_utf8_lossy(&bytes));
                        request = Request::from_parts(parts, Body::from(bytes));
                    }
                    Err(err) => {
                        error!("Failed to buffer request body for logging: {:?}", err);
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                }
            }
        }
    }

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        info!("  Resp Headers:");
        for (name, value) in response.headers().iter() {
            info!("    {:?}: {:?}", name, value);
        }
    }

    if level >= RequestsLoggingLevel::Body {
        match declared_body_size(response.headers()) {
            Err(reason) => info!("  Resp Body: {}", reason),
            Ok(size) if size >= MAX_LOGGABLE_BODY_LENGTH => {
                info!(
                    "  Resp Body: Too big to log ({:#})",
                    byte_unit::Byte::from(size)
                );
            }
            Ok(size) => {
                let (parts, body) = response.into_parts();
                match axum::body::to_bytes(body, size).await {
                    Ok(bytes) => {
                        info!("  Resp Body:\n{}", String::from_utf8_lossy(&bytes));
                        response = Response::from_parts(parts, Body::from(bytes));
                    }
                    Err(err) => {
                        error!("Failed to buffer response body for logging: {:?}", err);
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                }
            }
        }
    }

    let status = response.status().as_u16();
    let duration = start.elapsed();

    if level > RequestsLoggingLevel::None {
        info!("<<< {} ({}ms)", status, duration.as_millis());
    }

    response
}
