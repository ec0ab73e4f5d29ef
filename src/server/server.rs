use anyhow::Result;
use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use tracing::info;

use axum_extra::extract::cookie::{Cookie, SameSite};

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, response, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::forum_store::{Comment, ForumStore, Poem};
use crate::user::{AuthManager, AuthTokenValue};

use super::error::ApiError;
use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
use super::state::*;
use super::{log_requests, ServerConfig};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub session_token: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize)]
struct RegisterBody {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginSuccessResponse {
    user_id: String,
    username: String,
    token: String,
}

// Clients still send authorId/authorName here; identity comes from the
// session, so those fields are dropped on the floor.
#[derive(Deserialize)]
struct CreatePoemBody {
    pub title: String,
    pub content: String,
}

#[derive(Serialize)]
struct CreatedPoemResponse {
    poem: Poem,
}

#[derive(Deserialize)]
struct AddCommentBody {
    pub text: String,
}

#[derive(Serialize)]
struct AddedCommentResponse {
    comment: Comment,
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        session_token: session.map(|s| s.token),
    };
    Json(stats)
}

async fn register(
    State(auth_manager): State<GuardedAuthManager>,
    Json(body): Json<RegisterBody>,
) -> Result<StatusCode, ApiError> {
    auth_manager
        .lock()
        .unwrap()
        .register(&body.username, &body.password)?;
    Ok(StatusCode::OK)
}

async fn login(
    State(auth_manager): State<GuardedAuthManager>,
    Json(body): Json<LoginBody>,
) -> Result<Response, ApiError> {
    let (user, auth_token) = auth_manager
        .lock()
        .unwrap()
        .login(&body.username, &body.password)?;

    let response_body = LoginSuccessResponse {
        user_id: user.id,
        username: user.username,
        token: auth_token.value.0.clone(),
    };
    let response_body = serde_json::to_string(&response_body).map_err(anyhow::Error::from)?;

    let cookie_value = HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly",
        COOKIE_SESSION_TOKEN_KEY, auth_token.value.0
    ))
    .map_err(anyhow::Error::from)?;

    Ok(response::Builder::new()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::SET_COOKIE, cookie_value)
        .body(Body::from(response_body))
        .map_err(anyhow::Error::from)?)
}

async fn logout(
    State(auth_manager): State<GuardedAuthManager>,
    session: Session,
) -> Result<Response, ApiError> {
    auth_manager
        .lock()
        .unwrap()
        .logout(&session.user_id, &AuthTokenValue(session.token))?;

    let cookie_value = Cookie::build(Cookie::new(COOKIE_SESSION_TOKEN_KEY, ""))
        .path("/")
        .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1)) // Expire it in the past
        .same_site(SameSite::Lax)
        .build();

    Ok(response::Builder::new()
        .status(StatusCode::OK)
        .header(header::SET_COOKIE, cookie_value.to_string())
        .body(Body::empty())
        .map_err(anyhow::Error::from)?)
}

async fn list_poems(State(store): State<SharedForumStore>) -> Result<Json<Vec<Poem>>, ApiError> {
    Ok(Json(store.list_poems()?))
}

async fn create_poem(
    session: Session,
    State(store): State<SharedForumStore>,
    Json(body): Json<CreatePoemBody>,
) -> Result<Json<CreatedPoemResponse>, ApiError> {
    if body.title.trim().is_empty() {
        return Err(ApiError::Validation("The title cannot be empty".to_string()));
    }
    if body.content.trim().is_empty() {
        return Err(ApiError::Validation(
            "The content cannot be empty".to_string(),
        ));
    }

    let poem = Poem {
        id: Uuid::new_v4().to_string(),
        title: body.title,
        author_id: session.user_id,
        author_name: session.username,
        content: body.content,
        comments: vec![],
    };
    store.add_poem(poem.clone())?;
    Ok(Json(CreatedPoemResponse { poem }))
}

async fn add_comment(
    session: Session,
    State(store): State<SharedForumStore>,
    Path(poem_id): Path<String>,
    Json(body): Json<AddCommentBody>,
) -> Result<Json<AddedCommentResponse>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::Validation(
            "The comment text cannot be empty".to_string(),
        ));
    }

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        user_id: session.user_id,
        username: session.username,
        text: body.text,
    };
    match store.append_comment(&poem_id, comment)? {
        Some(comment) => Ok(Json(AddedCommentResponse { comment })),
        None => Err(ApiError::PoemNotFound(poem_id)),
    }
}

impl ServerState {
    fn new(config: ServerConfig, store: Arc<dyn ForumStore>) -> ServerState {
        let auth_manager = AuthManager::new(store.clone());
        ServerState {
            config,
            start_time: Instant::now(),
            store,
            auth_manager: Arc::new(Mutex::new(auth_manager)),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(config: ServerConfig, store: Arc<dyn ForumStore>) -> Result<Router> {
    let state = ServerState::new(config, store);

    let api_routes: Router = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/poems", get(list_poems))
        .route("/poems", post(create_poem))
        .route("/poems/{poem_id}/comment", post(add_comment))
        .with_state(state.clone());

    let app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(store: Arc<dyn ForumStore>, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Listening on port {}", port);
    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum_store::FileForumStore;
    use crate::server::RequestsLoggingLevel;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn quiet_test_app() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        let store: Arc<dyn ForumStore> =
            Arc::new(FileForumStore::initialize(dir.path().join("forum.json")));
        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, store).unwrap();
        (dir, app)
    }

    #[tokio::test]
    async fn responds_forbidden_on_protected_routes() {
        let (_dir, app) = quiet_test_app();

        let protected_routes = vec![
            ("POST", "/api/poems"),
            ("POST", "/api/poems/123/comment"),
            ("GET", "/api/logout"),
        ];

        for (method, route) in protected_routes.into_iter() {
            let request = Request::builder()
                .method(method)
                .uri(route)
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "route {}", route);
        }
    }

    #[tokio::test]
    async fn home_reports_stats_without_a_session() {
        let (_dir, app) = quiet_test_app();

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(stats.get("uptime").is_some());
        assert!(stats.get("hash").is_some());
        assert!(stats["sessionToken"].is_null());
    }

    #[tokio::test]
    async fn listing_poems_requires_no_session() {
        let (_dir, app) = quiet_test_app();

        let request = Request::builder()
            .uri("/api/poems")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let poems: Vec<Poem> = serde_json::from_slice(&bytes).unwrap();
        assert!(poems.is_empty());
    }
}
