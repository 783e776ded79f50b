//! Shared test helpers: router construction and request plumbing.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use folio_core::config::auth::AuthConfig;
use folio_core::config::{AppConfig, DatabaseConfig};
use folio_database::DatabasePool;

/// Build an `AppConfig` for tests. The database URL is never dialed —
/// the pool comes pre-built from `#[sqlx::test]`.
pub fn test_config() -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: "postgres://unused-in-tests".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..Default::default()
        },
        sharing: Default::default(),
        logging: Default::default(),
    }
}

/// Build the full application router on top of the given pool, wired
/// exactly like production.
pub fn build_app(pool: PgPool) -> Router {
    let state = folio_api::build_state(test_config(), DatabasePool::from_pool(pool))
        .expect("test state should build");
    folio_api::build_router(state)
}

/// A decoded API response: status plus parsed JSON body (or `Null` for
/// an empty body).
pub struct ApiResult {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResult {
    /// The `data` payload of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// Send one request through the router.
pub async fn request(
    app: &Router,
    method: &str,
    path: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> ApiResult {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };

    ApiResult { status, body }
}

pub async fn get(app: &Router, path: &str, bearer: Option<&str>) -> ApiResult {
    request(app, "GET", path, bearer, None).await
}

pub async fn post_json(app: &Router, path: &str, bearer: Option<&str>, body: Value) -> ApiResult {
    request(app, "POST", path, bearer, Some(body)).await
}

pub async fn put_json(app: &Router, path: &str, bearer: Option<&str>, body: Value) -> ApiResult {
    request(app, "PUT", path, bearer, Some(body)).await
}

pub async fn delete(app: &Router, path: &str, bearer: Option<&str>) -> ApiResult {
    request(app, "DELETE", path, bearer, None).await
}

/// Register an account through the API and return its access token.
pub async fn register_user(app: &Router, email: &str, display_name: &str) -> String {
    let res = post_json(
        app,
        "/api/auth/register",
        None,
        serde_json::json!({
            "email": email,
            "display_name": display_name,
            "password": "correct-horse-battery",
        }),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK, "registration failed: {}", res.body);
    res.data()["access_token"]
        .as_str()
        .expect("access token in response")
        .to_string()
}

/// Create a project through the API and return its ID.
pub async fn create_project(app: &Router, bearer: &str, name: &str) -> String {
    let res = post_json(
        app,
        "/api/projects",
        Some(bearer),
        serde_json::json!({
            "name": name,
            "client": "Acme",
            "project_url": "https://demo.acme.com",
            "github_url": "https://github.com/x/demo",
        }),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK, "project creation failed: {}", res.body);
    res.data()["id"].as_str().expect("project id").to_string()
}

/// Issue a share link through the API and return its token.
pub async fn create_share_link(app: &Router, bearer: &str) -> String {
    let res = post_json(app, "/api/share", Some(bearer), serde_json::json!({})).await;
    assert_eq!(res.status, StatusCode::OK, "share creation failed: {}", res.body);
    res.data()["token"].as_str().expect("share token").to_string()
}

/// Total number of recorded view events in the test database.
pub async fn count_view_events(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM view_events")
        .fetch_one(pool)
        .await
        .expect("count query")
}

/// The stored view counter for a token, regardless of link state.
pub async fn view_count_for(pool: &PgPool, token: &str) -> i64 {
    sqlx::query_scalar("SELECT view_count FROM share_links WHERE token = $1")
        .bind(token)
        .fetch_one(pool)
        .await
        .expect("view_count query")
}

/// Force a link's expiry into the past, bypassing issuance validation.
pub async fn expire_share_link(pool: &PgPool, token: &str) {
    sqlx::query(
        "UPDATE share_links SET expires_at = NOW() - INTERVAL '1 hour' WHERE token = $1",
    )
    .bind(token)
    .execute(pool)
    .await
    .expect("expiry update");
}
