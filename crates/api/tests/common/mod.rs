#![allow(dead_code)]

use std::sync::Arc;

use accounts_api::auth::jwt::JwtConfig;
use accounts_api::config::{LogFormat, ServerConfig};
use accounts_api::router::build_app_router;
use accounts_api::state::AppState;
use accounts_core::clock::{Clock, SystemClock};
use accounts_db::store::{MemoryUserStore, UserStore};
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_days: 3,
        },
    }
}

/// A test harness: the in-memory store plus a way to build routers over it.
///
/// Each request consumes a router, so tests call [`TestApp::app`] per request;
/// all routers share the same store.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryUserStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let dyn_store: Arc<dyn UserStore> = store.clone();
        let state = AppState::new(test_config(), dyn_store, clock);
        Self { state, store }
    }

    /// The full application router with the production middleware stack.
    pub fn app(&self) -> Router {
        build_app_router(self.state.clone()).expect("test router should build")
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and assert success.
pub async fn register(test: &TestApp, username: &str, password: &str) {
    let body = serde_json::json!({
        "username": username,
        "password": password,
        "firstName": "First",
        "lastName": "Last",
    });
    let response = post_json(test.app(), "/api/createUser", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Sign in through the API and return the issued token.
pub async fn sign_in(test: &TestApp, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(test.app(), "/api/request", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["Token"]
        .as_str()
        .expect("response must contain Token")
        .to_string()
}
