#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use qanda_core::memory::MemoryStore;
use qanda_core::models::NewUser;
use qanda_core::store::QaStore;
use qanda_core::types::UserId;
use serde_json::Value;
use tower::ServiceExt;

use qanda_api::config::ServerConfig;
use qanda_api::router::build_app_router;
use qanda_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_timeout: Duration::from_secs(5),
        search_topic: None,
        feed_limit: 10,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The store handle is returned too so tests can seed users, which have no
/// HTTP creation route.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config.clone());
    (build_app_router(state, &config), store)
}

pub async fn seed_user(store: &MemoryStore, username: &str) -> UserId {
    store
        .create_user(&NewUser {
            username: username.to_string(),
        })
        .await
        .unwrap()
        .uid
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Ask a question over HTTP and return its qid.
pub async fn ask(app: &Router, uid: UserId, title: &str, body: &str, topic: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/questions",
        serde_json::json!({ "uid": uid, "title": title, "body": body, "topic": topic }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["qid"].as_i64().unwrap()
}

/// Answer a question over HTTP.
pub async fn answer(app: &Router, qid: i64, uid: UserId, body: &str) {
    let response = post_json(
        app.clone(),
        &format!("/api/v1/questions/{qid}/answers"),
        serde_json::json!({ "uid": uid, "body": body }),
    )
    .await;
    assert_eq!(response.status(), 201);
}
