//! Helpers shared by handler tests

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use common::config::{AppConfig, ErrorClassification};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::{
    repositories::{
        IdeaRepository,
        memory::{MemoryIdeaRepository, MemoryUserRepository},
    },
    state::AppState,
};

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        app_env: "development".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        port: 0,
        error_classification: ErrorClassification::Full,
        cors_origins: "http://localhost:3000".to_string(),
    }
}

/// State backed by empty in-memory repositories
pub fn test_state() -> AppState {
    state_with(test_config(), Arc::new(MemoryIdeaRepository::default()))
}

pub fn state_with(config: AppConfig, idea_repository: Arc<dyn IdeaRepository>) -> AppState {
    AppState::new(
        config,
        idea_repository,
        Arc::new(MemoryUserRepository::default()),
    )
}

/// Drive one request through the router and decode the JSON body
///
/// An empty body decodes to `Value::Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, body)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
