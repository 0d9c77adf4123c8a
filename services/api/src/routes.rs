//! API service routes

use axum::{
    Json, Router,
    http::{HeaderValue, Method, Uri, header},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    middleware::render_errors,
    state::AppState,
};

pub mod auth;
pub mod ideas;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origin_list());

    Router::new()
        .route("/api/health", get(health_check))
        .merge(auth::router())
        .merge(ideas::router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), render_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS with credentials so browsers send the refresh cookie
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            // A wildcard cannot be combined with credentials.
            if origin == "*" {
                warn!("Ignoring wildcard CORS origin");
                return None;
            }
            match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "idea-board-api"
    }))
}

async fn not_found(uri: Uri) -> ApiResult<()> {
    Err(ApiError::not_found(format!("Not Found - {}", uri.path())))
}
