//! Idea resource handlers

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{Idea, IdeaRequest},
    state::AppState,
    validation::{parse_limit, parse_record_id},
};

const IDEA_NOT_FOUND: &str = "Idea Not Found";
const MISSING_FIELDS: &str = "Title, summary and description are required";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ideas", get(list_ideas).post(create_idea))
        .route(
            "/api/ideas/:id",
            get(get_idea).patch(update_idea).delete(delete_idea),
        )
}

fn idea_not_found() -> ApiError {
    ApiError::not_found(IDEA_NOT_FOUND)
}

/// Record id from the path; undecodable or malformed ids count as not found
fn idea_id(path: Result<Path<String>, PathRejection>) -> ApiResult<Uuid> {
    let Ok(Path(id)) = path else {
        return Err(idea_not_found());
    };

    parse_record_id(&id).ok_or_else(idea_not_found)
}

/// Get all ideas, newest first
pub async fn list_ideas(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Idea>>> {
    let limit = parse_limit(params.get("_limit").map(String::as_str));
    let ideas = state.idea_repository.list(limit).await?;

    Ok(Json(ideas))
}

/// Get a single idea
///
/// A malformed id is reported exactly like a missing record.
pub async fn get_idea(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Idea>> {
    let id = idea_id(path)?;
    let idea = state
        .idea_repository
        .find_by_id(id)
        .await?
        .ok_or_else(idea_not_found)?;

    Ok(Json(idea))
}

/// Create a new idea
pub async fn create_idea(
    State(state): State<AppState>,
    payload: Result<Json<IdeaRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Idea>)> {
    let Json(payload) = payload?;
    let draft = payload
        .into_draft()
        .ok_or_else(|| ApiError::bad_request(MISSING_FIELDS))?;

    let idea = state.idea_repository.create(&draft).await?;
    info!("Created idea {}", idea.id);

    Ok((StatusCode::CREATED, Json(idea)))
}

/// Replace the content of an idea
///
/// Title, summary and description are all required even though the route
/// is a PATCH.
pub async fn update_idea(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<IdeaRequest>, JsonRejection>,
) -> ApiResult<Json<Idea>> {
    let id = idea_id(path)?;
    let Json(payload) = payload?;
    let draft = payload
        .into_draft()
        .ok_or_else(|| ApiError::bad_request(MISSING_FIELDS))?;

    if state.idea_repository.find_by_id(id).await?.is_none() {
        return Err(idea_not_found());
    }

    let idea = state
        .idea_repository
        .update(id, &draft)
        .await?
        .ok_or_else(idea_not_found)?;
    info!("Updated idea {}", idea.id);

    Ok(Json(idea))
}

/// Delete an idea
pub async fn delete_idea(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let id = idea_id(path)?;

    if !state.idea_repository.delete(id).await? {
        return Err(idea_not_found());
    }
    info!("Deleted idea {}", id);

    Ok(Json(json!({ "message": "Idea deleted successfully" })))
}
