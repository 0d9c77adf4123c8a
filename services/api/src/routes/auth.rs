//! Authentication routes
//!
//! Register and login hand out a short-lived access token in the body and a
//! long-lived refresh token in an http-only cookie. Logout only clears the
//! cookie; tokens are not revoked server-side.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    jwt::REFRESH_TOKEN_LIFETIME,
    models::{AuthResponse, LoginRequest, NewUser, PublicUser, RegisterRequest, User},
    password::verify_password,
    state::AppState,
    validation::{normalize_email, required_text},
};

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refreshToken";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
}

/// Refresh cookie with the attribute set shared by setting and clearing
fn refresh_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::None)
        .secure(state.config.is_production())
        .max_age(time::Duration::seconds(REFRESH_TOKEN_LIFETIME.as_secs() as i64))
        .build()
}

/// Issue both tokens for `user`, returning the jar with the refresh cookie set
fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: &User,
) -> ApiResult<(CookieJar, AuthResponse)> {
    let access_token = state
        .jwt_service
        .issue_access_token(user.id)
        .context("Failed to generate access token")?;
    let refresh_token = state
        .jwt_service
        .issue_refresh_token(user.id)
        .context("Failed to generate refresh token")?;

    let jar = jar.add(refresh_cookie(state, refresh_token));
    let response = AuthResponse {
        access_token,
        user: PublicUser::from(user),
    };

    Ok((jar, response))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let Json(payload) = payload?;

    let (Some(name), Some(email), Some(password)) = (
        required_text(payload.name.as_deref()),
        required_text(payload.email.as_deref()),
        payload.password.filter(|password| !password.is_empty()),
    ) else {
        return Err(ApiError::bad_request("All fields are required"));
    };

    info!("Registration attempt for {}", email);

    let new_user = NewUser::new(&name, &email, &password);
    if state
        .user_repository
        .find_by_email(&new_user.email)
        .await?
        .is_some()
    {
        return Err(ApiError::bad_request("User already exists"));
    }

    let user = state.user_repository.create(&new_user).await?;
    let (jar, response) = start_session(&state, jar, &user)?;
    info!("Registered user {}", user.id);

    Ok((StatusCode::CREATED, jar, Json(response)))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let Json(payload) = payload?;

    let (Some(email), Some(password)) = (
        required_text(payload.email.as_deref()),
        payload.password.filter(|password| !password.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    let user = state
        .user_repository
        .find_by_email(&normalize_email(&email))
        .await?
        .filter(|user| verify_password(&user.password_hash, &password))
        .ok_or_else(|| {
            warn!("Failed login for {}", email);
            ApiError::unauthorized("Invalid credentials")
        })?;

    let (jar, response) = start_session(&state, jar, &user)?;
    info!("User {} logged in", user.id);

    Ok((jar, Json(response)))
}

/// Exchange the refresh cookie for a new access token
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<AuthResponse>> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no refresh token"))?;

    let claims = state.jwt_service.verify(&token).map_err(|e| {
        warn!("Rejected refresh token: {}", e);
        ApiError::unauthorized("Invalid or expired refresh token")
    })?;

    let user = state
        .user_repository
        .find_by_id(claims.payload.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User not found"))?;

    let access_token = state
        .jwt_service
        .issue_access_token(user.id)
        .context("Failed to generate access token")?;

    Ok(Json(AuthResponse {
        access_token,
        user: PublicUser::from(&user),
    }))
}

/// Logout endpoint
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let mut cookie = refresh_cookie(&state, String::new());
    cookie.make_removal();

    (
        jar.add(cookie),
        Json(json!({ "message": "Logged out successfully" })),
    )
}
