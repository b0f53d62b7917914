//! User registration and lookup endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::auth::UserResponse;
use crate::api::state::{AppState, UserServiceTrait};
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::RegisterUserRequest;

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_user))
        .route("/{user_id}", get(get_user))
        .route("/{user_id}/username", get(get_username))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Username-only response
#[derive(Debug, Serialize)]
pub struct UsernameResponse {
    pub username: String,
}

/// Register a new user
///
/// POST /users
///
/// A taken username or email is a 400; the created user never includes the
/// password hash.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Get a user by id
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Get just a user's username
///
/// GET /users/{user_id}/username
pub async fn get_username(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UsernameResponse>, ApiError> {
    let user = state
        .user_service
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UsernameResponse {
        username: user.username().to_string(),
    }))
}
