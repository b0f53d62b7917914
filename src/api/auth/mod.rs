//! Authentication API endpoints
//!
//! Provides login, logout, and current-user endpoints for token-based
//! authentication.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::{AppState, UserServiceTrait};
use crate::api::types::{ApiError, Json};
use crate::domain::user::User;
use crate::infrastructure::auth::TokenService;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_current_user))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: String,
}

/// User response (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl UserResponse {
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Login with username and password
///
/// POST /auth/login
///
/// Returns a signed access token on successful authentication. Failure is a
/// single 401 that does not reveal whether the username exists.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?;

    let ttl = state.token_service.access_token_ttl();
    let token = state.token_service.issue(user.id(), ttl)?;
    let expires_at = Utc::now() + ttl;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from_user(&user),
        expires_at: expires_at.to_rfc3339(),
    }))
}

/// Logout (client-side only for stateless tokens)
///
/// POST /auth/logout
///
/// Tokens are stateless and cannot be revoked server-side; logout is handled
/// client-side by discarding the token. This endpoint exists for API
/// consistency.
pub async fn logout(_user: RequireUser) -> Result<Json<LogoutResponse>, ApiError> {
    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Get current authenticated user
///
/// GET /auth/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from_user(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User::new(1, "alice", "alice@x.com", "secret-hash");
        let response = UserResponse::from_user(&user);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("\"email\":\"alice@x.com\""));
        assert!(!json.contains("secret-hash"));
    }
}
