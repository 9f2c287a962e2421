//! Authentication API handlers

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use revue_core::RevueError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration response
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
}

/// Login response carrying the freshly issued token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Register a new account
///
/// New accounts get the USER role. No token is issued here; the caller
/// logs in afterwards.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account registered", body = RegisterResponse),
        (status = 400, description = "Username taken or invalid input", body = crate::error::ApiError),
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    request
        .validate()
        .map_err(|e| RevueError::Validation(e.to_string()))?;

    state
        .auth
        .register(&request.username, &request.password)
        .await?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// Authenticate and obtain an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ApiError),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let access_token = state
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.token_ttl_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            password: "pw1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short_username = RegisterRequest {
            username: "ab".to_string(),
            password: "pw1".to_string(),
        };
        assert!(short_username.validate().is_err());

        let empty_password = RegisterRequest {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_auth_response_serialization() {
        let response = AuthResponse {
            access_token: "abc.def.ghi".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("access_token"));
        assert!(json.contains("Bearer"));
    }
}
