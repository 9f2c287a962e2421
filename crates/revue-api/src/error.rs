//! API error handling
//!
//! Maps the closed domain error set onto transport responses. Every domain
//! error is terminal for its request; the mapping here is the only place
//! status codes are decided.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use revue_core::RevueError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error wrapper carrying a domain error to the boundary
#[derive(Debug)]
pub struct AppError(pub RevueError);

impl From<RevueError> for AppError {
    fn from(err: RevueError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        let (status, code) = match &self.0 {
            RevueError::UsernameTaken => (StatusCode::BAD_REQUEST, "USERNAME_TAKEN"),
            RevueError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION"),
            RevueError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            RevueError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            RevueError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            RevueError::ExpiredToken => (StatusCode::UNAUTHORIZED, "EXPIRED_TOKEN"),
            RevueError::UnknownSubject => (StatusCode::UNAUTHORIZED, "UNKNOWN_SUBJECT"),
            RevueError::NotOwner => (StatusCode::FORBIDDEN, "NOT_OWNER"),
            RevueError::UnknownUser => (StatusCode::NOT_FOUND, "UNKNOWN_USER"),
            RevueError::ReviewNotFound => (StatusCode::NOT_FOUND, "REVIEW_NOT_FOUND"),
            RevueError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            RevueError::AlbumGateway(_) => (StatusCode::BAD_GATEWAY, "ALBUM_GATEWAY_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        }

        (status, Json(ApiError::new(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: RevueError) -> StatusCode {
        AppError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(RevueError::UsernameTaken), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(RevueError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(RevueError::ExpiredToken), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(RevueError::NotOwner), StatusCode::FORBIDDEN);
        assert_eq!(status_of(RevueError::ReviewNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(RevueError::UnknownUser), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(RevueError::Store("down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(RevueError::AlbumGateway("timeout".to_string())),
            StatusCode::BAD_GATEWAY
        );
    }
}
