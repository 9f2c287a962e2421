//! Request authorization middleware
//!
//! Extracts the Bearer token from the Authorization header and resolves it
//! to a full account once, at the boundary. The resolved identity travels
//! through request extensions as `CurrentUser` and is passed explicitly
//! into every protected service call; nothing is held process-wide.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use revue_core::{Role, UserAccount};
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated caller, resolved from the presented token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
}

impl From<UserAccount> for CurrentUser {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            roles: account.roles,
        }
    }
}

/// Pull the token out of `Authorization: Bearer <token>`
///
/// A missing header and a malformed one are both "no token presented";
/// distinguishing them buys the client nothing.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Middleware guarding the protected routes
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers());
    let account = state.auth.authorize(token).await.map_err(|e| {
        tracing::warn!(error = %e, "rejected request token");
        AppError::from(e)
    })?;

    request.extensions_mut().insert(CurrentUser::from(account));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_and_malformed_headers() {
        let empty = HeaderMap::new();
        assert_eq!(bearer_token(&empty), None);

        let mut basic = HeaderMap::new();
        basic.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(bearer_token(&basic), None);
    }
}
