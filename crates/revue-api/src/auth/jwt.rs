//! Token issuance and validation
//!
//! Stateless identity tokens signed with HMAC-SHA256. A token binds a
//! subject (username) to an issued-at time and a fixed expiry horizon;
//! validation is a pure computation over the immutable signing secret.
//! There is no revocation list: a token stays valid until its expiry
//! instant, which is the accepted trade-off for holding no session state.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use revue_core::{AuthConfig, Result, RevueError};
use serde::{Deserialize, Serialize};

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer
    pub iss: String,
    /// Subject - the account's username
    pub sub: String,
    /// Issued at (Unix epoch seconds)
    pub iat: i64,
    /// Expiry (Unix epoch seconds)
    pub exp: i64,
}

/// Issue a signed token for the given subject
pub fn issue_token(config: &AuthConfig, subject: &str) -> Result<String> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        iss: config.issuer.clone(),
        sub: subject.to_string(),
        iat: now,
        exp: now + config.token_ttl_secs as i64,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|_| RevueError::InvalidToken)
}

/// Validate a token and extract its claims
///
/// Fails with `ExpiredToken` once the expiry instant has passed and with
/// `InvalidToken` for a bad signature, wrong issuer, or malformed input.
pub fn validate_token(config: &AuthConfig, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => RevueError::ExpiredToken,
        _ => RevueError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let config = test_config();

        let token = issue_token(&config, "alice").expect("issue failed");
        let claims = validate_token(&config, &token).expect("validate failed");

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, config.issuer);
        assert_eq!(claims.exp - claims.iat, config.token_ttl_secs as i64);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let config = test_config();
        let result = validate_token(&config, "not.a.token");
        assert!(matches!(result, Err(RevueError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuing = test_config();
        let validating = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..Default::default()
        };

        let token = issue_token(&issuing, "alice").unwrap();
        let result = validate_token(&validating, &token);

        assert!(matches!(result, Err(RevueError::InvalidToken)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuing = AuthConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        };
        let validating = test_config();

        let token = issue_token(&issuing, "alice").unwrap();
        let result = validate_token(&validating, &token);

        assert!(matches!(result, Err(RevueError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();

        // Issued two hours ago, expired one hour ago
        let claims = Claims {
            iss: config.issuer.clone(),
            sub: "alice".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let result = validate_token(&config, &token);
        assert!(matches!(result, Err(RevueError::ExpiredToken)));
    }
}
