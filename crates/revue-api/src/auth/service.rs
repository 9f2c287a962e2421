//! Authentication gate
//!
//! Business logic for registration, login, and per-request authorization.
//! The gate owns no state beyond its credential-store handle and the
//! immutable token configuration injected at startup.

use super::{jwt, password};
use revue_core::{AuthConfig, CredentialStore, Result, RevueError, UserAccount};
use std::sync::Arc;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, config: AuthConfig) -> Self {
        Self {
            credentials,
            config,
        }
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.config.token_ttl_secs
    }

    /// Register a new account
    ///
    /// Fails with `UsernameTaken` when the username exists; otherwise hashes
    /// the password, assigns the default role, and persists the account.
    /// No token is issued on registration.
    pub async fn register(&self, username: &str, raw_password: &str) -> Result<UserAccount> {
        if self.credentials.exists(username).await? {
            return Err(RevueError::UsernameTaken);
        }

        let password_hash = password::hash_password(raw_password)?;
        let account = UserAccount::new(username, password_hash);

        let account = self.credentials.insert(account).await?;
        tracing::info!(username, "account registered");

        Ok(account)
    }

    /// Authenticate and issue a fresh token
    ///
    /// An absent username and a failed hash verification both collapse into
    /// `InvalidCredentials`, so responses carry no username oracle.
    pub async fn login(&self, username: &str, raw_password: &str) -> Result<String> {
        let account = self
            .credentials
            .find_by_username(username)
            .await?
            .ok_or(RevueError::InvalidCredentials)?;

        if !password::verify_password(raw_password, &account.password_hash)? {
            tracing::warn!(username, "failed login attempt");
            return Err(RevueError::InvalidCredentials);
        }

        jwt::issue_token(&self.config, &account.username)
    }

    /// Resolve a presented token to a full account
    ///
    /// `Unauthenticated` when no token is presented, `InvalidToken` /
    /// `ExpiredToken` from validation, `UnknownSubject` when the subject no
    /// longer resolves (the token outlived its account).
    pub async fn authorize(&self, token: Option<&str>) -> Result<UserAccount> {
        let token = token.ok_or(RevueError::Unauthenticated)?;
        let claims = jwt::validate_token(&self.config, token)?;

        self.credentials
            .find_by_username(&claims.sub)
            .await?
            .ok_or(RevueError::UnknownSubject)
    }
}
