//! Revue Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the revue
//! service:
//! - Account and review models
//! - The closed error taxonomy for domain operations
//! - Pagination types (1-indexed request, counted response)
//! - Collaborator traits for the credential store, review store, and
//!   album metadata gateway
//! - Configuration management

pub mod config;
pub mod page;

pub use config::{AlbumConfig, AppConfig, AuthConfig, ConfigError, DatabaseConfig, ServerConfig};
pub use page::{PageRequest, PageResponse};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for revue operations
///
/// Every domain operation returns one of these variants; the HTTP boundary
/// maps them to status codes. All of them are terminal for the current
/// request and none is fatal to the process.
#[derive(Error, Debug)]
pub enum RevueError {
    #[error("Username is already taken!")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("This user does not exist")]
    UnknownSubject,

    #[error("There is no account with such username!")]
    UnknownUser,

    #[error("There is no review with this id")]
    ReviewNotFound,

    #[error("You are not authorised to edit this review!")]
    NotOwner,

    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Album gateway error: {0}")]
    AlbumGateway(String),
}

pub type Result<T> = std::result::Result<T, RevueError>;

// ============================================================================
// Accounts
// ============================================================================

/// Role granted to an account
///
/// Registration always assigns `User`; `Admin` exists for operational
/// tooling and is never assigned through the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account
///
/// The username is unique and immutable after creation. The password hash
/// is a PHC string produced by the one-way hash function and is never
/// serialized in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,

    pub username: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Non-empty role set, `[Role::User]` by default
    pub roles: Vec<Role>,

    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new account with the default role set
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            roles: vec![Role::User],
            created_at: Utc::now(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

// ============================================================================
// Reviews
// ============================================================================

/// A review record as held by the review store
///
/// `username` is the owning identity, set once at creation; only the owner
/// may change `title`, `content`, or `score`, and only the owner may delete
/// the record. `published_at` is stamped from the server clock at creation
/// and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub album_id: String,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub content: String,
    pub score: i32,
    pub likes: i64,
    pub published_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review owned by the given account, published now
    pub fn new(
        owner_id: Uuid,
        owner_username: impl Into<String>,
        album_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        score: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            album_id: album_id.into(),
            user_id: owner_id,
            username: owner_username.into(),
            title: title.into(),
            content: content.into(),
            score,
            likes: 0,
            published_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

// ============================================================================
// Album metadata
// ============================================================================

/// Descriptive album metadata returned by the gateway
///
/// Purely external data; independent of review state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub release_date: String,
    pub total_tracks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// ============================================================================
// Collaborator traits
// ============================================================================

/// Durable mapping from username to account
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Check whether an account with the username exists
    async fn exists(&self, username: &str) -> Result<bool>;

    /// Persist a new account; fails with `UsernameTaken` on a duplicate
    async fn insert(&self, account: UserAccount) -> Result<UserAccount>;

    /// Look up an account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>>;
}

/// Durable mapping from review id to review record
///
/// Page queries use the store's 0-indexed offset/limit convention, return
/// records ordered by publication time descending, and report the total
/// number of matching records alongside the page slice.
#[async_trait::async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert(&self, review: Review) -> Result<Review>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>>;

    /// Overwrite an existing record
    async fn update(&self, review: Review) -> Result<Review>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn page_by_album(
        &self,
        album_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Review>, u64)>;

    async fn page_by_user(
        &self,
        user_id: Uuid,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Review>, u64)>;
}

/// Remote read-only source of album metadata
///
/// Lookups are synchronous, retryless, and independent per album id; a
/// failure only affects the item being enriched.
#[async_trait::async_trait]
pub trait AlbumInfoGateway: Send + Sync {
    async fn album_info(&self, album_id: &str) -> Result<AlbumInfo>;
}

// ============================================================================
// Tests
// ============================================================================
