//! Revue configuration management
//!
//! Handles configuration from environment variables and TOML files with
//! sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Token issuance and validation
    pub auth: AuthConfig,

    /// Album metadata gateway
    pub album: AlbumConfig,

    /// Database connection
    pub database: DatabaseConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // Auth
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(ttl) = std::env::var("JWT_TTL_SECS") {
            config.auth.token_ttl_secs = ttl.parse().map_err(|_| ConfigError::InvalidValue {
                key: "JWT_TTL_SECS".to_string(),
                value: ttl,
            })?;
        }
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.auth.issuer = issuer;
        }

        // Album gateway
        if let Ok(url) = std::env::var("ALBUM_API_URL") {
            config.album.base_url = url;
        }
        if let Ok(token) = std::env::var("ALBUM_API_TOKEN") {
            config.album.api_token = Some(token);
        }
        if let Ok(market) = std::env::var("ALBUM_MARKET") {
            config.album.market = market;
        }

        // Database
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = Some(url);
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Token configuration
///
/// The signing secret is read once at startup and immutable thereafter;
/// token validation never consults mutable shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for HMAC signing (must be at least 256 bits)
    pub jwt_secret: String,

    /// Token lifetime in seconds (default: 3600 = 1 hour)
    pub token_ttl_secs: u64,

    /// Token issuer identifier
    pub issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-key-change-in-production".to_string(),
            token_ttl_secs: 3600,
            issuer: "revue-api".to_string(),
        }
    }
}

/// Album metadata gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumConfig {
    /// Base URL of the metadata API
    pub base_url: String,

    /// Bearer token for the metadata API
    pub api_token: Option<String>,

    /// Market code appended to album lookups
    pub market: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for AlbumConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spotify.com/v1".to_string(),
            api_token: None,
            market: "PL".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Database configuration
///
/// When no URL is configured the service runs on in-memory stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default env-filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "revue_api=debug,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to read config file {path}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}
