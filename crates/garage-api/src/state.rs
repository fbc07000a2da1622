//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Everything in here is fixed at startup:
//!
//! - **db**: SQLite pool backing users and vehicles
//! - **sessions**: signing/verification keys for session tokens
//! - **enquiry**: registry client; `None` when `MOT_API_KEY` is unset

use garage_core::{VehicleDetails, VehicleId};
use garage_enquiry_client::{EnquiryClient, EnquiryConfig};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::session::SessionKeys;

/// Default SQLite database, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://car_inventory.db";

/// Shortest accepted `JWT_SECRET`, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

// -- Records ------------------------------------------------------------------

/// A stored vehicle as returned to its owner. The owner id is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vehicle {
    #[schema(value_type = i64)]
    pub id: VehicleId,
    #[serde(flatten)]
    pub details: VehicleDetails,
}

impl Vehicle {
    pub fn new(id: VehicleId, details: VehicleDetails) -> Self {
        Self { id, details }
    }
}

// -- Configuration ------------------------------------------------------------

/// Process configuration.
///
/// Custom `Debug` implementation redacts the `jwt_secret` field.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// sqlx connection string for the SQLite database.
    pub database_url: String,
    /// Symmetric key for session tokens.
    pub jwt_secret: Zeroizing<String>,
    /// Registry client configuration. `None` disables `/api/mot`.
    pub enquiry: Option<EnquiryConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .field("enquiry", &self.enquiry)
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes, got {len}")]
    WeakJwtSecret { len: usize },

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),

    #[error("registry configuration: {0}")]
    Enquiry(#[from] garage_enquiry_client::config::ConfigError),
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `DATABASE_URL` (default: `sqlite://car_inventory.db`)
    /// - `JWT_SECRET` (required, at least 32 bytes)
    /// - `MOT_API_KEY`, `MOT_API_URL`, `MOT_TIMEOUT_SECS` (see [`EnquiryConfig::from_lookup`])
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 8080,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = Zeroizing::new(lookup("JWT_SECRET").ok_or(ConfigError::MissingJwtSecret)?);
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakJwtSecret {
                len: jwt_secret.len(),
            });
        }

        let enquiry = match EnquiryConfig::from_lookup(&lookup) {
            Ok(config) => Some(config),
            Err(garage_enquiry_client::config::ConfigError::MissingApiKey) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            enquiry,
        })
    }
}

// -- State --------------------------------------------------------------------

/// Shared state for route handlers. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub sessions: SessionKeys,
    pub enquiry: Option<EnquiryClient>,
}

impl AppState {
    /// State without a registry client.
    pub fn new(db: SqlitePool, sessions: SessionKeys) -> Self {
        Self {
            db,
            sessions,
            enquiry: None,
        }
    }

    /// Attach a registry client.
    pub fn with_enquiry(mut self, client: EnquiryClient) -> Self {
        self.enquiry = Some(client);
        self
    }
}
