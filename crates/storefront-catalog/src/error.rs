//! # Catalog Error Types
//!
//! Error types for remote catalog access and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Status                 │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  NotFound               │ │
//! │  │  ConfigLoad/Save│  │  Unavailable    │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store never shows these messages to the shopper. It logs them and
//! surfaces its own fixed text instead.

use storefront_core::ProductId;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Everything that can go wrong between the store and the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// Catalog base URL does not parse or uses an unsupported scheme.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request could not be sent or the connection broke.
    #[error("Request failed: {0}")]
    Request(String),

    /// The configured request timeout elapsed.
    #[error("Catalog request timed out")]
    Timeout,

    /// The catalog source refused to serve (in-memory failing mode).
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// Non-success HTTP status.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The catalog has no product with this id.
    #[error("Product {0} not found in catalog")]
    NotFound(ProductId),

    /// Body was not the expected JSON.
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            CatalogError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// Returns true if the catalog answered but had nothing for the id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_)
                | CatalogError::InvalidUrl(_)
                | CatalogError::ConfigLoadFailed(_)
                | CatalogError::ConfigSaveFailed(_)
        )
    }
}
