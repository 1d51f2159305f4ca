//! # Storefront Configuration
//!
//! Where the catalog lives and how the store talks to the shopper.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CATALOG_URL=http://localhost:3000                       │
//! │     STOREFRONT_REQUEST_TIMEOUT_SECS=10                                 │
//! │     STOREFRONT_NOTIFICATIONS=off                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $STOREFRONT_CONFIG, or                                             │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://fakestoreapi.com, 30 s timeout, notifications on           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! request_timeout_secs = 30   # 0 = no timeout
//! user_agent = "storefront/0.1"
//!
//! [notifications]
//! enabled = true
//! visibility_ms = 3000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

// =============================================================================
// Catalog Settings
// =============================================================================

/// How to reach the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Service root; `/products` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. 0 disables the timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://fakestoreapi.com".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("storefront/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl CatalogSettings {
    /// Returns the timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Parses the base URL and checks its scheme.
    pub fn parsed_base_url(&self) -> CatalogResult<Url> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CatalogError::InvalidUrl(format!(
                "Catalog URL must use http or https, got {}: {}",
                other, self.base_url
            ))),
        }
    }
}

// =============================================================================
// Notification Settings
// =============================================================================

/// Toast behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// How long a toast stays on screen.
    #[serde(default = "default_visibility_ms")]
    pub visibility_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_visibility_ms() -> u64 {
    3000
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            enabled: true,
            visibility_ms: default_visibility_ms(),
        }
    }
}

impl NotificationSettings {
    pub fn visibility(&self) -> Duration {
        Duration::from_millis(self.visibility_ms)
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, `STOREFRONT_CONFIG`, platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CatalogResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CatalogError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| CatalogError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        self.catalog.parsed_base_url()?;

        if self.catalog.user_agent.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "user_agent must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(secs) = lookup("STOREFRONT_REQUEST_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(s) => {
                    debug!(secs = s, "Overriding request timeout from environment");
                    self.catalog.request_timeout_secs = s;
                }
                Err(_) => warn!(value = %secs, "Ignoring non-numeric request timeout"),
            }
        }

        if let Some(flag) = lookup("STOREFRONT_NOTIFICATIONS") {
            match flag.trim().to_lowercase().as_str() {
                "on" | "true" | "1" => self.notifications.enabled = true,
                "off" | "false" | "0" => self.notifications.enabled = false,
                _ => warn!(value = %flag, "Unknown notifications flag in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.catalog.base_url, "https://fakestoreapi.com");
        assert_eq!(config.catalog.request_timeout(), Some(Duration::from_secs(30)));
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.visibility(), Duration::from_millis(3000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let settings = CatalogSettings {
            request_timeout_secs: 0,
            ..CatalogSettings::default()
        };
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.catalog.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));

        config.catalog.base_url = "not a url".into();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));

        config.catalog.base_url = "http://localhost:3000".into();
        assert!(config.validate().is_ok());

        config.catalog.user_agent = "  ".into();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidConfig(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("STOREFRONT_CATALOG_URL", "http://127.0.0.1:8080"),
            ("STOREFRONT_REQUEST_TIMEOUT_SECS", "5"),
            ("STOREFRONT_NOTIFICATIONS", "off"),
        ]));

        assert_eq!(config.catalog.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.catalog.request_timeout_secs, 5);
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("STOREFRONT_REQUEST_TIMEOUT_SECS", "soon"),
            ("STOREFRONT_NOTIFICATIONS", "maybe"),
        ]));
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [catalog]
            base_url = "http://localhost:4000"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.base_url, "http://localhost:4000");
        assert_eq!(config.catalog.request_timeout_secs, 30);
        assert_eq!(config.notifications, NotificationSettings::default());
    }

    #[test]
    fn test_toml_serialization() {
        let config = StorefrontConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[notifications]"));
    }

    #[test]
    fn test_save_then_load_explicit_path() {
        let path = std::env::temp_dir().join(format!(
            "storefront-config-test-{}.toml",
            std::process::id()
        ));
        let mut config = StorefrontConfig::default();
        config.catalog.request_timeout_secs = 12;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: StorefrontConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.catalog.request_timeout_secs, 12);

        std::fs::remove_file(&path).unwrap();
    }
}
