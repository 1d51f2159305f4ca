//! # Storefront App Library
//!
//! The state container behind the storefront screens, plus the wiring that
//! builds it from configuration.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (tracing, store wiring)
//! ├── main.rs         ◄─── `storefront` binary
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   ├── store.rs    ◄─── ProductStore: catalog, cart, wishlist ops
//! │   ├── snapshot.rs ◄─── StoreSnapshot handed to subscribers
//! │   └── checkout.rs ◄─── place_order
//! ├── notify.rs       ◄─── Notification sink (toasts)
//! └── error.rs        ◄─── CheckoutError, AppError
//! ```
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Construction                                 │
//! │                                                                         │
//! │  StorefrontConfig ──► HttpCatalog::new(&config.catalog)                │
//! │        │                        │                                       │
//! │        │ notifications.enabled  │ Arc<dyn CatalogSource>                │
//! │        ▼                        ▼                                       │
//! │  TracingNotifier / NoOp ──► ProductStore::new(catalog, notifier)       │
//! │                               .with_notification_visibility(..)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod notify;
pub mod state;

use std::sync::Arc;

use storefront_catalog::{HttpCatalog, StorefrontConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use error::{AppError, AppResult, CheckoutError};
pub use notify::{Notification, NotificationSink, NoOpNotifier, RecordingNotifier, Severity, TracingNotifier};
pub use state::{ProductStore, StoreSnapshot};

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,reqwest=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_app=trace` - Trace the store only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Builds a store backed by the HTTP catalog described in `config`.
pub fn build_store(config: &StorefrontConfig) -> AppResult<ProductStore> {
    let catalog = HttpCatalog::new(&config.catalog)?;
    debug!(base_url = %catalog.base_url(), "Catalog client ready");

    let notifier: Arc<dyn NotificationSink> = if config.notifications.enabled {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(NoOpNotifier)
    };

    Ok(ProductStore::new(Arc::new(catalog), notifier)
        .with_notification_visibility(config.notifications.visibility()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_store_from_default_config() {
        let store = build_store(&StorefrontConfig::default()).unwrap();
        let snapshot = store.snapshot();
        assert!(snapshot.products.is_empty());
        assert!(!snapshot.is_loading);
    }

    #[test]
    fn test_build_store_rejects_bad_url() {
        let mut config = StorefrontConfig::default();
        config.catalog.base_url = "mailto:shop@example.com".into();
        assert!(matches!(build_store(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
