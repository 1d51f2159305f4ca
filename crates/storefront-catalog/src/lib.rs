//! # storefront-catalog: Remote Catalog Access
//!
//! Everything between the store and the product catalog service, plus the
//! storefront configuration that says where that service lives.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Access Layer                              │
//! │                                                                         │
//! │   ProductStore (apps/storefront)                                       │
//! │        │  Arc<dyn CatalogSource>                                       │
//! │        ▼                                                                │
//! │   ┌──────────────────────┐        ┌──────────────────────┐             │
//! │   │     HttpCatalog      │        │   InMemoryCatalog    │             │
//! │   │  reqwest, timeout,   │        │  seeded Vec<Product> │             │
//! │   │  status → error map  │        │  optional fail mode  │             │
//! │   └──────────┬───────────┘        └──────────────────────┘             │
//! │              │ GET /products, /products/{id}                            │
//! │              ▼                                                          │
//! │   fakestore-compatible JSON API                                        │
//! │                                                                         │
//! │   StorefrontConfig: TOML file + STOREFRONT_* env → CatalogSettings     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`client`] - `CatalogSource` trait and the reqwest-backed `HttpCatalog`
//! - [`memory`] - `InMemoryCatalog`
//! - [`config`] - `StorefrontConfig` loading, env overrides, validation
//! - [`error`] - `CatalogError` and `CatalogResult`
//!
//! ## Usage
//! ```rust,no_run
//! use storefront_catalog::{CatalogSource, HttpCatalog, StorefrontConfig};
//!
//! # async fn run() -> storefront_catalog::CatalogResult<()> {
//! let config = StorefrontConfig::load(None)?;
//! let catalog = HttpCatalog::new(&config.catalog)?;
//! let products = catalog.fetch_products().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod config;
pub mod error;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{CatalogSource, HttpCatalog};
pub use config::{CatalogSettings, NotificationSettings, StorefrontConfig};
pub use error::{CatalogError, CatalogResult};
pub use memory::InMemoryCatalog;
