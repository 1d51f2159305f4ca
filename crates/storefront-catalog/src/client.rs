//! # Catalog Client
//!
//! The store's only outside collaborator: something that can list products
//! and look one up by id.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       HttpCatalog Request Flow                          │
//! │                                                                         │
//! │  fetch_products()          GET {base}/products       ──► [Product]     │
//! │  fetch_product(id)         GET {base}/products/{id}  ──► Product       │
//! │                                                                         │
//! │  transport failure ──► Request      elapsed timeout ──► Timeout        │
//! │  non-2xx status    ──► Status       404 / empty / null ──► NotFound    │
//! │  malformed JSON    ──► Decode                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries. A failed call returns its error once and the caller decides.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use storefront_core::{Product, ProductId};
use tracing::{debug, warn};
use url::Url;

use crate::config::CatalogSettings;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Catalog Source
// =============================================================================

/// A source of catalog records.
///
/// Implemented over HTTP by [`HttpCatalog`] and in memory by
/// [`InMemoryCatalog`](crate::InMemoryCatalog).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the whole catalog in server order.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;

    /// Returns one product, or `CatalogError::NotFound`.
    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product>;
}

// =============================================================================
// HTTP Catalog
// =============================================================================

/// Catalog served by a fakestore-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Builds a client from validated settings.
    pub fn new(settings: &CatalogSettings) -> CatalogResult<Self> {
        let base_url = settings.parsed_base_url()?;
        Self::from_parts(base_url, &settings.user_agent, settings.request_timeout())
    }

    /// Builds a client from already parsed parts. `timeout: None` waits
    /// forever.
    pub fn from_parts(
        base_url: Url,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> CatalogResult<Self> {
        let mut builder = Client::builder().user_agent(user_agent.to_string());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(HttpCatalog {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Returns the service root, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> CatalogResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_text(&self, url: Url) -> CatalogResult<(StatusCode, String)> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Catalog request failed");
            CatalogError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        let url = self.endpoint("products")?;
        debug!(url = %url, "Fetching catalog");

        let (status, body) = self.get_text(url.clone()).await?;
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        let url = self.endpoint(&format!("products/{}", id))?;
        debug!(url = %url, product_id = id, "Fetching product");

        let (status, body) = self.get_text(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // fakestoreapi answers unknown ids with 200 and an empty body.
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(CatalogError::NotFound(id));
        }

        Ok(serde_json::from_str(trimmed)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
