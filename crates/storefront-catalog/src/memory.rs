//! In-memory catalog for seeding stores without a network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use storefront_core::{Product, ProductId};
use tokio::sync::RwLock;
use tracing::debug;

use crate::client::CatalogSource;
use crate::error::{CatalogError, CatalogResult};

/// A fixed product list that can be told to fail.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    failing: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        InMemoryCatalog {
            products: RwLock::new(products),
            failing: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    /// A catalog whose every call fails with `CatalogError::Unavailable`.
    pub fn failing() -> Self {
        let catalog = Self::default();
        catalog.set_failing(true);
        catalog
    }

    /// Switches failing mode on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Replaces the served products.
    pub async fn set_products(&self, products: Vec<Product>) {
        *self.products.write().await = products;
    }

    /// Number of calls served or refused so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin(&self) -> CatalogResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            debug!("In-memory catalog refusing request");
            return Err(CatalogError::Unavailable("in-memory catalog set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        self.begin()?;
        Ok(self.products.read().await.clone())
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        self.begin()?;
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
