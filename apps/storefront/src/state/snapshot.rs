//! Immutable view of the store after a mutation.

use serde::Serialize;
use storefront_core::catalog::{self, ProductFilter};
use storefront_core::{Cart, CartTotals, Product, ProductId, Wishlist};
use ts_rs::TS;

/// Everything a screen needs to render.
///
/// Subscribers get a fresh copy after every change; nothing they do to it
/// reaches the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Catalog in server order, replaced wholesale on each successful fetch.
    pub products: Vec<Product>,

    pub cart: Cart,

    pub wishlist: Wishlist,

    /// True while at least one catalog fetch is in flight.
    pub is_loading: bool,

    /// Set by the most recent failed catalog fetch, cleared when a new
    /// fetch starts.
    pub error: Option<String>,

    #[serde(skip)]
    #[ts(skip)]
    pub(crate) pending_fetches: usize,
}

impl StoreSnapshot {
    /// Distinct categories of the loaded catalog, first-seen order.
    pub fn categories(&self) -> Vec<String> {
        catalog::categories(&self.products)
    }

    /// Loaded products passing the filter, in catalog order.
    pub fn filtered(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter.apply(&self.products)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        catalog::find_product(&self.products, id)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }

    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.wishlist.contains(id)
    }

    /// Marks one more catalog fetch as started.
    pub(crate) fn begin_fetch(&mut self) {
        self.pending_fetches += 1;
        self.is_loading = true;
        self.error = None;
    }

    /// Marks one catalog fetch as settled.
    pub(crate) fn settle_fetch(&mut self) {
        self.pending_fetches = self.pending_fetches.saturating_sub(1);
        self.is_loading = self.pending_fetches > 0;
    }
}
