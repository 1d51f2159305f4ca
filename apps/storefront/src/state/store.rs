//! # Product Store
//!
//! The single owner of catalog, cart and wishlist state.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ProductStore State Flow                           │
//! │                                                                         │
//! │  View Action            Store Operation               Snapshot Change   │
//! │  ───────────            ───────────────               ───────────────   │
//! │                                                                         │
//! │  Open store ───────────► fetch_products() ──────────► is_loading, then │
//! │                                                       products / error │
//! │  Tap product ──────────► fetch_product_by_id() ─────► (none)           │
//! │  Add to cart ──────────► add_to_cart() ─────────────► cart line +/=    │
//! │  Stepper ──────────────► update_cart_item_quantity() ► qty = n / remove│
//! │  Trash icon ───────────► remove_from_cart() ────────► line removed     │
//! │  Heart icon ───────────► toggle_wishlist() ─────────► entry +/-        │
//! │  Place order ──────────► place_order() ─────────────► cart cleared     │
//! │                                                                         │
//! │  Every change goes through watch::Sender::send_if_modified, so it is   │
//! │  applied under the channel's write lock and subscribers wake once.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Overlapping `fetch_products` calls are not coordinated. Whichever
//! resolves last writes `products`. A counter of in-flight fetches keeps
//! `is_loading` true until the last one settles.

use std::sync::Arc;
use std::time::Duration;

use storefront_catalog::CatalogSource;
use storefront_core::{AddOutcome, CartLineKey, CartTotals, Product, ProductId, QuantityOutcome};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::notify::{Notification, NotificationSink, DEFAULT_VISIBILITY};
use crate::state::snapshot::StoreSnapshot;

/// Text stored in `StoreSnapshot::error` when the catalog cannot be loaded.
pub const FETCH_PRODUCTS_FAILED: &str = "Failed to fetch products";

const FETCH_PRODUCT_FAILED: &str = "Failed to fetch product details";

// =============================================================================
// Product Store
// =============================================================================

/// Catalog, cart and wishlist state plus the operations on it.
///
/// Construct one per app and share it (`Arc<ProductStore>`) with every
/// screen that needs it. There is no global instance.
pub struct ProductStore {
    pub(super) state: watch::Sender<StoreSnapshot>,
    catalog: Arc<dyn CatalogSource>,
    notifier: Arc<dyn NotificationSink>,
    visibility: Duration,
}

impl ProductStore {
    /// Creates a store with an empty catalog, cart and wishlist.
    pub fn new(catalog: Arc<dyn CatalogSource>, notifier: Arc<dyn NotificationSink>) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        ProductStore {
            state,
            catalog,
            notifier,
            visibility: DEFAULT_VISIBILITY,
        }
    }

    /// Sets how long toasts stay visible (builder style).
    pub fn with_notification_visibility(mut self, visibility: Duration) -> Self {
        self.visibility = visibility;
        self
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// Returns a receiver that sees every snapshot from now on.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    pub fn cart_totals(&self) -> CartTotals {
        CartTotals::from(&self.state.borrow().cart)
    }

    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.state.borrow().wishlist.contains(id)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Loads the whole catalog.
    ///
    /// ## Behavior
    /// - Start: `is_loading = true`, `error = None`
    /// - Success: `products` replaced, loading cleared
    /// - Failure: `error` set to [`FETCH_PRODUCTS_FAILED`], loading cleared,
    ///   `products` untouched, error toast
    ///
    /// Never fails; the outcome is in the returned snapshot.
    pub async fn fetch_products(&self) -> StoreSnapshot {
        let guard = FetchGuard::begin(&self.state);
        debug!("Fetching products");

        match self.catalog.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                guard.finish(|s| s.products = products)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch products");
                let snapshot = guard.finish(|s| s.error = Some(FETCH_PRODUCTS_FAILED.to_string()));
                self.notify(Notification::error("Error", FETCH_PRODUCTS_FAILED));
                snapshot
            }
        }
    }

    /// Looks one product up on the catalog.
    ///
    /// Returns `None` on any failure, including an unknown id. Leaves the
    /// store state alone.
    pub async fn fetch_product_by_id(&self, id: ProductId) -> Option<Product> {
        debug!(product_id = id, "Fetching product details");
        match self.catalog.fetch_product(id).await {
            Ok(product) => Some(product),
            Err(e) => {
                if e.is_not_found() {
                    debug!(product_id = id, "Product not found");
                } else {
                    warn!(product_id = id, error = %e, "Failed to fetch product details");
                }
                self.notify(Notification::error("Error", FETCH_PRODUCT_FAILED));
                None
            }
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds `quantity` of a product with the given selection.
    ///
    /// Merges into the line with the same (id, size, color) if there is one,
    /// otherwise appends a line. A quantity of 0 changes nothing.
    pub fn add_to_cart(
        &self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> StoreSnapshot {
        let mut outcome = AddOutcome::Ignored;
        let snapshot = self.apply(|s| {
            outcome = s.cart.add_item(product, quantity, size, color);
            outcome != AddOutcome::Ignored
        });

        debug!(product_id = product.id, quantity, ?outcome, "add_to_cart");
        match outcome {
            AddOutcome::Merged => {
                self.notify(Notification::success("Updated", "Item quantity updated in cart"))
            }
            AddOutcome::Added => {
                self.notify(Notification::success("Added to Cart", "Item added successfully"))
            }
            AddOutcome::Ignored => {}
        }
        snapshot
    }

    /// Removes the line with exactly this (id, size, color).
    ///
    /// A bare product id addresses the line added without size and color.
    pub fn remove_from_cart(&self, key: impl Into<CartLineKey>) -> StoreSnapshot {
        let key = key.into();
        let mut removed = false;
        let snapshot = self.apply(|s| {
            removed = s.cart.remove_line(&key);
            removed
        });

        debug!(product_id = key.product_id, removed, "remove_from_cart");
        if removed {
            self.notify(Notification::info("Removed", "Item removed from cart"));
        }
        snapshot
    }

    /// Removes every line of a product, whatever its size and color.
    pub fn remove_product_from_cart(&self, product_id: ProductId) -> StoreSnapshot {
        let mut removed = 0;
        let snapshot = self.apply(|s| {
            removed = s.cart.remove_product(product_id);
            removed > 0
        });

        debug!(product_id, removed, "remove_product_from_cart");
        if removed > 0 {
            self.notify(Notification::info("Removed", "Item removed from cart"));
        }
        snapshot
    }

    /// Sets the quantity of one line. 0 removes it; an unknown key does
    /// nothing.
    pub fn update_cart_item_quantity(
        &self,
        key: impl Into<CartLineKey>,
        quantity: u32,
    ) -> StoreSnapshot {
        let key = key.into();
        let mut outcome = QuantityOutcome::NotFound;
        let snapshot = self.apply(|s| {
            outcome = s.cart.set_quantity(&key, quantity);
            outcome != QuantityOutcome::NotFound
        });

        debug!(product_id = key.product_id, quantity, ?outcome, "update_cart_item_quantity");
        match outcome {
            QuantityOutcome::Removed => {
                self.notify(Notification::info("Removed", "Item removed from cart"))
            }
            QuantityOutcome::Updated => {
                self.notify(Notification::success("Updated", "Cart quantity updated"))
            }
            QuantityOutcome::NotFound => {}
        }
        snapshot
    }

    /// Empties the cart. Silent.
    pub fn clear_cart(&self) -> StoreSnapshot {
        debug!("clear_cart");
        self.apply(|s| {
            let had_items = !s.cart.is_empty();
            s.cart.clear();
            had_items
        })
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Saves the product, or un-saves it if already saved.
    pub fn toggle_wishlist(&self, product: &Product) -> StoreSnapshot {
        let mut saved = false;
        let snapshot = self.apply(|s| {
            saved = s.wishlist.toggle(product);
            true
        });

        debug!(product_id = product.id, saved, "toggle_wishlist");
        if saved {
            self.notify(Notification::success("Added", "Item added to wishlist"));
        } else {
            self.notify(Notification::info("Removed", "Item removed from wishlist"));
        }
        snapshot
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(super) fn apply<F>(&self, f: F) -> StoreSnapshot
    where
        F: FnOnce(&mut StoreSnapshot) -> bool,
    {
        apply(&self.state, f)
    }

    pub(super) fn notify(&self, notification: Notification) {
        self.notifier
            .notify(&notification.with_visibility(self.visibility));
    }
}

/// Runs `f` under the channel's write lock and returns the state it left.
/// Subscribers are woken only when `f` reports a change.
fn apply<F>(state: &watch::Sender<StoreSnapshot>, f: F) -> StoreSnapshot
where
    F: FnOnce(&mut StoreSnapshot) -> bool,
{
    let mut after = None;
    state.send_if_modified(|s| {
        let changed = f(s);
        after = Some(s.clone());
        changed
    });
    after.unwrap_or_else(|| state.borrow().clone())
}

// =============================================================================
// Fetch Guard
// =============================================================================

/// Counts one in-flight catalog fetch. Settles the count on drop, so a
/// cancelled fetch cannot leave `is_loading` stuck at true.
struct FetchGuard<'a> {
    state: &'a watch::Sender<StoreSnapshot>,
    armed: bool,
}

impl<'a> FetchGuard<'a> {
    fn begin(state: &'a watch::Sender<StoreSnapshot>) -> Self {
        state.send_modify(StoreSnapshot::begin_fetch);
        FetchGuard { state, armed: true }
    }

    fn finish<F>(mut self, f: F) -> StoreSnapshot
    where
        F: FnOnce(&mut StoreSnapshot),
    {
        self.armed = false;
        apply(self.state, |s| {
            f(s);
            s.settle_fetch();
            true
        })
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Catalog fetch dropped before completion");
            self.state.send_modify(StoreSnapshot::settle_fetch);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storefront_catalog::{CatalogError, CatalogResult, InMemoryCatalog};
    use storefront_core::Money;
    use tokio::sync::Semaphore;

    use crate::notify::{RecordingNotifier, Severity};

    fn product(id: ProductId, cents: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_cents(cents))
            .with_category(if id % 2 == 0 { "even" } else { "odd" })
    }

    fn seed() -> Vec<Product> {
        vec![product(1, 1000), product(2, 2550), product(3, 999)]
    }

    fn store_with(catalog: Arc<dyn CatalogSource>) -> (ProductStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (ProductStore::new(catalog, notifier.clone()), notifier)
    }

    fn store() -> (ProductStore, Arc<RecordingNotifier>) {
        store_with(Arc::new(InMemoryCatalog::new(seed())))
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn last_toast(notifier: &RecordingNotifier) -> (Severity, String, Option<String>) {
        let n = notifier.last().expect("a notification");
        (n.severity, n.title, n.body)
    }

    /// Catalog whose list call waits for a permit.
    struct GatedCatalog {
        gate: Semaphore,
        products: Vec<Product>,
    }

    #[async_trait]
    impl CatalogSource for GatedCatalog {
        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            self.gate
                .acquire()
                .await
                .map_err(|e| CatalogError::Unavailable(e.to_string()))?
                .forget();
            Ok(self.products.clone())
        }

        async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
            Err(CatalogError::NotFound(id))
        }
    }

    async fn wait_for_pending(store: &ProductStore, n: usize) {
        while store.snapshot().pending_fetches != n {
            tokio::task::yield_now().await;
        }
    }

    // ----- catalog -----

    #[tokio::test]
    async fn test_fetch_products_success() {
        let (store, notifier) = store();

        let snapshot = store.fetch_products().await;

        assert_eq!(snapshot.products.len(), 3);
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot, store.snapshot());
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_products_replaces_list() {
        let catalog = Arc::new(InMemoryCatalog::new(seed()));
        let (store, _) = store_with(catalog.clone());
        store.fetch_products().await;

        catalog.set_products(vec![product(4, 500)]).await;
        let snapshot = store.fetch_products().await;

        let ids: Vec<ProductId> = snapshot.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4]);
        assert_eq!(snapshot.categories(), vec!["even".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_products_failure_keeps_products() {
        let catalog = Arc::new(InMemoryCatalog::new(seed()));
        let (store, notifier) = store_with(catalog.clone());
        store.fetch_products().await;

        catalog.set_failing(true);
        let snapshot = store.fetch_products().await;

        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error.as_deref(), Some(FETCH_PRODUCTS_FAILED));
        assert_eq!(snapshot.products.len(), 3);
        assert_eq!(
            last_toast(&notifier),
            (Severity::Error, "Error".to_string(), some("Failed to fetch products"))
        );
    }

    #[tokio::test]
    async fn test_next_fetch_clears_error() {
        let catalog = Arc::new(InMemoryCatalog::failing());
        let (store, _) = store_with(catalog.clone());
        assert!(store.fetch_products().await.error.is_some());

        catalog.set_failing(false);
        catalog.set_products(seed()).await;
        let snapshot = store.fetch_products().await;
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.products.len(), 3);
    }

    #[tokio::test]
    async fn test_overlapping_fetches_keep_loading_until_last() {
        let catalog = Arc::new(GatedCatalog {
            gate: Semaphore::new(0),
            products: seed(),
        });
        let (store, _) = store_with(catalog.clone());
        let store = Arc::new(store);

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_products().await }
        });
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_products().await }
        });
        wait_for_pending(&store, 2).await;
        assert!(store.snapshot().is_loading);

        catalog.gate.add_permits(1);
        wait_for_pending(&store, 1).await;
        assert!(store.snapshot().is_loading);

        catalog.gate.add_permits(1);
        first.await.unwrap();
        second.await.unwrap();

        let snapshot = store.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.products.len(), 3);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_clears_loading() {
        let catalog = Arc::new(GatedCatalog {
            gate: Semaphore::new(0),
            products: seed(),
        });
        let (store, _) = store_with(catalog);
        let store = Arc::new(store);

        let handle = tokio::spawn({
            let store = store.clone();
            async move { store.fetch_products().await }
        });
        wait_for_pending(&store, 1).await;

        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
        assert!(!store.snapshot().is_loading);
        assert!(store.snapshot().products.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_product_by_id() {
        let (store, notifier) = store();

        let found = store.fetch_product_by_id(2).await;
        assert_eq!(found.map(|p| p.id), Some(2));
        assert!(notifier.is_empty());

        assert!(store.fetch_product_by_id(42).await.is_none());
        assert_eq!(
            last_toast(&notifier),
            (Severity::Error, "Error".to_string(), some("Failed to fetch product details"))
        );

        // Never touches the list or the loading flags.
        let snapshot = store.snapshot();
        assert!(snapshot.products.is_empty());
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
    }

    // ----- cart -----

    #[tokio::test]
    async fn test_add_to_cart_twice_merges() {
        let (store, notifier) = store();
        let p = product(1, 1000);

        store.add_to_cart(&p, 1, None, None);
        assert_eq!(
            last_toast(&notifier),
            (Severity::Success, "Added to Cart".to_string(), some("Item added successfully"))
        );

        let snapshot = store.add_to_cart(&p, 1, None, None);
        assert_eq!(snapshot.cart.item_count(), 1);
        assert_eq!(snapshot.cart.items[0].quantity, 2);
        assert_eq!(
            last_toast(&notifier),
            (Severity::Success, "Updated".to_string(), some("Item quantity updated in cart"))
        );
    }

    #[tokio::test]
    async fn test_add_to_cart_different_sizes() {
        let (store, _) = store();
        let p = product(1, 1000).with_sizes(["M", "L"]);

        store.add_to_cart(&p, 1, some("M"), some("red"));
        let snapshot = store.add_to_cart(&p, 1, some("L"), some("red"));

        assert_eq!(snapshot.cart.item_count(), 2);
    }

    #[tokio::test]
    async fn test_add_to_empty_cart_total() {
        let (store, _) = store();
        let snapshot = store.add_to_cart(&product(1, 1000), 2, None, None);

        assert_eq!(snapshot.cart.items[0].product.id, 1);
        assert_eq!(snapshot.cart.items[0].quantity, 2);
        assert_eq!(store.cart_totals().total, Money::from_cents(2000));
        assert_eq!(store.cart_totals().total.to_string(), "$20.00");
    }

    #[tokio::test]
    async fn test_add_zero_is_silent_noop() {
        let (store, notifier) = store();
        let mut rx = store.subscribe();

        let snapshot = store.add_to_cart(&product(1, 1000), 0, None, None);

        assert!(snapshot.cart.is_empty());
        assert!(notifier.is_empty());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_update_quantity_zero_removes() {
        let (store, notifier) = store();
        store.add_to_cart(&product(1, 1000), 3, None, None);

        let snapshot = store.update_cart_item_quantity(1u64, 0);

        assert!(snapshot.cart.is_empty());
        assert_eq!(
            last_toast(&notifier),
            (Severity::Info, "Removed".to_string(), some("Item removed from cart"))
        );
    }

    #[tokio::test]
    async fn test_update_quantity_replaces() {
        let (store, notifier) = store();
        store.add_to_cart(&product(1, 1000), 3, None, None);

        let snapshot = store.update_cart_item_quantity(1u64, 5);

        assert_eq!(snapshot.cart.items[0].quantity, 5);
        assert_eq!(
            last_toast(&notifier),
            (Severity::Success, "Updated".to_string(), some("Cart quantity updated"))
        );
    }

    #[tokio::test]
    async fn test_update_unknown_line_is_silent() {
        let (store, notifier) = store();
        store.add_to_cart(&product(1, 1000), 1, some("M"), None);
        notifier.drain();

        let snapshot = store.update_cart_item_quantity(1u64, 9);

        assert_eq!(snapshot.cart.items[0].quantity, 1);
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn test_remove_from_cart_matches_selection() {
        let (store, notifier) = store();
        let p = product(1, 1000);
        store.add_to_cart(&p, 1, some("M"), None);
        store.add_to_cart(&p, 1, some("L"), None);
        notifier.drain();

        // No line without size: nothing happens.
        let snapshot = store.remove_from_cart(1u64);
        assert_eq!(snapshot.cart.item_count(), 2);
        assert!(notifier.is_empty());

        let snapshot = store.remove_from_cart(CartLineKey::new(1, some("M"), None));
        assert_eq!(snapshot.cart.item_count(), 1);
        assert_eq!(snapshot.cart.items[0].selected_size.as_deref(), Some("L"));
        assert_eq!(notifier.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_product_from_cart_drops_all_variants() {
        let (store, notifier) = store();
        let p = product(1, 1000);
        store.add_to_cart(&p, 1, some("M"), None);
        store.add_to_cart(&p, 1, some("L"), None);
        store.add_to_cart(&product(2, 500), 1, None, None);

        let snapshot = store.remove_product_from_cart(1);

        assert_eq!(snapshot.cart.item_count(), 1);
        assert_eq!(snapshot.cart.items[0].product.id, 2);
        assert_eq!(last_toast(&notifier).1, "Removed");
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let (store, notifier) = store();
        store.add_to_cart(&product(1, 1000), 1, None, None);
        store.add_to_cart(&product(2, 1000), 1, None, None);
        let before = notifier.len();

        let snapshot = store.clear_cart();

        assert!(snapshot.cart.is_empty());
        assert_eq!(notifier.len(), before);
    }

    // ----- wishlist -----

    #[tokio::test]
    async fn test_toggle_wishlist_twice_restores() {
        let (store, notifier) = store();
        let p = product(5, 100);

        let snapshot = store.toggle_wishlist(&p);
        assert_eq!(snapshot.wishlist.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5]);
        assert!(store.is_in_wishlist(5));
        assert_eq!(
            last_toast(&notifier),
            (Severity::Success, "Added".to_string(), some("Item added to wishlist"))
        );

        let snapshot = store.toggle_wishlist(&p);
        assert!(snapshot.wishlist.is_empty());
        assert!(!store.is_in_wishlist(5));
        assert_eq!(
            last_toast(&notifier),
            (Severity::Info, "Removed".to_string(), some("Item removed from wishlist"))
        );
    }

    // ----- subscriptions -----

    #[tokio::test]
    async fn test_subscribers_see_each_mutation() {
        let (store, _) = store();
        let mut rx = store.subscribe();

        let returned = store.add_to_cart(&product(1, 1000), 1, None, None);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), returned);

        let returned = store.toggle_wishlist(&product(2, 500));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), returned);
        assert!(rx.borrow().is_in_wishlist(2));

        let returned = store.fetch_products().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), returned);
        assert_eq!(rx.borrow().categories(), vec!["odd", "even"]);
    }

    #[tokio::test]
    async fn test_notification_visibility_is_applied() {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = ProductStore::new(Arc::new(InMemoryCatalog::new(seed())), notifier.clone())
            .with_notification_visibility(Duration::from_millis(1500));

        store.toggle_wishlist(&product(1, 100));

        assert_eq!(notifier.last().map(|n| n.visibility), Some(Duration::from_millis(1500)));
    }
}
