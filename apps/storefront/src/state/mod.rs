//! # State Module
//!
//! The storefront's in-memory state and every operation that changes it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     ProductStore (store.rs)                      │  │
//! │  │                                                                  │  │
//! │  │  watch::Sender<StoreSnapshot> ───subscribe()──► screens          │  │
//! │  │  Arc<dyn CatalogSource>        (HTTP or in-memory)               │  │
//! │  │  Arc<dyn NotificationSink>     (toasts)                          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │           │                                 │                           │
//! │           ▼                                 ▼                           │
//! │  ┌──────────────────┐              ┌──────────────────┐                │
//! │  │  StoreSnapshot   │              │  place_order     │                │
//! │  │  (snapshot.rs)   │              │  (checkout.rs)   │                │
//! │  │  products, cart, │              │  form → order,   │                │
//! │  │  wishlist, flags │              │  cart cleared    │                │
//! │  └──────────────────┘              └──────────────────┘                │
//! │                                                                         │
//! │  THREAD SAFETY: ProductStore is Send + Sync; share it as Arc.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod checkout;
mod snapshot;
mod store;

pub use snapshot::StoreSnapshot;
pub use store::{ProductStore, FETCH_PRODUCTS_FAILED};
