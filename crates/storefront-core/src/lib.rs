//! # storefront-core: Pure Domain Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the catalog,
//! cart, wishlist and checkout rules as plain data and pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile views (out of this repo)                 │   │
//! │  │   Home ──► Store ──► Details ──► Cart ──► Checkout ──► Success  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots / notifications              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ProductStore (apps/storefront)                  │   │
//! │  │   fetch_products, add_to_cart, toggle_wishlist, place_order    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  money  │ │   cart   │ │ catalog │ │checkout │ │   │
//! │  │   │ Product │ │  Money  │ │ CartItem │ │ filter  │ │  form   │ │   │
//! │  │   │ Rating  │ │         │ │ Wishlist │ │ search  │ │  order  │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog record types (Product, Rating)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart lines, merge identity, totals, wishlist
//! - [`catalog`] - Category listing and product filtering
//! - [`checkout`] - Checkout form validation and order confirmation
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validators shared by the form rules
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product};
//!
//! let product = Product::new(1, "Backpack", Money::from_cents(1000));
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product, 2, None, None);
//!
//! assert_eq!(cart.subtotal().cents(), 2000); // $20.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::{AddOutcome, Cart, CartItem, CartLineKey, CartTotals, QuantityOutcome, Wishlist};
pub use catalog::{categories, ProductFilter};
pub use checkout::{CheckoutErrors, CheckoutField, CheckoutForm, OrderConfirmation, ShippingAddress};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
