//! # Cart and Wishlist
//!
//! The shopping collections the store owns: cart lines and saved products.
//!
//! ## Line Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Line Identity                                 │
//! │                                                                         │
//! │  CartLineKey = (product id, selected size, selected color)             │
//! │                                                                         │
//! │  add (id 7, M, red) ──► no line (7, M, red)  ──► push new line         │
//! │  add (id 7, M, red) ──► line (7, M, red)     ──► quantity += n         │
//! │  add (id 7, L, red) ──► no line (7, L, red)  ──► push new line         │
//! │                                                                         │
//! │  remove / update quantity use the SAME key, so a size-M line is never  │
//! │  touched by an operation aimed at the size-L line.                     │
//! │                                                                         │
//! │  Wishlist identity is the product id alone.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per [`CartLineKey`]
//! - Every line has `quantity >= 1`; setting 0 removes the line
//! - At most one wishlist entry per product id
//! - Both collections keep insertion order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line Key
// =============================================================================

/// Merge identity of a cart line.
///
/// A bare [`ProductId`] converts into a key with no size and no color,
/// which is the key of every line added without a variant selection.
/// A blank selection (`Some("")`) counts as no selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartLineKey {
    pub fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        CartLineKey {
            product_id,
            size: non_blank(size),
            color: non_blank(color),
        }
    }
}

fn non_blank(selection: Option<String>) -> Option<String> {
    selection.filter(|s| !s.trim().is_empty())
}

impl From<ProductId> for CartLineKey {
    fn from(product_id: ProductId) -> Self {
        CartLineKey::new(product_id, None, None)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart: the product plus the shopper's selection.
///
/// The product record is embedded whole (flattened on the wire), so the
/// line keeps rendering the price and title it was added with even if a
/// later catalog fetch changes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,

    pub selected_size: Option<String>,

    pub selected_color: Option<String>,

    /// When this line was first added.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart line.
    pub fn from_product(
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> Self {
        CartItem {
            product: product.clone(),
            quantity,
            selected_size: size,
            selected_color: color,
            added_at: Utc::now(),
        }
    }

    /// Returns the merge identity of this line.
    pub fn key(&self) -> CartLineKey {
        CartLineKey::new(
            self.product.id,
            self.selected_size.clone(),
            self.selected_color.clone(),
        )
    }

    /// Checks this line against a key without allocating.
    pub fn matches(&self, key: &CartLineKey) -> bool {
        self.product.id == key.product_id
            && self.selected_size == key.size
            && self.selected_color == key.color
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What `Cart::add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was increased.
    Merged,
    /// Nothing changed (quantity 0).
    Ignored,
}

/// What `Cart::set_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    Updated,
    Removed,
    NotFound,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product or increases the quantity of the matching line.
    ///
    /// ## Behavior
    /// - Line with the same (id, size, color) exists: quantity increases
    /// - No such line: a new line is appended
    /// - `quantity == 0`: nothing happens, a line never holds 0
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) -> AddOutcome {
        if quantity == 0 {
            return AddOutcome::Ignored;
        }

        let key = CartLineKey::new(product.id, size, color);
        if let Some(item) = self.items.iter_mut().find(|i| i.matches(&key)) {
            item.quantity = item.quantity.saturating_add(quantity);
            return AddOutcome::Merged;
        }

        self.items
            .push(CartItem::from_product(product, quantity, key.size, key.color));
        AddOutcome::Added
    }

    /// Replaces the quantity of the matching line.
    ///
    /// ## Behavior
    /// - `quantity == 0`: removes the line
    /// - Unknown key: nothing happens
    pub fn set_quantity(&mut self, key: &CartLineKey, quantity: u32) -> QuantityOutcome {
        if quantity == 0 {
            return if self.remove_line(key) {
                QuantityOutcome::Removed
            } else {
                QuantityOutcome::NotFound
            };
        }

        match self.items.iter_mut().find(|i| i.matches(key)) {
            Some(item) => {
                item.quantity = quantity;
                QuantityOutcome::Updated
            }
            None => QuantityOutcome::NotFound,
        }
    }

    /// Removes the line with the given key. Returns true if one was removed.
    pub fn remove_line(&mut self, key: &CartLineKey) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| !i.matches(key));
        self.items.len() != initial_len
    }

    /// Removes every line for a product, whatever its size and color.
    /// Returns the number of lines removed.
    pub fn remove_product(&mut self, product_id: ProductId) -> usize {
        let initial_len = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        initial_len - self.items.len()
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the line with the given key.
    pub fn line(&self, key: &CartLineKey) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Returns true if any line holds the product.
    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|i| i.product.id == product_id)
    }

    /// Returns the number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price × quantity over every line.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cart totals summary for the cart and checkout screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    /// No tax or shipping is applied, so this is also the amount charged.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.subtotal(),
        }
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// Products the shopper saved for later, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Wishlist {
    pub items: Vec<Product>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist { items: Vec::new() }
    }

    /// Removes the product if saved, saves it otherwise.
    /// Returns true if the product is saved after the call.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            self.items.retain(|p| p.id != product.id);
            false
        } else {
            self.items.push(product.clone());
            true
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
