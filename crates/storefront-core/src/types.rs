//! # Domain Types
//!
//! Catalog record types shared by every layer of the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────┐                    │
//! │  │      Product        │        │     Rating      │                    │
//! │  │  ─────────────────  │        │  ─────────────  │                    │
//! │  │  id (catalog int)   │───────►│  rate (0..5)    │                    │
//! │  │  title              │        │  count          │                    │
//! │  │  price (Money)      │        └─────────────────┘                    │
//! │  │  category, image    │                                               │
//! │  │  sizes?, colors?    │                                               │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the remote catalog and is the only identity a
//! product has. Products are immutable once fetched.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Catalog-assigned product identifier.
pub type ProductId = u64;

// =============================================================================
// Rating
// =============================================================================

/// Aggregate customer rating attached to a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    /// Average score.
    pub rate: f64,

    /// Number of ratings behind the average.
    pub count: u32,
}

// =============================================================================
// Product
// =============================================================================

/// A product as served by the remote catalog.
///
/// ## Wire Shape
/// ```json
/// {
///   "id": 1,
///   "title": "Fjallraven - Foldsack No. 1 Backpack",
///   "price": 109.95,
///   "description": "Your perfect pack for everyday use",
///   "category": "men's clothing",
///   "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
///   "rating": { "rate": 3.9, "count": 120 }
/// }
/// ```
/// `sizes` and `colors` are optional and omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier assigned by the catalog.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price, exact to the cent.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Long-form description for the details screen.
    #[serde(default)]
    pub description: String,

    /// Category used for browsing filters.
    #[serde(default)]
    pub category: String,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub rating: Rating,

    /// Sizes the product can be ordered in, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,

    /// Colors the product can be ordered in, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Product {
    /// Creates a product with the given identity and price and empty
    /// descriptive fields. Catalog records normally arrive through serde;
    /// this is for seeding in-memory catalogs.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
            sizes: None,
            colors: None,
        }
    }

    /// Sets the category (builder style).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the selectable sizes (builder style).
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = Some(sizes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the selectable colors (builder style).
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if the product offers the given size.
    /// Products without a size list accept no size selection.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes
            .as_deref()
            .map_or(false, |sizes| sizes.iter().any(|s| s == size))
    }

    /// Returns true if the product offers the given color.
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors
            .as_deref()
            .map_or(false, |colors| colors.iter().any(|c| c == color))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BACKPACK: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_product_decodes_catalog_record() {
        let product: Product = serde_json::from_str(BACKPACK).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price.cents(), 10995);
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.count, 120);
        assert!((product.rating.rate - 3.9).abs() < f64::EPSILON);
        assert!(product.sizes.is_none());
        assert!(product.colors.is_none());
    }

    #[test]
    fn test_product_with_variants() {
        let json = r#"{
            "id": 2, "title": "Slim Fit T-Shirt", "price": 22.3,
            "description": "", "category": "men's clothing", "image": "",
            "rating": { "rate": 4.1, "count": 259 },
            "sizes": ["S", "M", "L"], "colors": ["red", "black"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.sizes.as_deref(), Some(&["S".to_string(), "M".into(), "L".into()][..]));
        assert!(product.offers_size("M"));
        assert!(!product.offers_size("XL"));
        assert!(product.offers_color("black"));
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let json = r#"{"id": 3, "title": "Broken", "price": -4.5}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_serialize_omits_absent_variants() {
        let product = Product::new(9, "Mug", Money::from_cents(450));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(4.5));
        assert!(json.get("sizes").is_none());
        assert!(json.get("colors").is_none());
    }

    #[test]
    fn test_builders() {
        let product = Product::new(4, "Tee", Money::from_cents(1500))
            .with_category("women's clothing")
            .with_sizes(["S", "M"])
            .with_colors(["blue"]);
        assert_eq!(product.category, "women's clothing");
        assert!(product.offers_size("S"));
        assert!(product.offers_color("blue"));
        assert!(!product.offers_color("red"));
    }
}
