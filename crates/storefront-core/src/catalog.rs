//! # Catalog Browsing
//!
//! Category listing and search filtering over a fetched product list.
//!
//! ```text
//! products ──► categories()          ──► ["electronics", "jewelery", ...]
//!          └─► ProductFilter::apply  ──► title ∋ query (any case)
//!                                        AND category == selected (if any)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, ProductId};

/// Returns the distinct categories in the order they first appear.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c == &product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Finds a product in an already fetched list.
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Search box plus category chip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title. Empty matches everything.
    #[serde(default)]
    pub query: String,

    /// Exact category, or `None` for all categories.
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns true if the product passes both conditions.
    pub fn matches(&self, product: &Product) -> bool {
        let title_ok = self.query.is_empty()
            || product
                .title
                .to_lowercase()
                .contains(&self.query.to_lowercase());
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| c == product.category);
        title_ok && category_ok
    }

    /// Keeps the matching products in their original order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Free-function form of [`ProductFilter::apply`].
pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    filter.apply(products)
}
