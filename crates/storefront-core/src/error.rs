//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-catalog errors (separate crate)                            │
//! │  └── CatalogError     - Network / decode / config failures             │
//! │                                                                         │
//! │  storefront app errors                                                 │
//! │  └── CheckoutError    - What the checkout view sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutErrors → CheckoutError → View         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A price string or number could not be turned into cents.
    ///
    /// ## When This Occurs
    /// - Catalog record carries a negative price
    /// - Catalog record carries a non-numeric price
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// `field` is the human-readable label shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value does not match the expected pattern.
    ///
    /// `message` is the complete user-facing text (e.g. "Invalid CVV").
    #[error("{message}")]
    InvalidFormat { field: String, message: String },
}

impl ValidationError {
    /// Returns the label of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
