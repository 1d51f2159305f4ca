//! # App Error Types
//!
//! Errors the storefront app hands back to its callers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Catalog fetch failed ──► CatalogError ──► logged, stored as fixed     │
//! │                                            text in snapshot.error,     │
//! │                                            toast. NEVER returned.      │
//! │                                                                         │
//! │  Checkout rejected    ──► CheckoutError ──► returned to the view       │
//! │                            ├── EmptyCart                               │
//! │                            └── Invalid(CheckoutErrors) per field       │
//! │                                                                         │
//! │  Startup failed       ──► AppError ──► binary exits non-zero           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_catalog::CatalogError;
use storefront_core::{CheckoutErrors, CheckoutField};
use thiserror::Error;

/// Why `place_order` refused to place an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The form has at least one failing field.
    #[error(transparent)]
    Invalid(#[from] CheckoutErrors),

    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,
}

impl CheckoutError {
    /// Message for one form input, if the form was rejected for it.
    pub fn field_message(&self, field: CheckoutField) -> Option<String> {
        match self {
            CheckoutError::Invalid(errors) => errors.message(field),
            CheckoutError::EmptyCart => None,
        }
    }
}

/// Startup and wiring failures of the app itself.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[source] CatalogError),

    /// The HTTP catalog client could not be built.
    #[error("Catalog client error: {0}")]
    Catalog(#[source] CatalogError),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        if err.is_config_error() {
            AppError::Config(err)
        } else {
            AppError::Catalog(err)
        }
    }
}

/// Result type for app wiring.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::CheckoutForm;

    #[test]
    fn test_invalid_form_message() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        let err = CheckoutError::from(errors);
        assert_eq!(err.to_string(), "Please fill in all required fields");
        assert_eq!(
            err.field_message(CheckoutField::Email).as_deref(),
            Some("Email is required")
        );
        assert_eq!(CheckoutError::EmptyCart.field_message(CheckoutField::Email), None);
    }

    #[test]
    fn test_catalog_error_classification() {
        let err: AppError = CatalogError::InvalidUrl("ftp://x".into()).into();
        assert!(matches!(err, AppError::Config(_)));

        let err: AppError = CatalogError::Request("tls backend".into()).into();
        assert!(matches!(err, AppError::Catalog(_)));
    }
}
