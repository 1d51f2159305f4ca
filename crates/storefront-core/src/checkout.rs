//! # Checkout
//!
//! Checkout form rules and the confirmation produced by a placed order.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Flow                                    │
//! │                                                                         │
//! │  CheckoutForm ──► validate() ──┬── Err(CheckoutErrors)                 │
//! │                                │     one message per failing field     │
//! │                                │                                        │
//! │                                └── Ok ──► OrderConfirmation::new       │
//! │                                           ├── order_id (random)        │
//! │                                           ├── total + items (frozen)   │
//! │                                           └── shipping address         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment fields are only checked for shape. Nothing here charges a card.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartItem};
use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_card_number, validate_cvv, validate_email, validate_expiry, validate_required,
};

// =============================================================================
// Form
// =============================================================================

/// The inputs of the checkout screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    FullName,
    Email,
    Phone,
    Address,
    City,
    ZipCode,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl CheckoutField {
    pub const ALL: [CheckoutField; 9] = [
        CheckoutField::FullName,
        CheckoutField::Email,
        CheckoutField::Phone,
        CheckoutField::Address,
        CheckoutField::City,
        CheckoutField::ZipCode,
        CheckoutField::CardNumber,
        CheckoutField::ExpiryDate,
        CheckoutField::Cvv,
    ];

    /// Label used in "X is required".
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutField::FullName => "Full name",
            CheckoutField::Email => "Email",
            CheckoutField::Phone => "Phone number",
            CheckoutField::Address => "Address",
            CheckoutField::City => "City",
            CheckoutField::ZipCode => "ZIP code",
            CheckoutField::CardNumber => "Card number",
            CheckoutField::ExpiryDate => "Expiry date",
            CheckoutField::Cvv => "CVV",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the shopper typed into the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    /// Returns the raw value of one field.
    pub fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::FullName => &self.full_name,
            CheckoutField::Email => &self.email,
            CheckoutField::Phone => &self.phone,
            CheckoutField::Address => &self.address,
            CheckoutField::City => &self.city,
            CheckoutField::ZipCode => &self.zip_code,
            CheckoutField::CardNumber => &self.card_number,
            CheckoutField::ExpiryDate => &self.expiry_date,
            CheckoutField::Cvv => &self.cvv,
        }
    }

    /// Checks one field: required first, then its format rule if any.
    pub fn validate_field(&self, field: CheckoutField) -> Result<(), ValidationError> {
        let value = self.value(field);
        validate_required(field.label(), value)?;
        match field {
            CheckoutField::Email => validate_email(value),
            CheckoutField::CardNumber => validate_card_number(value),
            CheckoutField::ExpiryDate => validate_expiry(value),
            CheckoutField::Cvv => validate_cvv(value),
            _ => Ok(()),
        }
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), CheckoutErrors> {
        let errors: BTreeMap<_, _> = CheckoutField::ALL
            .iter()
            .filter_map(|&field| self.validate_field(field).err().map(|e| (field, e)))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckoutErrors { errors })
        }
    }
}

/// Per-field failures of a checkout form. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields")]
pub struct CheckoutErrors {
    errors: BTreeMap<CheckoutField, ValidationError>,
}

impl CheckoutErrors {
    pub fn get(&self, field: CheckoutField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Message to show under an input, if that input failed.
    pub fn message(&self, field: CheckoutField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn fields(&self) -> impl Iterator<Item = CheckoutField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// Where the order ships. Taken from the form; payment fields are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

impl From<&CheckoutForm> for ShippingAddress {
    fn from(form: &CheckoutForm) -> Self {
        ShippingAddress {
            full_name: form.full_name.trim().to_string(),
            address: form.address.trim().to_string(),
            city: form.city.trim().to_string(),
            zip_code: form.zip_code.trim().to_string(),
        }
    }
}

/// Receipt for a placed order, shown on the success screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Random id, 32 lowercase hex characters.
    pub order_id: String,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub total: Money,

    /// Cart lines as they were when the order was placed.
    pub items: Vec<CartItem>,

    pub shipping_address: ShippingAddress,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Freezes the cart into a confirmation with a fresh order id.
    pub fn new(cart: &Cart, shipping_address: ShippingAddress) -> Self {
        OrderConfirmation {
            order_id: Uuid::new_v4().simple().to_string(),
            total: cart.subtotal(),
            items: cart.items.clone(),
            shipping_address,
            placed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
