//! # Validation Module
//!
//! Field validators behind the checkout form rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout view                                                │
//! │  └── Shows the message under each input                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CheckoutForm::validate (checkout.rs)                         │
//! │  └── Runs every field, collects one error per field                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── validate_required: blank after trimming → "X is required"         │
//! │  └── format checks: email, card number, expiry, CVV                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Format checks run on the raw input, not the trimmed one. Only the
//! card number has its whitespace stripped first.
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_cvv, validate_required};
//!
//! assert!(validate_required("City", "Springfield").is_ok());
//! assert!(validate_cvv("123").is_ok());
//! assert!(validate_cvv("12a").is_err());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Patterns
// =============================================================================

// Unanchored: "a@b.c" anywhere in the input is enough.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

static CARD_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{16}$").expect("card pattern is valid"));

static EXPIRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("expiry pattern is valid")
});

static CVV_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,4}$").expect("cvv pattern is valid"));

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Fails with "`label` is required" when the value is blank after trimming.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_required;
///
/// let err = validate_required("Full name", "   ").unwrap_err();
/// assert_eq!(err.to_string(), "Full name is required");
/// ```
pub fn validate_required(label: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: label.to_string(),
        });
    }
    Ok(())
}

/// Loose email shape check: something, `@`, something, `.`, something.
pub fn validate_email(value: &str) -> ValidationResult<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("Email", "Invalid email format"))
    }
}

/// Exactly 16 digits once all whitespace is removed, so "4242 4242 4242 4242"
/// passes.
pub fn validate_card_number(value: &str) -> ValidationResult<()> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if CARD_NUMBER_RE.is_match(&digits) {
        Ok(())
    } else {
        Err(invalid("Card number", "Invalid card number"))
    }
}

/// `MM/YY` with a month from 01 to 12. The date is not compared with today.
pub fn validate_expiry(value: &str) -> ValidationResult<()> {
    if EXPIRY_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("Expiry date", "Invalid expiry date (MM/YY)"))
    }
}

/// Three or four digits.
pub fn validate_cvv(value: &str) -> ValidationResult<()> {
    if CVV_RE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("CVV", "Invalid CVV"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
