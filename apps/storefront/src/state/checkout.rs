//! Order placement: the one caller of "clear the cart" in the checkout flow.

use storefront_core::{CheckoutForm, OrderConfirmation, ShippingAddress};
use tracing::{info, warn};

use crate::error::CheckoutError;
use crate::notify::Notification;
use crate::state::store::ProductStore;

impl ProductStore {
    /// Validates the form, freezes the cart into a confirmation and empties
    /// the cart.
    ///
    /// ## Order of Checks
    /// 1. Form fields (all failures reported together, error toast)
    /// 2. Cart not empty
    ///
    /// Confirmation and clear happen in one state update, so the confirmed
    /// items are exactly the ones removed.
    pub fn place_order(&self, form: &CheckoutForm) -> Result<OrderConfirmation, CheckoutError> {
        if let Err(errors) = form.validate() {
            let fields: Vec<_> = errors.fields().collect();
            warn!(?fields, "Checkout form rejected");
            self.notify(Notification::error("Error", "Please fill in all required fields"));
            return Err(CheckoutError::Invalid(errors));
        }

        let address = ShippingAddress::from(form);
        let mut confirmation = None;
        self.apply(|s| {
            if s.cart.is_empty() {
                return false;
            }
            confirmation = Some(OrderConfirmation::new(&s.cart, address));
            s.cart.clear();
            true
        });

        let confirmation = confirmation.ok_or_else(|| {
            warn!("Checkout attempted with an empty cart");
            CheckoutError::EmptyCart
        })?;

        info!(
            order_id = %confirmation.order_id,
            total = %confirmation.total,
            lines = confirmation.items.len(),
            "Order placed"
        );
        self.notify(Notification::success(
            "Order Placed Successfully",
            format!("Order ID: {}", confirmation.order_id),
        ));
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use storefront_catalog::InMemoryCatalog;
    use storefront_core::{CheckoutField, Money, Product};

    use super::*;
    use crate::notify::{RecordingNotifier, Severity};

    fn store() -> (ProductStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = ProductStore::new(Arc::new(InMemoryCatalog::default()), notifier.clone());
        (store, notifier)
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "555-0100".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            zip_code: "12345".into(),
            card_number: "4242424242424242".into(),
            expiry_date: "12/29".into(),
            cvv: "321".into(),
        }
    }

    #[test]
    fn test_place_order_clears_cart_and_returns_total() {
        let (store, notifier) = store();
        store.add_to_cart(&Product::new(1, "Backpack", Money::from_cents(1000)), 2, None, None);
        store.add_to_cart(&Product::new(2, "Mug", Money::from_cents(450)), 1, None, None);

        let confirmation = store.place_order(&valid_form()).unwrap();

        assert_eq!(confirmation.total, Money::from_cents(2450));
        assert_eq!(confirmation.items.len(), 2);
        assert_eq!(confirmation.shipping_address.full_name, "Jane Doe");
        assert!(store.snapshot().cart.is_empty());

        let toast = notifier.last().unwrap();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.title, "Order Placed Successfully");
        assert_eq!(toast.body, Some(format!("Order ID: {}", confirmation.order_id)));
    }

    #[test]
    fn test_invalid_form_keeps_cart() {
        let (store, notifier) = store();
        store.add_to_cart(&Product::new(1, "Backpack", Money::from_cents(1000)), 1, None, None);

        let form = CheckoutForm {
            cvv: "1".into(),
            ..valid_form()
        };
        let err = store.place_order(&form).unwrap_err();

        assert_eq!(err.field_message(CheckoutField::Cvv).as_deref(), Some("Invalid CVV"));
        assert_eq!(store.snapshot().cart.item_count(), 1);

        let toast = notifier.last().unwrap();
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(toast.body.as_deref(), Some("Please fill in all required fields"));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let (store, _) = store();
        let err = store.place_order(&valid_form()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_form_is_checked_before_cart() {
        let (store, _) = store();
        let err = store.place_order(&CheckoutForm::default()).unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(_)));
    }
}
