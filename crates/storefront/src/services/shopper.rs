//! The shopper session: cart, wishlist and the active discount code.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use thiserror::Error;
use verde_core::checkout::{CheckoutDetails, CheckoutError, place_order};
use verde_core::order::Order;
use verde_core::pricing::PricingError;
use verde_core::state::{SHOPPER_STATE_KEY, ShopperState};
use verde_core::{
    AppliedDiscount, CartLedger, CartSummary, OrderId, PricingPolicy, Product, ProductId, Wishlist,
};

use crate::persistence::{KeyValueStore, load_state, save_state};

/// Length of a generated order number.
pub const ORDER_NUMBER_LEN: usize = 8;

const ORDER_NUMBER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A size or color the product doesn't come in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{product} is not available in size {size}")]
    Size { product: String, size: String },
    #[error("{product} is not available in color {color}")]
    Color { product: String, color: String },
}

/// Random upper-case alphanumeric order number.
#[must_use]
pub fn generate_order_number() -> OrderId {
    let mut rng = rand::rng();
    let number: String = (0..ORDER_NUMBER_LEN)
        .filter_map(|_| ORDER_NUMBER_CHARSET.choose(&mut rng).copied().map(char::from))
        .collect();
    OrderId::new(number)
}

/// The single shopper this process serves.
pub struct ShopperSession {
    state: ShopperState,
    discount: Option<AppliedDiscount>,
    store: Arc<dyn KeyValueStore>,
}

impl ShopperSession {
    /// Restore the persisted cart and wishlist, or start empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let state: ShopperState = load_state(store.as_ref(), SHOPPER_STATE_KEY);
        tracing::debug!(
            lines = state.cart.len(),
            wishlist = state.wishlist.len(),
            "Shopper state loaded"
        );
        Self {
            state,
            discount: None,
            store,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.state.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.state.wishlist
    }

    #[must_use]
    pub const fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    /// Totals for the current cart under `policy`.
    #[must_use]
    pub fn summary(&self, policy: &PricingPolicy) -> CartSummary {
        policy.summarize(&self.state.cart, self.discount.as_ref())
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Add `quantity` units of a size/color selection. Returns the new line quantity.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` if the product isn't offered in that size or color.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<u32, SelectionError> {
        if !product.offers_size(size) {
            return Err(SelectionError::Size {
                product: product.name.clone(),
                size: size.to_string(),
            });
        }
        if !product.offers_color(color) {
            return Err(SelectionError::Color {
                product: product.name.clone(),
                color: color.to_string(),
            });
        }

        let quantity = self.state.cart.add_item(product, size, color, quantity);
        self.save();
        Ok(quantity)
    }

    /// Drop a line. Returns whether it existed.
    pub fn remove_from_cart(&mut self, product_id: &ProductId, size: &str, color: &str) -> bool {
        let removed = self.state.cart.remove_item(product_id, size, color);
        if removed {
            self.save();
        }
        removed
    }

    /// Set a line's quantity (clamped to 1). Returns whether the line exists.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> bool {
        let updated = self.state.cart.set_quantity(product_id, size, color, quantity);
        if updated {
            self.save();
        }
        updated
    }

    /// Take one unit off a line. Returns the remaining quantity, `None` once removed.
    pub fn decrement(&mut self, product_id: &ProductId, size: &str, color: &str) -> Option<u32> {
        let existed = self.state.cart.get(product_id, size, color).is_some();
        let remaining = self.state.cart.decrement_item(product_id, size, color);
        if existed {
            self.save();
        }
        remaining
    }

    pub fn clear_cart(&mut self) {
        self.state.cart.clear();
        self.save();
    }

    // -------------------------------------------------------------------------
    // Discount
    // -------------------------------------------------------------------------

    /// Redeem a promotional code, replacing any active one.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidDiscountCode` and keeps the current
    /// discount when the code is unknown.
    pub fn apply_discount(
        &mut self,
        policy: &PricingPolicy,
        code: &str,
    ) -> Result<&AppliedDiscount, PricingError> {
        let applied = policy.redeem(code)?;
        Ok(self.discount.insert(applied))
    }

    /// Drop the active discount. Returns whether one was active.
    pub fn remove_discount(&mut self) -> bool {
        self.discount.take().is_some()
    }

    // -------------------------------------------------------------------------
    // Wishlist
    // -------------------------------------------------------------------------

    pub fn add_to_wishlist(&mut self, product_id: ProductId) -> bool {
        let added = self.state.wishlist.add(product_id);
        if added {
            self.save();
        }
        added
    }

    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) -> bool {
        let removed = self.state.wishlist.remove(product_id);
        if removed {
            self.save();
        }
        removed
    }

    /// Flip membership. Returns whether the product is now saved.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        let saved = self.state.wishlist.toggle(product_id);
        self.save();
        saved
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    /// Turn the cart into an order, then clear the cart and discount.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError` for an empty cart or an incomplete form; the
    /// cart is left untouched.
    pub fn checkout(
        &mut self,
        policy: &PricingPolicy,
        details: &CheckoutDetails,
        order_id: OrderId,
        placed_at: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        let summary = self.summary(policy);
        let order = place_order(order_id, details, &self.state.cart, &summary, placed_at)?;

        self.state.cart.clear();
        self.discount = None;
        self.save();
        Ok(order)
    }

    fn save(&self) {
        if let Err(e) = save_state(self.store.as_ref(), SHOPPER_STATE_KEY, &self.state) {
            tracing::warn!(error = %e, "Failed to persist shopper state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use verde_core::{Category, Email, PaymentMethod};

    use super::*;
    use crate::persistence::{JsonFileStore, MemoryStore};

    fn product(id: &str, price: i64) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Product {id}"),
            "slug": format!("product-{id}"),
            "category": Category::Women,
            "price": price.to_string(),
            "sizes": ["S", "M", "L"],
            "colors": ["Red", "Black"],
            "sku": format!("VRD-{id}"),
        }))
        .unwrap()
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            email: Email::parse("priya@example.com").unwrap(),
            first_name: "Priya".to_string(),
            last_name: "Sharma".to_string(),
            phone: "9876543210".to_string(),
            address: "123 Main St".to_string(),
            city: "Mumbai".to_string(),
            state: "MH".to_string(),
            pincode: "400001".to_string(),
            payment_method: PaymentMethod::Upi,
        }
    }

    fn session() -> (ShopperSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ShopperSession::load(store.clone()), store)
    }

    #[test]
    fn test_order_number_shape() {
        let id = generate_order_number();
        assert_eq!(id.as_str().len(), ORDER_NUMBER_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_add_rejects_unknown_options() {
        let (mut session, _) = session();
        let p1 = product("1", 1000);

        assert!(matches!(
            session.add_to_cart(&p1, "XXL", "Red", 1),
            Err(SelectionError::Size { .. })
        ));
        assert!(matches!(
            session.add_to_cart(&p1, "M", "Teal", 1),
            Err(SelectionError::Color { .. })
        ));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_mutations_persist() {
        let (mut session, store) = session();
        let p1 = product("1", 1000);

        session.add_to_cart(&p1, "M", "Red", 2).unwrap();
        session.add_to_wishlist(ProductId::new("4"));

        let reloaded = ShopperSession::load(store);
        assert_eq!(reloaded.cart().item_count(), 2);
        assert!(reloaded.wishlist().contains(&ProductId::new("4")));
    }

    #[test]
    fn test_discount_is_not_stacked_or_persisted() {
        let (mut session, store) = session();
        let policy = PricingPolicy::default();
        session.add_to_cart(&product("1", 1000), "M", "Red", 1).unwrap();

        session.apply_discount(&policy, "verde10").unwrap();
        session.apply_discount(&policy, " VERDE10 ").unwrap();
        assert_eq!(session.summary(&policy).discount, Decimal::from(100));

        assert_eq!(
            session.apply_discount(&policy, "SAVE50").unwrap_err(),
            PricingError::InvalidDiscountCode
        );
        assert!(session.discount().is_some());

        assert!(ShopperSession::load(store).discount().is_none());
        assert!(session.remove_discount());
        assert!(!session.remove_discount());
    }

    #[test]
    fn test_checkout_clears_cart_and_discount() {
        let (mut session, store) = session();
        let policy = PricingPolicy::default();
        session.add_to_cart(&product("1", 1000), "M", "Red", 1).unwrap();
        session.apply_discount(&policy, "VERDE10").unwrap();

        let order = session
            .checkout(&policy, &details(), OrderId::new("ABCD1234"), Utc::now())
            .unwrap();

        // 1000 meets the free shipping threshold; the discount doesn't change that.
        assert_eq!(order.total, Decimal::from(900));
        assert!(session.cart().is_empty());
        assert!(session.discount().is_none());
        assert!(ShopperSession::load(store).cart().is_empty());
    }

    #[test]
    fn test_checkout_below_threshold_pays_shipping() {
        let (mut session, _) = session();
        let policy = PricingPolicy::default();
        session.add_to_cart(&product("2", 500), "S", "Black", 1).unwrap();
        session.apply_discount(&policy, "VERDE10").unwrap();

        let order = session
            .checkout(&policy, &details(), generate_order_number(), Utc::now())
            .unwrap();

        assert_eq!(order.total, Decimal::from(450 + 99));
    }

    #[test]
    fn test_toggle_wishlist_persists_both_ways() {
        let (mut session, store) = session();
        let id = ProductId::new("5");

        assert!(session.toggle_wishlist(id.clone()));
        assert!(ShopperSession::load(store.clone()).wishlist().contains(&id));

        assert!(!session.toggle_wishlist(id.clone()));
        assert!(!ShopperSession::load(store).wishlist().contains(&id));
    }

    #[test]
    fn test_checkout_empty_cart_rejected() {
        let (mut session, _) = session();
        let err = session
            .checkout(
                &PricingPolicy::default(),
                &details(),
                generate_order_number(),
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut session = ShopperSession::load(Arc::new(JsonFileStore::new(&blocker)));
        session.add_to_cart(&product("1", 500), "S", "Black", 1).unwrap();
        assert_eq!(session.cart().item_count(), 1);
    }
}
