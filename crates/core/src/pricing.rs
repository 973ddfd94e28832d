//! Checkout arithmetic over a cart: shipping, promotional discount, grand total.
//!
//! ```text
//! shipping    = 0 if subtotal >= threshold else flat fee
//! discount    = subtotal * percent / 100   (when a code is active)
//! grand total = subtotal - discount + shipping
//! ```
//!
//! Shipping is decided on the pre-discount subtotal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLedger;

/// Subtotal at which shipping becomes free.
pub const SHIPPING_THRESHOLD: i64 = 999;

/// Flat shipping fee below the threshold.
pub const SHIPPING_COST: i64 = 99;

/// The single promotional code the store accepts.
pub const DISCOUNT_CODE: &str = "VERDE10";

/// Percentage taken off the subtotal by [`DISCOUNT_CODE`].
pub const DISCOUNT_PERCENT: i64 = 10;

/// Errors from pricing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid discount code")]
    InvalidDiscountCode,
}

/// A redeemed promotional code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// Canonical (upper-case) code.
    pub code: String,
    /// Percentage off the subtotal.
    pub percent: Decimal,
}

impl AppliedDiscount {
    /// Discount amount for a given subtotal.
    #[must_use]
    pub fn amount_for(&self, subtotal: Decimal) -> Decimal {
        subtotal * self.percent / Decimal::ONE_HUNDRED
    }
}

/// Shipping and promotion rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    pub shipping_threshold: Decimal,
    pub shipping_cost: Decimal,
    pub discount_code: String,
    pub discount_percent: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            shipping_threshold: Decimal::from(SHIPPING_THRESHOLD),
            shipping_cost: Decimal::from(SHIPPING_COST),
            discount_code: DISCOUNT_CODE.to_string(),
            discount_percent: Decimal::from(DISCOUNT_PERCENT),
        }
    }
}

impl PricingPolicy {
    /// Shipping fee for a pre-discount subtotal. The threshold itself ships free.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_cost
        }
    }

    /// Validate a promotional code, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidDiscountCode` for anything but the store's code.
    pub fn redeem(&self, code: &str) -> Result<AppliedDiscount, PricingError> {
        if code.trim().eq_ignore_ascii_case(&self.discount_code) {
            Ok(AppliedDiscount {
                code: self.discount_code.to_ascii_uppercase(),
                percent: self.discount_percent,
            })
        } else {
            Err(PricingError::InvalidDiscountCode)
        }
    }

    /// Compute every figure the cart and checkout pages show.
    #[must_use]
    pub fn summarize(&self, cart: &CartLedger, discount: Option<&AppliedDiscount>) -> CartSummary {
        let subtotal = cart.total();
        let shipping = self.shipping_for(subtotal);
        let discount_amount = discount.map_or(Decimal::ZERO, |d| d.amount_for(subtotal));
        let free_shipping_remaining =
            (subtotal < self.shipping_threshold).then(|| self.shipping_threshold - subtotal);

        CartSummary {
            item_count: cart.item_count(),
            subtotal,
            discount: discount_amount,
            discount_code: discount.map(|d| d.code.clone()),
            shipping,
            grand_total: subtotal - discount_amount + shipping,
            free_shipping_remaining,
        }
    }
}

/// Derived totals for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u64,
    pub subtotal: Decimal,
    pub discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub shipping: Decimal,
    pub grand_total: Decimal,
    /// How much more to spend for free shipping, when below the threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_shipping_remaining: Option<Decimal>,
}

impl CartSummary {
    /// Whether this cart ships free.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::catalog::fixtures::product;

    fn cart_worth(amount: i64) -> CartLedger {
        let mut cart = CartLedger::new();
        cart.add_item(&product("1", Category::Women, amount, None), "M", "Red", 1);
        cart
    }

    #[test]
    fn test_shipping_threshold_boundary() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.shipping_for(Decimal::from(998)), Decimal::from(99));
        assert_eq!(policy.shipping_for(Decimal::from(999)), Decimal::ZERO);
        assert_eq!(policy.shipping_for(Decimal::from(1000)), Decimal::ZERO);
        assert_eq!(policy.shipping_for(Decimal::new(99_899, 2)), Decimal::from(99));
    }

    #[test]
    fn test_redeem_is_case_insensitive() {
        let policy = PricingPolicy::default();
        for code in ["VERDE10", "verde10", "Verde10", "  verde10 "] {
            let discount = policy.redeem(code).unwrap();
            assert_eq!(discount.code, "VERDE10");
            assert_eq!(discount.percent, Decimal::from(10));
        }
        assert_eq!(policy.redeem("VERDE20"), Err(PricingError::InvalidDiscountCode));
        assert_eq!(policy.redeem(""), Err(PricingError::InvalidDiscountCode));
    }

    #[test]
    fn test_scenario_adding_a_second_unit() {
        let policy = PricingPolicy::default();
        let p1 = product("P1", Category::Women, 1000, None);
        let mut cart = CartLedger::new();

        cart.add_item(&p1, "M", "Red", 1);
        let one = policy.summarize(&cart, None);
        assert_eq!(one.subtotal, Decimal::from(1000));
        // 1000 clears the 999 threshold
        assert_eq!(one.shipping, Decimal::ZERO);
        assert_eq!(one.grand_total, Decimal::from(1000));

        cart.add_item(&p1, "M", "Red", 1);
        let two = policy.summarize(&cart, None);
        assert_eq!(cart.get(&p1.id, "M", "Red").unwrap().quantity, 2);
        assert_eq!(two.subtotal, Decimal::from(2000));
        assert_eq!(two.shipping, Decimal::ZERO);
        assert_eq!(two.grand_total, Decimal::from(2000));
    }

    #[test]
    fn test_below_threshold_pays_flat_fee() {
        let summary = PricingPolicy::default().summarize(&cart_worth(900), None);
        assert_eq!(summary.shipping, Decimal::from(99));
        assert_eq!(summary.grand_total, Decimal::from(999));
        assert_eq!(summary.free_shipping_remaining, Some(Decimal::from(99)));
    }

    #[test]
    fn test_discount_is_ten_percent_of_subtotal() {
        let policy = PricingPolicy::default();
        let cart = cart_worth(1299);
        let discount = policy.redeem("verde10").unwrap();

        let without = policy.summarize(&cart, None);
        let with = policy.summarize(&cart, Some(&discount));

        assert_eq!(with.discount, Decimal::new(1299, 1));
        assert_eq!(without.grand_total - with.grand_total, Decimal::new(1299, 1));
        assert_eq!(with.grand_total, Decimal::new(11691, 1));
        assert_eq!(with.discount_code.as_deref(), Some("VERDE10"));
    }

    #[test]
    fn test_shipping_uses_pre_discount_subtotal() {
        let policy = PricingPolicy::default();
        let discount = policy.redeem("VERDE10").unwrap();
        // 1000 - 10% = 900 after discount, but shipping stays free
        let summary = policy.summarize(&cart_worth(1000), Some(&discount));
        assert!(summary.free_shipping());
        assert_eq!(summary.grand_total, Decimal::from(900));
    }

    #[test]
    fn test_empty_cart() {
        let summary = PricingPolicy::default().summarize(&CartLedger::new(), None);
        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.shipping, Decimal::from(99));
    }
}
