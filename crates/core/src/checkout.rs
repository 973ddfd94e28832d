//! Simulated checkout: turn the cart into an [`Order`].
//!
//! There is no payment step. Placing an order snapshots the cart lines and
//! the summary's grand total; clearing the cart afterwards is the caller's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLedger;
use crate::order::{Order, OrderItem};
use crate::pricing::CartSummary;
use crate::types::{Email, OrderId, OrderStatus, PaymentMethod};

/// Errors that prevent an order from being placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Contact and shipping details from the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDetails {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutDetails {
    /// Check that every required form field is filled in.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
        ];
        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CheckoutError::MissingField(name)),
            None => Ok(()),
        }
    }

    /// `"First Last"`.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// One-line address, e.g. `"12 Lake Rd, Pune, MH 411001"`.
    #[must_use]
    pub fn shipping_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address.trim(),
            self.city.trim(),
            self.state.trim(),
            self.pincode.trim()
        )
    }
}

/// Build a pending order from the cart.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` when there is nothing to buy, or
/// `CheckoutError::MissingField` when the form is incomplete.
pub fn place_order(
    order_id: OrderId,
    details: &CheckoutDetails,
    cart: &CartLedger,
    summary: &CartSummary,
    placed_at: DateTime<Utc>,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    details.validate()?;

    let items = cart
        .items()
        .iter()
        .map(|line| OrderItem {
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.unit_price(),
        })
        .collect();

    Ok(Order {
        id: order_id,
        customer_name: details.customer_name(),
        email: details.email.clone(),
        total: summary.grand_total,
        status: OrderStatus::Pending,
        items,
        created_at: placed_at,
        shipping_address: details.shipping_address(),
        payment_method: Some(details.payment_method),
    })
}
