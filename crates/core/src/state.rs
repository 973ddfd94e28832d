//! Persisted state blobs.
//!
//! These are the values the storefront writes to its key-value store after
//! every mutation: the shopper's cart and wishlist, and the admin console's
//! login flag and order book. Missing fields deserialize to empty values so
//! an old or partial blob still loads.

use serde::{Deserialize, Serialize};

use crate::cart::CartLedger;
use crate::order::OrderBook;
use crate::wishlist::Wishlist;

/// Storage key for [`ShopperState`].
pub const SHOPPER_STATE_KEY: &str = "verde-fashion-storage";

/// Storage key for [`AdminState`].
pub const ADMIN_STATE_KEY: &str = "verde-admin-storage";

/// A shopper's cart and wishlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopperState {
    #[serde(default)]
    pub cart: CartLedger,
    #[serde(default)]
    pub wishlist: Wishlist,
}

/// The admin console's state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminState {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub orders: OrderBook,
}

impl AdminState {
    /// Start logged out with the given orders.
    #[must_use]
    pub const fn with_orders(orders: OrderBook) -> Self {
        Self {
            is_authenticated: false,
            orders,
        }
    }

    /// Set the admin flag if `attempt` equals `expected`. Returns the outcome.
    ///
    /// This is a demo gate, not authentication.
    pub fn login(&mut self, attempt: &str, expected: &str) -> bool {
        if attempt == expected {
            self.is_authenticated = true;
        }
        attempt == expected
    }

    /// Clear the admin flag.
    pub fn logout(&mut self) {
        self.is_authenticated = false;
    }
}
