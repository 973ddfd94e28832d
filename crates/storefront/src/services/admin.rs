//! The admin console: a password gate and the order book behind it.
//!
//! The gate is a single flag shared by every caller of this process. It is a
//! demo convenience and offers no real protection.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use verde_core::order::{DashboardStats, Order, OrderBook, OrderQuery};
use verde_core::state::{ADMIN_STATE_KEY, AdminState};

use crate::persistence::{KeyValueStore, load_state_or_else, save_state};

/// Admin flag plus the order book, persisted together.
pub struct AdminConsole {
    state: AdminState,
    password: SecretString,
    store: Arc<dyn KeyValueStore>,
}

impl AdminConsole {
    /// Restore persisted admin state, seeding from `seed` when none exists.
    pub fn load<F>(store: Arc<dyn KeyValueStore>, password: SecretString, seed: F) -> Self
    where
        F: FnOnce() -> OrderBook,
    {
        let state = load_state_or_else(store.as_ref(), ADMIN_STATE_KEY, || {
            AdminState::with_orders(seed())
        });
        tracing::debug!(orders = state.orders.len(), "Admin state loaded");
        Self {
            state,
            password,
            store,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// Check `attempt` against the configured password. Returns whether it matched.
    pub fn login(&mut self, attempt: &str) -> bool {
        let ok = self.state.login(attempt, self.password.expose_secret());
        if ok {
            self.save();
        }
        ok
    }

    pub fn logout(&mut self) {
        self.state.logout();
        self.save();
    }

    /// Record a newly placed order at the front of the book.
    pub fn add_order(&mut self, order: Order) {
        self.state.orders.add_order(order);
        self.save();
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderBook {
        &self.state.orders
    }

    #[must_use]
    pub fn query(&self, query: &OrderQuery) -> Vec<&Order> {
        self.state.orders.query(query)
    }

    #[must_use]
    pub fn stats(&self, total_products: usize) -> DashboardStats {
        self.state.orders.stats(total_products)
    }

    fn save(&self) {
        if let Err(e) = save_state(self.store.as_ref(), ADMIN_STATE_KEY, &self.state) {
            tracing::warn!(error = %e, "Failed to persist admin state");
        }
    }
}
