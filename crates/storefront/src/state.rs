//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;
use verde_core::{Catalog, PricingPolicy};

use crate::config::StorefrontConfig;
use crate::persistence::KeyValueStore;
use crate::seed;
use crate::services::{AdminConsole, ShopperSession};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The shopper session and admin
/// console each sit behind a `RwLock`, so mutations are serialized.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    shopper: RwLock<ShopperSession>,
    admin: RwLock<AdminConsole>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Restores the shopper and admin blobs from `store`; a store without an
    /// admin blob is seeded with the demo orders.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        let shopper = ShopperSession::load(store.clone());
        let admin = AdminConsole::load(
            store,
            config.admin_password.clone(),
            seed::demo_orders_or_empty,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shopper: RwLock::new(shopper),
                admin: RwLock::new(admin),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Shipping and promotion rules in effect.
    #[must_use]
    pub fn pricing(&self) -> &PricingPolicy {
        &self.inner.config.pricing
    }

    /// The shopper session lock.
    #[must_use]
    pub fn shopper(&self) -> &RwLock<ShopperSession> {
        &self.inner.shopper
    }

    /// The admin console lock.
    #[must_use]
    pub fn admin(&self) -> &RwLock<AdminConsole> {
        &self.inner.admin
    }
}
