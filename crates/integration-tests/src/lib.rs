//! Integration test harness for the Verde storefront.
//!
//! Builds the real router over the bundled catalog and an in-memory state
//! store, then drives it in-process with `tower::ServiceExt::oneshot`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p verde-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use verde_storefront::catalog::load_catalog;
use verde_storefront::config::StorefrontConfig;
use verde_storefront::persistence::{KeyValueStore, MemoryStore};
use verde_storefront::state::AppState;

/// Catalog shipped with the storefront crate.
pub const BUNDLED_CATALOG: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../storefront/data/products.json"
);

/// A storefront router plus the store behind it.
pub struct TestApp {
    router: Router,
    pub store: Arc<dyn KeyValueStore>,
}

impl TestApp {
    /// Fresh app over an empty in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog doesn't load.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// App over an existing store, as after a restart.
    ///
    /// # Panics
    ///
    /// Panics if the bundled catalog doesn't load.
    #[must_use]
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = load_catalog(Path::new(BUNDLED_CATALOG)).expect("bundled catalog loads");
        let state = AppState::new(StorefrontConfig::default(), catalog, store.clone());
        Self {
            router: verde_storefront::app(state),
            store,
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty).
    ///
    /// # Panics
    ///
    /// Panics if the request can't be built or the body isn't JSON.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("valid request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, body).await
    }

    /// Unlock the admin console with the default password.
    ///
    /// # Panics
    ///
    /// Panics if login is rejected.
    pub async fn login_admin(&self) {
        let (status, _) = self
            .post("/api/admin/login", serde_json::json!({ "password": "admin123" }))
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed");
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a decimal field that the API serializes as a string.
///
/// # Panics
///
/// Panics if the field is missing or not a decimal string.
#[must_use]
pub fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimal serialized as string")
        .parse()
        .expect("valid decimal")
}
