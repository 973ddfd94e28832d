//! Verde Core - cart ledger, catalog and pricing.
//!
//! This crate holds everything about the storefront that can be expressed
//! without I/O:
//! - [`catalog`] - products, shop-page filtering and sorting
//! - [`cart`] - the cart ledger and its identity rules
//! - [`wishlist`] - saved products
//! - [`pricing`] - shipping, promotional discount, grand total
//! - [`checkout`] - turning a cart into an order
//! - [`order`] - the admin order book and dashboard figures
//! - [`state`] - the blobs the storefront persists
//! - [`types`] - IDs, prices, emails and statuses
//!
//! # Architecture
//!
//! The core crate contains only types and pure transitions - no I/O, no
//! HTTP, no storage. The `storefront` crate wraps these with persistence
//! and an HTTP surface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod pricing;
pub mod state;
pub mod types;
pub mod wishlist;

pub use cart::{CartLedger, LineItem};
pub use catalog::{Catalog, CatalogProvider, Category, Product};
pub use pricing::{AppliedDiscount, CartSummary, PricingPolicy};
pub use types::*;
pub use wishlist::Wishlist;
