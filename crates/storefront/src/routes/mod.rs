//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Products
//! GET    /api/products                  - Listing (?scope&sort&sizes&min_price&max_price)
//! GET    /api/products/{slug}           - Detail with related products
//!
//! # Cart
//! GET    /api/cart                      - Cart with totals
//! POST   /api/cart/items                - Add {productId, size?, color?, quantity?}
//! PATCH  /api/cart/items                - Set quantity {productId, size, color, quantity}
//! DELETE /api/cart/items                - Remove {productId, size, color}
//! POST   /api/cart/items/decrement      - Take one unit off {productId, size, color}
//! DELETE /api/cart                      - Clear
//! POST   /api/cart/discount             - Apply code {code}
//! DELETE /api/cart/discount             - Drop code
//!
//! # Wishlist
//! GET    /api/wishlist                  - Saved products
//! POST   /api/wishlist/{product_id}     - Save
//! DELETE /api/wishlist/{product_id}     - Unsave
//! POST   /api/wishlist/{product_id}/toggle - Flip saved state
//!
//! # Checkout
//! POST   /api/checkout                  - Place a simulated order
//!
//! # Admin (all but login/logout require the console to be unlocked)
//! POST   /api/admin/login               - Unlock {password}
//! POST   /api/admin/logout              - Lock
//! GET    /api/admin/dashboard           - Revenue and order statistics
//! GET    /api/admin/orders              - Order table (?search&status)
//! GET    /api/admin/products            - Product table (?search&category)
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route(
            "/items",
            post(cart::add_item)
                .patch(cart::set_quantity)
                .delete(cart::remove_item),
        )
        .route("/items/decrement", post(cart::decrement_item))
        .route(
            "/discount",
            post(cart::apply_discount).delete(cart::remove_discount),
        )
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/{product_id}", post(wishlist::add).delete(wishlist::remove))
        .route("/{product_id}/toggle", post(wishlist::toggle))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
        .route("/orders", get(admin::orders))
        .route("/products", get(admin::products))
}

/// Create all API routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .route("/api/checkout", post(checkout::place))
        .nest("/api/admin", admin_routes())
}
