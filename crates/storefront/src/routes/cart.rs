//! Cart and discount handlers.
//!
//! Every handler answers with the full [`CartView`] so clients never have to
//! recompute totals.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use verde_core::{CartSummary, CatalogProvider, LineItem, Price, PricingPolicy, ProductId};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::ShopperSession;
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// One cart line as the API shows it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl From<&LineItem> for LineView {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            slug: line.product.slug.clone(),
            image: line.product.images.first().cloned(),
            size: line.selected_size.clone(),
            color: line.selected_color.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price(),
            line_total: line.line_total(),
        }
    }
}

/// The cart with its totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineView>,
    pub summary: CartSummary,
    /// "Add ₹X more for free shipping", when below the threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_shipping_hint: Option<String>,
}

impl CartView {
    #[must_use]
    pub fn build(session: &ShopperSession, policy: &PricingPolicy) -> Self {
        let summary = session.summary(policy);
        let free_shipping_hint = summary.free_shipping_remaining.map(|remaining| {
            format!(
                "Add {} more for free shipping",
                Price::inr(remaining).display()
            )
        });
        Self {
            items: session.cart().items().iter().map(LineView::from).collect(),
            summary,
            free_shipping_hint,
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Identifies a cart line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    #[serde(alias = "product_id")]
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

/// Add to cart. Without `size` or `color` the product's first declared
/// option is used (quick add).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(alias = "product_id")]
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuantityRequest {
    #[serde(flatten)]
    pub key: LineKey,
    /// Any JSON number; truncated and clamped to at least 1.
    pub quantity: f64,
}

/// Truncate a requested quantity to whole units, at least 1.
#[allow(clippy::cast_possible_truncation)]
fn requested_quantity(value: f64) -> i64 {
    if value.is_finite() && value >= 1.0 {
        value.trunc().min(f64::from(u32::MAX)) as i64
    } else {
        1
    }
}

#[derive(Debug, Deserialize)]
pub struct DiscountRequest {
    pub code: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/cart`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let session = state.shopper().read().await;
    Json(CartView::build(&session, state.pricing()))
}

/// `POST /api/cart/items`
#[instrument(skip(state), fields(product_id = %req.product_id))]
pub async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartView>)> {
    let product = state
        .catalog()
        .find_by_id(&req.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", req.product_id)))?;

    let size = req
        .size
        .as_deref()
        .or_else(|| product.default_size())
        .unwrap_or_default();
    let color = req
        .color
        .as_deref()
        .or_else(|| product.default_color())
        .unwrap_or_default();

    let mut session = state.shopper().write().await;
    let quantity = session.add_to_cart(product, size, color, req.quantity)?;

    tracing::info!(quantity, size, color, "Added to cart");
    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", req.product_id.as_str())],
    );
    Ok((
        StatusCode::CREATED,
        Json(CartView::build(&session, state.pricing())),
    ))
}

/// `PATCH /api/cart/items`
#[instrument(skip(state), fields(product_id = %req.key.product_id))]
pub async fn set_quantity(
    State(state): State<AppState>,
    Json(req): Json<SetQuantityRequest>,
) -> Json<CartView> {
    let mut session = state.shopper().write().await;
    let key = &req.key;
    let quantity = requested_quantity(req.quantity);
    if !session.set_quantity(&key.product_id, &key.size, &key.color, quantity) {
        tracing::debug!("No matching cart line");
    }
    Json(CartView::build(&session, state.pricing()))
}

/// `POST /api/cart/items/decrement`
#[instrument(skip(state), fields(product_id = %key.product_id))]
pub async fn decrement_item(
    State(state): State<AppState>,
    Json(key): Json<LineKey>,
) -> Json<CartView> {
    let mut session = state.shopper().write().await;
    let remaining = session.decrement(&key.product_id, &key.size, &key.color);
    tracing::debug!(?remaining, "Decremented cart line");
    Json(CartView::build(&session, state.pricing()))
}

/// `DELETE /api/cart/items`
#[instrument(skip(state), fields(product_id = %key.product_id))]
pub async fn remove_item(
    State(state): State<AppState>,
    Json(key): Json<LineKey>,
) -> Json<CartView> {
    let mut session = state.shopper().write().await;
    if session.remove_from_cart(&key.product_id, &key.size, &key.color) {
        tracing::info!("Removed from cart");
    }
    Json(CartView::build(&session, state.pricing()))
}

/// `DELETE /api/cart`
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut session = state.shopper().write().await;
    session.clear_cart();
    Json(CartView::build(&session, state.pricing()))
}

/// `POST /api/cart/discount`
#[instrument(skip(state, req))]
pub async fn apply_discount(
    State(state): State<AppState>,
    Json(req): Json<DiscountRequest>,
) -> Result<Json<CartView>> {
    let mut session = state.shopper().write().await;
    let applied = session.apply_discount(state.pricing(), &req.code)?;
    tracing::info!(code = %applied.code, "Discount applied");
    Ok(Json(CartView::build(&session, state.pricing())))
}

/// `DELETE /api/cart/discount`
#[instrument(skip(state))]
pub async fn remove_discount(State(state): State<AppState>) -> Json<CartView> {
    let mut session = state.shopper().write().await;
    session.remove_discount();
    Json(CartView::build(&session, state.pricing()))
}
