//! Wishlist handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use verde_core::{CatalogProvider, ProductId};

use super::products::ProductView;
use crate::error::{AppError, Result};
use crate::services::ShopperSession;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub ids: Vec<ProductId>,
    /// Saved products still in the catalog, in save order.
    pub products: Vec<ProductView>,
    pub count: usize,
}

/// Result of flipping one product (the heart button).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleView {
    pub product_id: ProductId,
    pub saved: bool,
    pub wishlist: WishlistView,
}

impl WishlistView {
    fn build(session: &ShopperSession, catalog: &impl CatalogProvider) -> Self {
        let ids = session.wishlist().ids().to_vec();
        let products = ids
            .iter()
            .filter_map(|id| catalog.find_by_id(id))
            .map(ProductView::from)
            .collect();
        Self {
            count: ids.len(),
            ids,
            products,
        }
    }
}

/// `GET /api/wishlist`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<WishlistView> {
    let session = state.shopper().read().await;
    Json(WishlistView::build(&session, state.catalog()))
}

/// `POST /api/wishlist/{product_id}`
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<WishlistView>> {
    if state.catalog().find_by_id(&product_id).is_none() {
        return Err(AppError::NotFound(format!("product {product_id}")));
    }

    let mut session = state.shopper().write().await;
    if session.add_to_wishlist(product_id) {
        tracing::info!("Saved to wishlist");
    }
    Ok(Json(WishlistView::build(&session, state.catalog())))
}

/// `POST /api/wishlist/{product_id}/toggle`
#[instrument(skip(state))]
pub async fn toggle(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ToggleView>> {
    if state.catalog().find_by_id(&product_id).is_none() {
        return Err(AppError::NotFound(format!("product {product_id}")));
    }

    let mut session = state.shopper().write().await;
    let saved = session.toggle_wishlist(product_id.clone());
    tracing::info!(saved, "Toggled wishlist");
    Ok(Json(ToggleView {
        product_id,
        saved,
        wishlist: WishlistView::build(&session, state.catalog()),
    }))
}

/// `DELETE /api/wishlist/{product_id}`
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Json<WishlistView> {
    let mut session = state.shopper().write().await;
    if session.remove_from_wishlist(&product_id) {
        tracing::info!("Removed from wishlist");
    }
    Json(WishlistView::build(&session, state.catalog()))
}
