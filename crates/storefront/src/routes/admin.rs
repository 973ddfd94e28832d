//! Admin console handlers.
//!
//! Everything except login and logout requires [`RequireAdmin`].

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use verde_core::catalog::ProductSearch;
use verde_core::order::{DashboardStats, Order, OrderQuery};
use verde_core::{CatalogProvider, Category, OrderStatus};

use super::products::ProductView;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_authenticated: bool,
}

/// `POST /api/admin/login`
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let mut admin = state.admin().write().await;
    if admin.login(&req.password) {
        tracing::info!("Admin console unlocked");
        Ok(Json(SessionResponse {
            is_authenticated: true,
        }))
    } else {
        tracing::warn!("Admin login failed");
        Err(AppError::Unauthorized("Invalid password".to_string()))
    }
}

/// `POST /api/admin/logout`
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.admin().write().await.logout();
    tracing::info!("Admin console locked");
    StatusCode::NO_CONTENT
}

/// `GET /api/admin/dashboard`
#[instrument(skip_all)]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> Json<DashboardStats> {
    let total_products = state.catalog().len();
    Json(state.admin().read().await.stats(total_products))
}

/// Order table filters. `status` accepts `all` or a status name.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub count: usize,
    pub orders: Vec<Order>,
}

fn parse_all_or<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    match value.map(str::trim) {
        None | Some("" | "all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::BadRequest),
    }
}

/// `GET /api/admin/orders`
#[instrument(skip(_admin, state))]
pub async fn orders(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<OrdersResponse>> {
    let filter = OrderQuery {
        search: query.search.unwrap_or_default(),
        status: parse_all_or::<OrderStatus>(query.status.as_deref())?,
    };

    let admin = state.admin().read().await;
    let orders: Vec<Order> = admin.query(&filter).into_iter().cloned().collect();
    Ok(Json(OrdersResponse {
        count: orders.len(),
        orders,
    }))
}

/// Product table filters. `category` accepts `all` or a category slug.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTable {
    pub total: usize,
    pub in_stock: usize,
    pub on_sale: usize,
    pub products: Vec<ProductView>,
}

/// `GET /api/admin/products`
#[instrument(skip(_admin, state))]
pub async fn products(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductTable>> {
    let search = ProductSearch {
        term: query.search.unwrap_or_default(),
        category: parse_all_or::<Category>(query.category.as_deref())?,
    };

    let matches = search.apply(state.catalog().list());
    Ok(Json(ProductTable {
        total: matches.len(),
        in_stock: matches.iter().filter(|p| p.in_stock).count(),
        on_sale: matches.iter().filter(|p| p.is_on_sale()).count(),
        products: matches.into_iter().map(ProductView::from).collect(),
    }))
}
