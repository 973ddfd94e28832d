//! Simulated checkout.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Serialize;
use tracing::instrument;
use verde_core::Price;
use verde_core::checkout::CheckoutDetails;
use verde_core::order::Order;

use crate::error::{Result, add_breadcrumb};
use crate::services::generate_order_number;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order_number: String,
    pub display_total: String,
    pub order: Order,
}

/// `POST /api/checkout`
///
/// Places the order, clears the cart and discount, and files the order with
/// the admin console. No payment is taken.
#[instrument(skip(state, details), fields(email = %details.email))]
pub async fn place(
    State(state): State<AppState>,
    Json(details): Json<CheckoutDetails>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let order = {
        let mut session = state.shopper().write().await;
        session.checkout(state.pricing(), &details, generate_order_number(), Utc::now())?
    };

    state.admin().write().await.add_order(order.clone());

    tracing::info!(
        order_id = %order.id,
        total = %order.total,
        payment = order.payment_method.map_or("", |m| m.label()),
        "Order placed"
    );
    add_breadcrumb("checkout", "Order placed", &[("order_id", order.id.as_str())]);

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_number: order.id.to_string(),
            display_total: Price::inr(order.total).display(),
            order,
        }),
    ))
}
