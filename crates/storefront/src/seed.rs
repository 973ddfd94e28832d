//! Demo orders for a fresh admin console.

use verde_core::order::OrderBook;

const DEMO_ORDERS: &str = include_str!("../data/orders.json");

/// The bundled demo order book.
///
/// # Errors
///
/// Returns an error if the bundled JSON no longer matches the `Order` shape.
pub fn demo_orders() -> Result<OrderBook, serde_json::Error> {
    serde_json::from_str(DEMO_ORDERS)
}

/// The demo order book, or an empty one if it fails to parse.
#[must_use]
pub fn demo_orders_or_empty() -> OrderBook {
    demo_orders().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Bundled demo orders are invalid, starting empty");
        OrderBook::default()
    })
}
