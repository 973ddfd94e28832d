//! Orders and the admin order book.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderId, OrderStatus, PaymentMethod};

/// Number of orders shown in the dashboard's "recent orders" panel.
pub const RECENT_ORDERS_LIMIT: usize = 5;

/// Statuses shown in the dashboard breakdown, in display order.
pub const BREAKDOWN_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

/// A line on a placed order. Prices are frozen at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: u32,
    /// Unit price paid.
    pub price: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub email: Email,
    /// Amount charged (grand total at checkout).
    pub total: Decimal,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub shipping_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl Order {
    /// Total number of units across all items.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Admin order list filter.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    /// Case-insensitive substring over order ID, customer name and email.
    pub search: String,
    /// `None` shows every status.
    pub status: Option<OrderStatus>,
}

impl OrderQuery {
    /// Whether an order passes the filter.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        let term = self.search.trim().to_lowercase();
        let search_ok = term.is_empty()
            || order.id.as_str().to_lowercase().contains(&term)
            || order.customer_name.to_lowercase().contains(&term)
            || order.email.as_str().to_lowercase().contains(&term);
        let status_ok = self.status.is_none_or(|status| order.status == status);
        search_ok && status_ok
    }
}

/// Count and share of orders in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusShare {
    pub status: OrderStatus,
    pub count: usize,
    /// Percentage of all orders, one decimal place.
    pub percentage: Decimal,
}

/// Figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: usize,
    /// Zero when there are no orders.
    pub average_order_value: Decimal,
    /// Orders still pending or processing.
    pub pending_orders: usize,
    pub total_products: usize,
    pub recent_orders: Vec<Order>,
    pub status_breakdown: Vec<StatusShare>,
}

/// All orders, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Wrap an existing list of orders (already newest first).
    #[must_use]
    pub const fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Record a new order at the front of the book.
    pub fn add_order(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// Look up an order by ID.
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == id)
    }

    /// Orders passing `query`, in book order.
    #[must_use]
    pub fn query(&self, query: &OrderQuery) -> Vec<&Order> {
        self.orders.iter().filter(|order| query.matches(order)).collect()
    }

    /// Number of orders in `status`.
    #[must_use]
    pub fn count_with_status(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|order| order.status == status).count()
    }

    /// Compute dashboard figures. `total_products` comes from the catalog.
    #[must_use]
    pub fn stats(&self, total_products: usize) -> DashboardStats {
        let total_orders = self.orders.len();
        let total_revenue: Decimal = self.orders.iter().map(|order| order.total).sum();
        let average_order_value = if total_orders == 0 {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(total_orders)).round_dp(2)
        };

        let status_breakdown = BREAKDOWN_STATUSES
            .into_iter()
            .map(|status| {
                let count = self.count_with_status(status);
                let percentage = if total_orders == 0 {
                    Decimal::ZERO
                } else {
                    (Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total_orders))
                        .round_dp(1)
                };
                StatusShare {
                    status,
                    count,
                    percentage,
                }
            })
            .collect();

        DashboardStats {
            total_revenue,
            total_orders,
            average_order_value,
            pending_orders: self.orders.iter().filter(|o| o.status.is_open()).count(),
            total_products,
            recent_orders: self.orders.iter().take(RECENT_ORDERS_LIMIT).cloned().collect(),
            status_breakdown,
        }
    }

    /// Orders in book order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::fixtures::order;
    use super::*;

    fn book() -> OrderBook {
        OrderBook::new(vec![
            order("ORD-001", "Priya", 4598, OrderStatus::Delivered),
            order("ORD-002", "Rahul", 3999, OrderStatus::Shipped),
            order("ORD-003", "Ananya", 8497, OrderStatus::Processing),
            order("ORD-004", "Amit", 6498, OrderStatus::Pending),
            order("ORD-005", "Sneha", 4999, OrderStatus::Delivered),
        ])
    }

    #[test]
    fn test_add_order_prepends() {
        let mut book = book();
        book.add_order(order("XYZ", "Kiran", 100, OrderStatus::Pending));
        assert_eq!(book.orders()[0].id.as_str(), "XYZ");
        assert_eq!(book.len(), 6);
    }

    #[test]
    fn test_query_search_and_status() {
        let book = book();
        let ids = |q: &OrderQuery| -> Vec<String> {
            book.query(q).iter().map(|o| o.id.to_string()).collect()
        };

        let by_name = OrderQuery {
            search: "ANANYA".to_string(),
            status: None,
        };
        assert_eq!(ids(&by_name), vec!["ORD-003"]);

        let by_id = OrderQuery {
            search: "ord-00".to_string(),
            status: Some(OrderStatus::Delivered),
        };
        assert_eq!(ids(&by_id), vec!["ORD-001", "ORD-005"]);

        let by_email = OrderQuery {
            search: "rahul@".to_string(),
            status: Some(OrderStatus::Pending),
        };
        assert!(ids(&by_email).is_empty());
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = book().stats(30);

        assert_eq!(stats.total_revenue, Decimal::from(28_591));
        assert_eq!(stats.total_orders, 5);
        assert_eq!(stats.average_order_value, Decimal::new(571_820, 2));
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.total_products, 30);
        assert_eq!(stats.recent_orders.len(), RECENT_ORDERS_LIMIT);

        let delivered = &stats.status_breakdown[3];
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.count, 2);
        assert_eq!(delivered.percentage, Decimal::from(40));
    }

    #[test]
    fn test_dashboard_stats_empty_book() {
        let stats = OrderBook::default().stats(0);
        assert_eq!(stats.average_order_value, Decimal::ZERO);
        assert!(stats.recent_orders.is_empty());
        assert!(stats.status_breakdown.iter().all(|s| s.percentage.is_zero()));
    }

    #[test]
    fn test_order_serialized_shape() {
        let value = serde_json::to_value(order("ORD-9", "Priya", 10, OrderStatus::Shipped)).unwrap();
        assert_eq!(value["customerName"], "Priya");
        assert_eq!(value["status"], "shipped");
        assert_eq!(value["items"][0]["productName"], "Denim Jacket");
        assert!(value.get("paymentMethod").is_none());
    }
}
