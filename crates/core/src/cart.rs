//! The cart ledger.
//!
//! A cart is an ordered list of line items, one per (product, size, color)
//! identity key. Adding to an existing key merges quantities; nothing ever
//! leaves a line with quantity zero. All aggregates are recomputed from the
//! lines on demand.
//!
//! The ledger performs no I/O. Callers that persist the cart do so after each
//! mutation (see the storefront's shopper session).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// One distinct (product, size, color) selection.
///
/// The product is a snapshot taken when the line was created, so the cart
/// can be rendered and priced without the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

impl LineItem {
    /// Whether this line has the given identity key.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, size: &str, color: &str) -> bool {
        &self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }

    /// Price of a single unit, honoring the sale price.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.effective_price()
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// Ordered, duplicate-free sequence of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartLedger {
    items: Vec<LineItem>,
}

impl CartLedger {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a ledger from stored lines, restoring the invariants.
    ///
    /// Lines sharing a key are merged into the first occurrence and zero
    /// quantities are raised to 1, so a hand-edited or stale blob can't break
    /// identity.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut ledger = Self::new();
        for item in items {
            let quantity = item.quantity.max(1);
            match ledger.position(&item.product.id, &item.selected_size, &item.selected_color) {
                Some(index) => {
                    if let Some(existing) = ledger.items.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(quantity);
                    }
                }
                None => ledger.items.push(LineItem { quantity, ..item }),
            }
        }
        ledger
    }

    fn position(&self, product_id: &ProductId, size: &str, color: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.matches(product_id, size, color))
    }

    /// Add `quantity` units of a product variant and return the line's new quantity.
    ///
    /// Merges into an existing line with the same key, otherwise appends a new
    /// line at the end. A quantity of 0 counts as 1.
    pub fn add_item(&mut self, product: &Product, size: &str, color: &str, quantity: u32) -> u32 {
        let quantity = quantity.max(1);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product.id, size, color))
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return item.quantity;
        }

        self.items.push(LineItem {
            product: product.clone(),
            quantity,
            selected_size: size.to_owned(),
            selected_color: color.to_owned(),
        });
        quantity
    }

    /// Remove the line with the given key. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId, size: &str, color: &str) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| !item.matches(product_id, size, color));
        self.items.len() != before
    }

    /// Set a line's quantity, clamping anything below 1 up to 1.
    ///
    /// Never removes the line. Returns whether a line matched.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> bool {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product_id, size, color))
        else {
            return false;
        };
        item.quantity = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        true
    }

    /// Take one unit off a line, removing it when it would reach zero.
    ///
    /// Returns the remaining quantity, or `None` if the line is gone (or was
    /// never there).
    pub fn decrement_item(&mut self, product_id: &ProductId, size: &str, color: &str) -> Option<u32> {
        let index = self.position(product_id, size, color)?;
        let item = self.items.get_mut(index)?;
        if item.quantity > 1 {
            item.quantity -= 1;
            return Some(item.quantity);
        }
        self.items.remove(index);
        None
    }

    /// Look up a line by key.
    #[must_use]
    pub fn get(&self, product_id: &ProductId, size: &str, color: &str) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.matches(product_id, size, color))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `effective price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities across all lines (not the number of lines).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<LineItem>> for CartLedger {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<CartLedger> for Vec<LineItem> {
    fn from(ledger: CartLedger) -> Self {
        ledger.items
    }
}
