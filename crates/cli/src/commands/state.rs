//! Persisted storefront state.

use std::path::Path;

use tracing::info;
use verde_core::state::{ADMIN_STATE_KEY, SHOPPER_STATE_KEY, ShopperState};
use verde_core::{CartSummary, Price, PricingPolicy};
use verde_storefront::config::StorefrontConfig;
use verde_storefront::persistence::{JsonFileStore, KeyValueStore, load_state};

/// Print the persisted cart, its totals and the wishlist.
///
/// Totals use the pricing configured in the environment.
///
/// # Errors
///
/// Returns an error if the environment configuration is invalid.
pub fn show(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = JsonFileStore::new(dir);
    let state: ShopperState = load_state(&store, SHOPPER_STATE_KEY);

    info!(dir = %dir.display(), "Shopper state");
    for line in cart_lines(&state) {
        info!("  {line}");
    }
    for line in summary_lines(&config.pricing.summarize(&state.cart, None)) {
        info!("  {line}");
    }

    let ids: Vec<&str> = state.wishlist.ids().iter().map(|id| id.as_str()).collect();
    info!("Wishlist ({}): {}", ids.len(), ids.join(", "));
    Ok(())
}

/// Remove the persisted shopper state, and the admin state if asked.
///
/// # Errors
///
/// Returns an error if a state file exists but can't be removed.
pub fn clear(dir: &Path, admin: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(dir);

    store.remove(SHOPPER_STATE_KEY)?;
    info!(path = %store.path_for(SHOPPER_STATE_KEY).display(), "Shopper state cleared");

    if admin {
        store.remove(ADMIN_STATE_KEY)?;
        info!(path = %store.path_for(ADMIN_STATE_KEY).display(), "Admin state cleared");
    }
    Ok(())
}

fn cart_lines(state: &ShopperState) -> Vec<String> {
    if state.cart.is_empty() {
        return vec!["Cart is empty".to_string()];
    }
    state
        .cart
        .items()
        .iter()
        .map(|line| {
            format!(
                "{} x{} ({} / {}) {}",
                line.product.name,
                line.quantity,
                line.selected_size,
                line.selected_color,
                Price::inr(line.line_total()).display()
            )
        })
        .collect()
}

fn summary_lines(summary: &CartSummary) -> Vec<String> {
    let shipping = if summary.free_shipping() {
        "Free".to_string()
    } else {
        Price::inr(summary.shipping).display()
    };
    vec![
        format!("Items: {}", summary.item_count),
        format!("Subtotal: {}", Price::inr(summary.subtotal).display()),
        format!("Shipping: {shipping}"),
        format!("Total: {}", Price::inr(summary.grand_total).display()),
    ]
}
