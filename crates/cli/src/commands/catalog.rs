//! Catalog file checks and listings.

use std::path::Path;

use tracing::{error, info};
use verde_core::catalog::{ListingScope, ProductFilter, SortOrder, validate_products};
use verde_core::{Catalog, CatalogProvider, Price, Product};
use verde_storefront::catalog::load_catalog;

/// Check a catalog file and report every problem found.
///
/// # Errors
///
/// Returns an error if the file can't be read or parsed, or has any issues.
pub fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!(path = %path.display(), "Validating catalog");

    let json = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&json)?;

    let issues = validate_products(&products);
    if !issues.is_empty() {
        error!("Catalog validation failed:");
        for issue in &issues {
            error!("  - {issue}");
        }
        return Err(format!("{} validation errors found", issues.len()).into());
    }

    info!(products = products.len(), "Catalog is valid");
    Ok(())
}

/// Print the listing for a shop scope.
///
/// # Errors
///
/// Returns an error if the catalog can't be loaded.
pub fn list(path: &Path, scope: &str, sort: SortOrder) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(path)?;
    let lines = listing_lines(&catalog, scope, sort);

    info!(scope, sort = sort.as_str(), count = lines.len(), "Listing");
    for line in &lines {
        info!("  {line}");
    }
    Ok(())
}

/// One formatted row per product in the listing.
fn listing_lines(catalog: &Catalog, scope: &str, sort: SortOrder) -> Vec<String> {
    let filter = ProductFilter {
        scope: ListingScope::from_slug(scope),
        sort,
        ..ProductFilter::default()
    };

    filter
        .apply(catalog.list())
        .into_iter()
        .map(|product| {
            let price = Price::inr(product.effective_price()).display();
            let sale = if product.is_on_sale() { " (sale)" } else { "" };
            format!("{:<10} {:<32} {price}{sale}", product.sku, product.name)
        })
        .collect()
}
