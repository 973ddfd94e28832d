//! Product listing and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use verde_core::catalog::{ListingScope, PriceRange, ProductFilter, SortOrder};
use verde_core::{CatalogProvider, Price, Product};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// A product as the API shows it: catalog fields plus derived pricing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub effective_price: Decimal,
    pub display_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            product: product.clone(),
            effective_price: product.effective_price(),
            display_price: Price::inr(product.effective_price()).display(),
            display_original_price: product
                .is_on_sale()
                .then(|| Price::inr(product.price).display()),
            discount_percent: product.discount_percent(),
        }
    }
}

/// Shop page query string.
///
/// `sizes` is comma separated (`?sizes=S,M`).
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub scope: Option<String>,
    pub sort: Option<SortOrder>,
    pub sizes: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ListingQuery {
    fn into_filter(self) -> ProductFilter {
        let sizes = self
            .sizes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let price_range = (self.min_price.is_some() || self.max_price.is_some()).then(|| {
            PriceRange {
                min: self.min_price.unwrap_or(Decimal::ZERO),
                max: self.max_price,
            }
        });

        ProductFilter {
            scope: self
                .scope
                .as_deref()
                .map_or(ListingScope::All, ListingScope::from_slug),
            sizes,
            price_range,
            sort: self.sort.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub count: usize,
    pub products: Vec<ProductView>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub product: ProductView,
    pub related: Vec<ProductView>,
}

/// `GET /api/products`
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<ListingResponse> {
    let filter = query.into_filter();
    let products: Vec<ProductView> = filter
        .apply(state.catalog().list())
        .into_iter()
        .map(ProductView::from)
        .collect();

    tracing::debug!(count = products.len(), "Listing products");
    Json(ListingResponse {
        count: products.len(),
        products,
    })
}

/// `GET /api/products/{slug}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DetailResponse>> {
    let catalog = state.catalog();
    let product = catalog
        .find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let response = DetailResponse {
        product: product.into(),
        related: catalog
            .related(product)
            .into_iter()
            .map(ProductView::from)
            .collect(),
    };
    Ok(Json(response))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_query_defaults() {
        let filter = ListingQuery::default().into_filter();
        assert_eq!(filter.scope, ListingScope::All);
        assert!(filter.sizes.is_empty());
        assert!(filter.price_range.is_none());
        assert_eq!(filter.sort, SortOrder::Featured);
    }

    #[test]
    fn test_listing_query_parses_sizes_and_range() {
        let filter = ListingQuery {
            scope: Some("men".to_string()),
            sort: Some(SortOrder::PriceHighLow),
            sizes: Some("S, M,,L".to_string()),
            min_price: None,
            max_price: Some(Decimal::from(2000)),
        }
        .into_filter();

        assert_eq!(filter.sizes, vec!["S", "M", "L"]);
        assert_eq!(
            filter.price_range,
            Some(PriceRange {
                min: Decimal::ZERO,
                max: Some(Decimal::from(2000)),
            })
        );
        assert!(matches!(filter.scope, ListingScope::Category(_)));
    }
}
