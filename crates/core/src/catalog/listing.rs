//! Shop-page filtering and sorting, plus the admin product search.
//!
//! Filters compose by AND over a small static list, so a linear scan is all
//! that's needed.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, NEW_ARRIVALS_LIMIT, Product};

/// Which slice of the catalog a shop page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingScope {
    #[default]
    All,
    Category(Category),
    /// The first [`NEW_ARRIVALS_LIMIT`] products in catalog order.
    NewArrivals,
    /// Products with a sale price.
    Sale,
}

impl ListingScope {
    /// Resolve a shop URL segment. Unknown segments show the whole catalog.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "new-arrivals" => Self::NewArrivals,
            "sale" => Self::Sale,
            other => other.parse().map_or(Self::All, Self::Category),
        }
    }

    fn select<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        match self {
            Self::All => products.iter().collect(),
            Self::Category(category) => products.iter().filter(|p| p.category == *category).collect(),
            Self::NewArrivals => products.iter().take(NEW_ARRIVALS_LIMIT).collect(),
            Self::Sale => products.iter().filter(|p| p.is_on_sale()).collect(),
        }
    }
}

/// Sort key for a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    /// Highest rating first.
    Rating,
    /// Catalog order; the data carries no arrival date.
    Newest,
}

impl SortOrder {
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceLowHigh,
        Self::PriceHighLow,
        Self::Rating,
        Self::Newest,
    ];

    /// URL form, e.g. `price-low-high`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured | Self::Newest => Ordering::Equal,
            Self::PriceLowHigh => a.effective_price().cmp(&b.effective_price()),
            Self::PriceHighLow => b.effective_price().cmp(&a.effective_price()),
            Self::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid sort order: {s}"))
    }
}

/// Half-open price band `[min, max)` over the effective price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    /// Exclusive upper bound; `None` means unbounded.
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Whether `price` falls inside the band.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

/// Filters and sort order for a shop page.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub scope: ListingScope,
    /// Keep products offering any of these sizes. Empty keeps everything.
    pub sizes: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub sort: SortOrder,
}

impl ProductFilter {
    /// Whether a product passes the size and price predicates.
    ///
    /// Scope is applied separately since "new arrivals" depends on position.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let size_ok =
            self.sizes.is_empty() || product.sizes.iter().any(|s| self.sizes.contains(s));
        let price_ok = self
            .price_range
            .is_none_or(|range| range.contains(product.effective_price()));
        size_ok && price_ok
    }

    /// Filter then stably sort `products`.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut selected: Vec<&Product> = self
            .scope
            .select(products)
            .into_iter()
            .filter(|p| self.matches(p))
            .collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }
}

/// Admin product table search.
#[derive(Debug, Clone, Default)]
pub struct ProductSearch {
    /// Case-insensitive substring matched against name, brand and SKU.
    pub term: String,
    pub category: Option<Category>,
}

impl ProductSearch {
    /// Whether a product matches the search.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let term = self.term.trim().to_lowercase();
        let term_ok = term.is_empty()
            || product.name.to_lowercase().contains(&term)
            || product.brand.to_lowercase().contains(&term)
            || product.sku.to_lowercase().contains(&term);
        let category_ok = self.category.is_none_or(|c| product.category == c);
        term_ok && category_ok
    }

    /// Products matching the search, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}
