//! The static product catalog.
//!
//! Products are loaded once and never mutated. Everything that needs product
//! data (the cart ledger, the wishlist view, the admin product table) goes
//! through [`CatalogProvider`] so tests can substitute a hand-built catalog.

mod listing;

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

pub use listing::{ListingScope, PriceRange, ProductFilter, ProductSearch, SortOrder};

/// Number of products shown in the "new arrivals" listing.
pub const NEW_ARRIVALS_LIMIT: usize = 20;

/// Number of related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Top-level catalog department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Women,
    Men,
    Accessories,
}

impl Category {
    /// Every department, in navigation order.
    pub const ALL: [Self; 3] = [Self::Women, Self::Men, Self::Accessories];

    /// URL slug for the department.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Women => "women",
            Self::Men => "men",
            Self::Accessories => "accessories",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}

/// A purchasable product.
///
/// Field names follow the catalog data file (`salePrice`, `reviewCount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub category: Category,
    #[serde(default)]
    pub subcategory: String,
    #[serde(default)]
    pub brand: String,
    /// List price.
    pub price: Decimal,
    /// Discounted price; takes precedence over `price` whenever present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub sku: String,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// The price a shopper pays: the sale price if set, otherwise the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }

    /// Whether the product carries a sale price.
    #[must_use]
    pub const fn is_on_sale(&self) -> bool {
        self.sale_price.is_some()
    }

    /// Whether `size` is one of the declared size options.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether `color` is one of the declared color options.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// First declared size, used by quick add.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// First declared color, used by quick add.
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// Percentage saved by the sale price, rounded down (e.g. 25 for 2999 -> 2249).
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let sale = self.sale_price?;
        if self.price <= Decimal::ZERO || sale >= self.price {
            return None;
        }
        let percent = ((self.price - sale) / self.price * Decimal::ONE_HUNDRED).floor();
        percent.to_u32()
    }
}

/// Read-only access to products.
pub trait CatalogProvider {
    /// Look up a product by ID.
    fn find_by_id(&self, id: &ProductId) -> Option<&Product>;

    /// All products in catalog order.
    fn list(&self) -> &[Product];
}

/// A problem found while validating catalog data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("duplicate slug {0}")]
    DuplicateSlug(String),
    #[error("product {0} declares no sizes")]
    NoSizes(ProductId),
    #[error("product {0} declares no colors")]
    NoColors(ProductId),
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("product {0} has a sale price that is not below its list price")]
    SalePriceNotLower(ProductId),
}

/// Errors that can occur building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has {} invalid entries (first: {})", .0.len(), first_issue(.0))]
    Invalid(Vec<CatalogIssue>),
}

fn first_issue(issues: &[CatalogIssue]) -> String {
    issues.first().map(ToString::to_string).unwrap_or_default()
}

/// Check catalog data for problems that would break cart identity or pricing.
#[must_use]
pub fn validate_products(products: &[Product]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut ids = HashSet::new();
    let mut slugs = HashSet::new();

    for product in products {
        if !ids.insert(&product.id) {
            issues.push(CatalogIssue::DuplicateId(product.id.clone()));
        }
        if !slugs.insert(product.slug.as_str()) {
            issues.push(CatalogIssue::DuplicateSlug(product.slug.clone()));
        }
        if product.sizes.is_empty() {
            issues.push(CatalogIssue::NoSizes(product.id.clone()));
        }
        if product.colors.is_empty() {
            issues.push(CatalogIssue::NoColors(product.id.clone()));
        }
        if product.price.is_sign_negative() {
            issues.push(CatalogIssue::NegativePrice(product.id.clone()));
        }
        if product.sale_price.is_some_and(|sale| sale >= product.price) {
            issues.push(CatalogIssue::SalePriceNotLower(product.id.clone()));
        }
    }

    issues
}

/// In-memory catalog loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting data that fails [`validate_products`].
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` with every issue found.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let issues = validate_products(&products);
        if issues.is_empty() {
            Ok(Self { products })
        } else {
            Err(CatalogError::Invalid(issues))
        }
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the data is invalid.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by its URL slug.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Products in the same category, excluding `product` itself.
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(RELATED_PRODUCTS_LIMIT)
            .collect()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogProvider for Catalog {
    fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    fn list(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;

    use super::{Category, Product};
    use crate::types::ProductId;

    /// Build a product with the given id, category and prices.
    pub fn product(id: &str, category: Category, price: i64, sale: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            category,
            subcategory: String::new(),
            brand: "Verde".to_string(),
            price: Decimal::from(price),
            sale_price: sale.map(Decimal::from),
            images: Vec::new(),
            sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            colors: vec!["Red".to_string(), "Black".to_string()],
            description: String::new(),
            features: Vec::new(),
            rating: 4.0,
            review_count: 10,
            in_stock: true,
            sku: format!("VRD-{id}"),
        }
    }
}
