//! Catalog
//!
//! Read-only source of product snapshots. Stores never talk to the catalog
//! themselves; callers fetch a product and hand it to a store.

use std::path::PathBuf;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    fixtures::{Fixture, FixtureError},
    products::{Product, ProductId},
};

/// Errors returned by catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with this id
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// Catalog data could not be loaded
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Read-only product catalog.
///
/// # Errors
///
/// Every lookup returns [`CatalogError`] when the underlying source fails;
/// [`Catalog::product`] also returns [`CatalogError::NotFound`] for unknown ids.
#[automock]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All products.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// A single product by id.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Distinct category names, in first-seen order.
    async fn categories(&self) -> Result<Vec<String>, CatalogError>;

    /// Products belonging to a category.
    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog backed by products loaded from fixtures.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
    currency: Option<&'static Currency>,
}

impl FixtureCatalog {
    /// Build a catalog from a list of products. Later duplicates of an id are ignored.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::default();

        for product in products {
            if catalog.index.contains_key(&product.id) {
                debug!(product_id = %product.id, "skipped duplicate catalog product");

                continue;
            }

            catalog.index.insert(product.id, catalog.products.len());
            catalog.products.push(product);
        }

        catalog
    }

    /// Load a named catalog fixture from `base_path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Fixture`] if the fixture cannot be loaded.
    pub fn from_fixture(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, CatalogError> {
        let mut fixture = Fixture::with_base_path(base_path);

        fixture.load_catalog(name)?;

        Ok(Self::from(fixture))
    }

    /// Set the currency the catalog prices are expressed in.
    #[must_use]
    pub fn with_currency(mut self, currency: &'static Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Currency the catalog prices are expressed in, if known.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Fixture> for FixtureCatalog {
    fn from(fixture: Fixture) -> Self {
        let currency = fixture.currency();
        let catalog = Self::new(fixture.into_products());

        match currency {
            Some(currency) => catalog.with_currency(currency),
            None => catalog,
        }
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.index
            .get(&id)
            .and_then(|idx| self.products.get(*idx))
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        let mut categories: Vec<String> = Vec::new();

        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        Ok(categories)
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn catalog() -> FixtureCatalog {
        FixtureCatalog::new([
            Product::new(1, "Backpack", Decimal::new(109_95, 2)).with_category("bags"),
            Product::new(2, "Jacket", Decimal::new(55_99, 2)).with_category("clothing"),
            Product::new(3, "Tote", Decimal::new(12_00, 2)).with_category("bags"),
            Product::new(1, "Duplicate", Decimal::ONE).with_category("bags"),
        ])
    }

    #[test]
    fn missing_fixture_is_a_fixture_error() {
        let result = FixtureCatalog::from_fixture("./fixtures", "does-not-exist");

        assert!(matches!(result, Err(CatalogError::Fixture(FixtureError::Io(_)))));
    }

    #[test]
    fn fixture_catalog_keeps_fixture_currency() -> TestResult {
        let catalog = FixtureCatalog::from_fixture("./fixtures", "demo")?;

        assert_eq!(catalog.currency(), Some(USD));
        assert_eq!(FixtureCatalog::default().currency(), None);

        Ok(())
    }

    #[tokio::test]
    async fn product_by_id() -> TestResult {
        let product = catalog().product(ProductId(2)).await?;

        assert_eq!(product.title, "Jacket");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let result = catalog().product(ProductId(42)).await;

        assert!(matches!(result, Err(CatalogError::NotFound(ProductId(42)))));
    }

    #[tokio::test]
    async fn duplicates_keep_first_record() -> TestResult {
        let catalog = catalog();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.product(ProductId(1)).await?.title, "Backpack");

        Ok(())
    }

    #[tokio::test]
    async fn categories_in_first_seen_order() -> TestResult {
        assert_eq!(catalog().categories().await?, vec!["bags", "clothing"]);

        Ok(())
    }

    #[tokio::test]
    async fn filters_by_category() -> TestResult {
        let ids: Vec<ProductId> = catalog()
            .products_in_category("bags")
            .await?
            .iter()
            .map(|product| product.id)
            .collect();

        assert_eq!(ids, vec![ProductId(1), ProductId(3)]);

        Ok(())
    }
}
