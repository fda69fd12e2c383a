//! Fixtures
//!
//! Catalog fixtures are YAML files under `<base>/catalog/<name>.yml`:
//!
//! ```yaml
//! currency: USD
//! products:
//!   - id: 1
//!     title: Backpack
//!     price: 109.95
//!     category: bags
//! ```

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    pricing::currency_from_code,
    products::{Product, ProductId},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Negative product price
    #[error("Invalid price for product {0}")]
    InvalidPrice(ProductId),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product id defined more than once
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Currency mismatch between fixture files
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Catalog fixture file
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code the prices are expressed in
    pub currency: String,

    /// Product records
    pub products: Vec<Product>,
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded products, in file order
    products: Vec<Product>,

    /// Product id -> index into `products`
    product_keys: FxHashMap<ProductId, usize>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            product_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load products from a YAML catalog fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is
    /// negative, if a product id repeats, or if the currency is unknown or
    /// differs from previously loaded files.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_catalog_str(&contents)
    }

    /// Load products from YAML catalog fixture contents
    ///
    /// # Errors
    ///
    /// See [`Fixture::load_catalog`].
    pub fn load_catalog_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let currency = currency_from_code(&fixture.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(fixture.currency.clone()))?;

        if let Some(existing) = self.currency {
            if existing != currency {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
        } else {
            self.currency = Some(currency);
        }

        for product in fixture.products {
            if product.price < Decimal::ZERO {
                return Err(FixtureError::InvalidPrice(product.id));
            }

            if self.product_keys.contains_key(&product.id) {
                return Err(FixtureError::DuplicateProduct(product.id));
            }

            self.product_keys.insert(product.id, self.products.len());
            self.products.push(product);
        }

        Ok(self)
    }

    /// Load a named catalog from the default fixtures directory
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?;

        Ok(fixture)
    }

    /// Get a product by id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: ProductId) -> Result<&Product, FixtureError> {
        self.product_keys
            .get(&id)
            .and_then(|idx| self.products.get(*idx))
            .ok_or(FixtureError::ProductNotFound(id))
    }

    /// Get all products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Currency of the loaded catalog, if any file has been loaded
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Consume the fixture, returning its products
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    const CATALOG: &str = "
currency: USD
products:
  - id: 1
    title: Backpack
    price: 109.95
    category: bags
  - id: 2
    title: T-Shirt
    price: '22.30'
    category: clothing
";

    #[test]
    fn load_catalog_str_reads_products() -> TestResult {
        let mut fixture = Fixture::new();

        fixture.load_catalog_str(CATALOG)?;

        assert_eq!(fixture.products().len(), 2);
        assert_eq!(fixture.currency(), Some(USD));
        assert_eq!(fixture.product(ProductId(1))?.price, Decimal::new(109_95, 2));
        assert_eq!(fixture.product(ProductId(2))?.price, Decimal::new(22_30, 2));

        Ok(())
    }

    #[test]
    fn unknown_product_is_an_error() -> TestResult {
        let mut fixture = Fixture::new();

        fixture.load_catalog_str(CATALOG)?;

        assert!(matches!(
            fixture.product(ProductId(99)),
            Err(FixtureError::ProductNotFound(ProductId(99)))
        ));

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = "
currency: GBP
products:
  - { id: 1, title: A, price: 1 }
  - { id: 1, title: B, price: 2 }
";

        let result = Fixture::new().load_catalog_str(yaml).map(|_| ());

        assert!(matches!(result, Err(FixtureError::DuplicateProduct(ProductId(1)))));
    }

    #[test]
    fn negative_prices_are_rejected() {
        let yaml = "
currency: GBP
products:
  - { id: 3, title: A, price: -1 }
";

        let result = Fixture::new().load_catalog_str(yaml).map(|_| ());

        assert!(matches!(result, Err(FixtureError::InvalidPrice(ProductId(3)))));
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = Fixture::new()
            .load_catalog_str("currency: ABC\nproducts: []\n")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn mixed_currencies_are_rejected() -> TestResult {
        let mut fixture = Fixture::new();

        fixture.load_catalog_str("currency: GBP\nproducts: []\n")?;

        let result = fixture
            .load_catalog_str("currency: USD\nproducts: []\n")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));
        assert_eq!(fixture.currency(), Some(GBP));

        Ok(())
    }

    #[test]
    fn loads_demo_catalog_from_disk() -> TestResult {
        let fixture = Fixture::from_set("demo")?;

        assert!(!fixture.products().is_empty());
        assert_eq!(fixture.currency(), Some(USD));

        Ok(())
    }
}
