//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Product identifier, as assigned by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Aggregate customer rating
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rate. Missing or non-finite rates read back as zero.
    #[serde(default, deserialize_with = "finite_or_zero")]
    pub rate: f64,

    /// Number of ratings
    pub count: u32,
}

/// JSON stores non-finite floats as `null`.
fn finite_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|rate| rate.is_finite())
        .unwrap_or_default())
}

/// Product
///
/// An immutable snapshot of a catalog record. Stores copy the whole record
/// when an entry is created, so later catalog price changes never reach
/// existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Unit price, currency-agnostic
    pub price: Decimal,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Catalog category
    #[serde(default)]
    pub category: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Customer rating
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Create a product with just an id, title and price.
    pub fn new(id: u64, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ProductId(id),
            title: title.into(),
            price,
            description: String::new(),
            category: String::new(),
            image: String::new(),
            rating: Rating::default(),
        }
    }

    /// Set the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
