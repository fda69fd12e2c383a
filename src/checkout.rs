//! Checkout
//!
//! Simulated checkout: the cart is snapshotted into an [`OrderSummary`] and
//! then emptied. No payment is taken.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use tracing::info;

use crate::{
    cart::{Cart, CartLine},
    catalog::{Catalog, CatalogError},
    collection::{Collection, Keyed},
    pricing::to_money,
    products::ProductId,
};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out
    #[error("cart is empty")]
    EmptyCart,

    /// Failed writing the summary
    #[error("failed to write order summary: {0}")]
    Io(#[from] io::Error),
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Product id
    pub product_id: ProductId,

    /// Product title at the time it was added to the cart
    pub title: String,

    /// Units purchased
    pub quantity: u32,

    /// Unit price
    pub unit_price: Money<'static, Currency>,

    /// `unit_price × quantity`
    pub line_total: Money<'static, Currency>,
}

impl OrderLine {
    fn from_line(line: &CartLine, currency: &'static Currency) -> Self {
        Self {
            product_id: line.product_id(),
            title: line.product().title.clone(),
            quantity: line.quantity(),
            unit_price: to_money(line.unit_price(), currency),
            line_total: to_money(line.subtotal(), currency),
        }
    }
}

/// Snapshot of a cart at checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    lines: Vec<OrderLine>,
    item_count: u64,
    total: Money<'static, Currency>,
}

impl OrderSummary {
    /// Summarise the current contents of a cart without changing it.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| OrderLine::from_line(line, cart.currency()))
                .collect(),
            item_count: cart.item_count(),
            total: cart.total_money(),
        }
    }

    /// Purchased lines
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Total units purchased
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Order total
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Render the summary as a table followed by the total.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Io`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), CheckoutError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Price", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.title.clone(),
                line.quantity.to_string(),
                format!("{}", line.unit_price),
                format!("{}", line.line_total),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..5), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, " Items: {}", self.item_count)?;
        writeln!(out, " Total: {}", self.total)?;

        Ok(())
    }
}

/// Look up each id in the catalog and add one unit of it to the cart.
///
/// Every id is resolved before the cart changes, so a failed lookup leaves
/// the cart untouched. Repeat an id to add more than one unit.
///
/// # Errors
///
/// Returns the first [`CatalogError`] raised by the catalog.
pub async fn add_from_catalog(
    cart: &mut Cart,
    catalog: &dyn Catalog,
    ids: impl IntoIterator<Item = ProductId>,
) -> Result<(), CatalogError> {
    let mut products = Vec::new();

    for id in ids {
        products.push(catalog.product(id).await?);
    }

    for product in &products {
        cart.add_item(product);
    }

    Ok(())
}

/// Check out a cart: snapshot its contents, then clear it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines; the cart is
/// left untouched.
pub fn checkout(cart: &mut Cart) -> Result<OrderSummary, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let summary = OrderSummary::from_cart(cart);

    cart.clear();

    info!(
        lines = summary.lines.len(),
        items = summary.item_count,
        total = %summary.total,
        "checked out cart"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;
    use crate::{catalog::MockCatalog, products::Product};

    fn filled_cart() -> Cart {
        let mut cart = Cart::new(USD);
        let backpack = Product::new(1, "Backpack", Decimal::new(19_99, 2));
        let mug = Product::new(2, "Mug", Decimal::new(5_00, 2));

        cart.add_item(&backpack);
        cart.add_item(&backpack);
        cart.add_item(&mug);

        cart
    }

    #[test]
    fn checkout_snapshots_then_clears() -> TestResult {
        let mut cart = filled_cart();

        let summary = checkout(&mut cart)?;

        assert!(cart.is_empty());
        assert_eq!(summary.item_count(), 3);
        assert_eq!(summary.total(), Money::from_minor(44_98, USD));
        assert_eq!(summary.lines().len(), 2);
        assert_eq!(
            summary.lines().first().map(|line| line.line_total),
            Some(Money::from_minor(39_98, USD))
        );

        Ok(())
    }

    #[test]
    fn empty_cart_cannot_check_out() {
        let mut cart = Cart::new(USD);

        assert!(matches!(checkout(&mut cart), Err(CheckoutError::EmptyCart)));
    }

    #[test]
    fn from_cart_leaves_cart_untouched() {
        let cart = filled_cart();

        let summary = OrderSummary::from_cart(&cart);

        assert_eq!(cart.item_count(), summary.item_count());
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn write_to_renders_lines_and_total() -> TestResult {
        let summary = OrderSummary::from_cart(&filled_cart());
        let mut out = Vec::new();

        summary.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Backpack"));
        assert!(rendered.contains("Mug"));
        assert!(rendered.contains("$44.98"));

        Ok(())
    }

    fn catalog_with_backpack() -> MockCatalog {
        let mut catalog = MockCatalog::new();

        catalog.expect_product().returning(|id| {
            if id == ProductId(1) {
                Ok(Product::new(1, "Backpack", Decimal::new(19_99, 2)))
            } else {
                Err(CatalogError::NotFound(id))
            }
        });

        catalog
    }

    #[tokio::test]
    async fn add_from_catalog_adds_one_unit_per_id() -> TestResult {
        let mut cart = Cart::new(USD);

        add_from_catalog(&mut cart, &catalog_with_backpack(), [ProductId(1), ProductId(1)]).await?;

        assert_eq!(cart.quantity_of(ProductId(1)), 2);
        assert_eq!(checkout(&mut cart)?.total(), Money::from_minor(39_98, USD));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_catalog_id_leaves_cart_untouched() {
        let mut cart = Cart::new(USD);

        let result =
            add_from_catalog(&mut cart, &catalog_with_backpack(), [ProductId(1), ProductId(7)]).await;

        assert!(matches!(result, Err(CatalogError::NotFound(ProductId(7)))));
        assert!(cart.is_empty());
    }
}
