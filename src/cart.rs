//! Cart
//!
//! Volatile, in-memory cart. Lines are keyed by product id and carry a
//! snapshot of the product taken when the line was created.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    collection::{Collection, Keyed},
    pricing::to_money,
    products::{Product, ProductId},
    subscriptions::{SubscriptionKey, Subscribers},
};

/// A product snapshot with a quantity of at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// Product snapshot for this line
    pub fn product(&self) -> &Product {
        &self.product
    }
}

impl Keyed for CartLine {
    fn product_id(&self) -> ProductId {
        self.product.id
    }

    fn unit_price(&self) -> Decimal {
        self.product.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
    subscribers: Subscribers<[CartLine]>,
}

impl Cart {
    /// Create an empty cart priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            subscribers: Subscribers::new(),
        }
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Current lines, in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity held for a product, zero if there is no line for it.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, Keyed::quantity)
    }

    /// Add one unit of a product.
    ///
    /// Creates a line with quantity one, snapshotting the product, or bumps
    /// the quantity of the existing line. An existing line keeps its original
    /// snapshot.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            if line.quantity == u32::MAX {
                return;
            }

            line.quantity += 1;

            debug!(product_id = %product.id, quantity = line.quantity, "incremented cart line");
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });

            debug!(product_id = %product.id, "added cart line");
        }

        self.notify();
    }

    /// Remove the line for a product. Absent lines are ignored.
    pub fn remove_item(&mut self, id: ProductId) {
        let before = self.lines.len();

        self.lines.retain(|line| line.product.id != id);

        if self.lines.len() != before {
            debug!(product_id = %id, "removed cart line");

            self.notify();
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Products without a line
    /// are ignored rather than added.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);

            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.line_mut(id) else {
            debug!(product_id = %id, "ignored quantity update for missing cart line");

            return;
        };

        if line.quantity == quantity {
            return;
        }

        line.quantity = quantity;

        debug!(product_id = %id, quantity, "updated cart line quantity");

        self.notify();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        self.lines.clear();

        debug!("cleared cart");

        self.notify();
    }

    /// Total price of the cart as money.
    pub fn total_money(&self) -> Money<'static, Currency> {
        to_money(self.total(), self.currency)
    }

    /// Register a callback fired after every change to the cart.
    pub fn subscribe(&mut self, callback: impl FnMut(&[CartLine]) + 'static) -> SubscriptionKey {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`Cart::subscribe`].
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }

    fn notify(&mut self) {
        self.subscribers.notify(&self.lines);
    }
}

impl Collection for Cart {
    type Entry = CartLine;

    fn entries(&self) -> &[CartLine] {
        &self.lines
    }
}
