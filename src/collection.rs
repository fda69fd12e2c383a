//! Collections
//!
//! The read side shared by every store: keyed lookup plus the two aggregates
//! presentation code renders (total price and item count). Aggregates are
//! folded over the entries on every call.

use rust_decimal::Decimal;

use crate::{pricing::line_total, products::ProductId};

/// An entry in a collection, identified by a product id.
pub trait Keyed {
    /// Product id of this entry
    fn product_id(&self) -> ProductId;

    /// Unit price of this entry
    fn unit_price(&self) -> Decimal;

    /// Number of units this entry represents
    fn quantity(&self) -> u32 {
        1
    }

    /// Price of all units of this entry
    fn subtotal(&self) -> Decimal {
        line_total(self.unit_price(), self.quantity())
    }
}

/// Keyed collection of entries with unique product ids.
pub trait Collection {
    /// Entry type
    type Entry: Keyed;

    /// Current entries, in insertion order.
    fn entries(&self) -> &[Self::Entry];

    /// Looks up the entry for a product.
    fn get(&self, id: ProductId) -> Option<&Self::Entry> {
        self.entries().iter().find(|entry| entry.product_id() == id)
    }

    /// Check if the collection holds an entry for a product.
    fn contains(&self, id: ProductId) -> bool {
        self.entries().iter().any(|entry| entry.product_id() == id)
    }

    /// Number of distinct entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Check if the collection is empty.
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Sum of quantities over all entries.
    fn item_count(&self) -> u64 {
        self.entries()
            .iter()
            .map(|entry| u64::from(entry.quantity()))
            .sum()
    }

    /// Sum of `price × quantity` over all entries, zero when empty.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    fn total(&self) -> Decimal {
        self.entries()
            .iter()
            .fold(Decimal::ZERO, |total, entry| total.saturating_add(entry.subtotal()))
    }
}
