//! Wishlist
//!
//! Set of favourited products. A persisted wishlist writes a full snapshot
//! of its entries through a [`WriteQueue`] after every mutating call and is
//! rehydrated from the same key on load. Storage failures never reach the
//! caller: a missing or unreadable snapshot loads as an empty wishlist, and
//! a failed write only loses that write.

use std::sync::Arc;

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::{
    collection::{Collection, Keyed},
    persistence::{KeyValueStore, WriteQueue},
    products::{Product, ProductId},
    subscriptions::{SubscriptionKey, Subscribers},
};

/// Default storage key for the wishlist snapshot.
pub const WISHLIST_KEY: &str = "wishlist-storage";

impl Keyed for Product {
    fn product_id(&self) -> ProductId {
        self.id
    }

    fn unit_price(&self) -> Decimal {
        self.price
    }
}

/// Wishlist
#[derive(Debug, Default)]
pub struct Wishlist {
    entries: Vec<Product>,
    writer: Option<WriteQueue>,
    subscribers: Subscribers<[Product]>,
}

impl Wishlist {
    /// Create an empty wishlist that is not persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a wishlist from `storage`, persisting later changes under `key`.
    ///
    /// Must be called from within a Tokio runtime, which runs the writer.
    #[tracing::instrument(skip_all, fields(key = %key.as_ref()))]
    pub async fn load(storage: Arc<dyn KeyValueStore>, key: impl AsRef<str>) -> Self {
        let key = key.as_ref();

        let entries = match storage.get(key).await {
            Ok(Some(snapshot)) => decode(&snapshot),
            Ok(None) => {
                debug!("no stored wishlist");

                Vec::new()
            }
            Err(error) => {
                warn!(%error, "failed to read stored wishlist; starting empty");

                Vec::new()
            }
        };

        debug!(entries = entries.len(), "loaded wishlist");

        Self {
            entries,
            writer: Some(WriteQueue::spawn(storage, key)),
            subscribers: Subscribers::new(),
        }
    }

    /// Current entries, in the order they were added.
    pub fn items(&self) -> &[Product] {
        &self.entries
    }

    /// Check if a product is in the wishlist.
    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.contains(id)
    }

    /// Add a product. Adding a product that is already present changes nothing.
    pub fn add_item(&mut self, product: &Product) {
        if !self.contains(product.id) {
            self.entries.push(product.clone());

            debug!(product_id = %product.id, "added wishlist entry");

            self.subscribers.notify(&self.entries);
        }

        self.persist();
    }

    /// Remove a product. Absent products are ignored.
    pub fn remove_item(&mut self, id: ProductId) {
        let before = self.entries.len();

        self.entries.retain(|entry| entry.id != id);

        if self.entries.len() != before {
            debug!(product_id = %id, "removed wishlist entry");

            self.subscribers.notify(&self.entries);
        }

        self.persist();
    }

    /// Add the product if absent, remove it otherwise. Returns the new membership.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            self.remove_item(product.id);

            false
        } else {
            self.add_item(product);

            true
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();

            debug!("cleared wishlist");

            self.subscribers.notify(&self.entries);
        }

        self.persist();
    }

    /// Wait for every snapshot written so far to reach storage.
    ///
    /// Returns immediately for a wishlist without storage.
    pub async fn flush(&self) {
        if let Some(writer) = &self.writer {
            writer.flush().await;
        }
    }

    /// Register a callback fired after every change to the wishlist.
    pub fn subscribe(&mut self, callback: impl FnMut(&[Product]) + 'static) -> SubscriptionKey {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`Wishlist::subscribe`].
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    fn persist(&self) {
        let Some(writer) = &self.writer else {
            return;
        };

        match serde_json::to_vec(&self.entries) {
            Ok(snapshot) => writer.enqueue(snapshot),
            Err(error) => warn!(key = writer.key(), %error, "failed to encode wishlist"),
        }
    }
}

impl Collection for Wishlist {
    type Entry = Product;

    fn entries(&self) -> &[Product] {
        &self.entries
    }
}

/// Decodes a stored snapshot, keeping the first entry for each product id.
///
/// Entries that do not decode are skipped; a snapshot that is not a JSON
/// array loads as empty.
fn decode(snapshot: &[u8]) -> Vec<Product> {
    let values: Vec<serde_json::Value> = match serde_json::from_slice(snapshot) {
        Ok(values) => values,
        Err(error) => {
            warn!(%error, "stored wishlist is corrupt; starting empty");

            return Vec::new();
        }
    };

    let mut seen = FxHashSet::default();

    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Product>(value) {
            Ok(product) => Some(product),
            Err(error) => {
                warn!(%error, "skipped unreadable wishlist entry");

                None
            }
        })
        .filter(|product| seen.insert(product.id))
        .collect()
}
