//! Store Context
//!
//! The application root owns exactly one [`StoreContext`] and passes it to
//! whatever needs the cart or wishlist. Tests build a fresh one each.

use std::sync::Arc;

use rusty_money::iso::Currency;
use tracing::info;

use crate::{
    cart::Cart,
    collection::Collection,
    config::{ConfigError, StoreConfig},
    persistence::KeyValueStore,
    wishlist::Wishlist,
};

/// Cart and wishlist for one running application.
#[derive(Debug)]
pub struct StoreContext {
    /// Volatile cart
    pub cart: Cart,

    /// Persisted wishlist
    pub wishlist: Wishlist,
}

impl StoreContext {
    /// Build a context with a volatile cart and a wishlist rehydrated from `storage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured currency is not supported.
    pub async fn init(
        storage: Arc<dyn KeyValueStore>,
        config: &StoreConfig,
    ) -> Result<Self, ConfigError> {
        let currency = config.currency()?;
        let wishlist = Wishlist::load(storage, &config.wishlist_key).await;

        info!(
            currency = currency.iso_alpha_code,
            wishlist_entries = wishlist.len(),
            "initialised stores"
        );

        Ok(Self {
            cart: Cart::new(currency),
            wishlist,
        })
    }

    /// Build a context where neither store is persisted.
    pub fn in_memory(currency: &'static Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            wishlist: Wishlist::new(),
        }
    }

    /// Wait for pending wishlist writes.
    pub async fn flush(&self) {
        self.wishlist.flush().await;
    }
}
