//! Tote prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    catalog::{Catalog, CatalogError, FixtureCatalog},
    checkout::{CheckoutError, OrderLine, OrderSummary, add_from_catalog, checkout},
    collection::{Collection, Keyed},
    config::{ConfigError, StoreConfig},
    context::StoreContext,
    fixtures::{Fixture, FixtureError},
    persistence::{FileStore, KeyValueStore, MemoryStore, PersistenceError, WriteQueue},
    products::{Product, ProductId, Rating},
    subscriptions::SubscriptionKey,
    wishlist::{WISHLIST_KEY, Wishlist},
};
