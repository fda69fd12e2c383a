//! Tote
//!
//! Client-side shopping state: a volatile cart with quantity-weighted
//! aggregates and a wishlist that survives restarts through a pluggable
//! key-value store. Stores are plain values owned by a [`context::StoreContext`];
//! every mutation is synchronous and observers are notified before it returns.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod collection;
pub mod config;
pub mod context;
pub mod fixtures;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod subscriptions;
pub mod wishlist;
