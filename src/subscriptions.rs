//! Subscriptions

use std::fmt::{Debug, Formatter, Result as FmtResult};

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Subscription Key
    pub struct SubscriptionKey;
}

type Callback<T> = Box<dyn FnMut(&T)>;

/// Registry of callbacks fired synchronously after each state change.
pub struct Subscribers<T: ?Sized> {
    callbacks: SlotMap<SubscriptionKey, Callback<T>>,
}

impl<T: ?Sized> Subscribers<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
        }
    }

    /// Register a callback, returning the key used to unsubscribe it.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionKey {
        self.callbacks.insert(Box::new(callback))
    }

    /// Remove a callback. Returns `false` if the key was not registered.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.callbacks.remove(key).is_some()
    }

    /// Invoke every callback with the current state.
    pub fn notify(&mut self, state: &T) {
        for callback in self.callbacks.values_mut() {
            callback(state);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if there are no registered callbacks.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Debug for Subscribers<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Subscribers")
            .field("len", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}
