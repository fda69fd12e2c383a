//! In-memory key-value store

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::Mutex;

use crate::persistence::{KeyValueStore, PersistenceError, validate_key};

/// Key-value store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.values.lock().await.len()
    }

    /// Check if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.values.lock().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        validate_key(key)?;

        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), PersistenceError> {
        validate_key(key)?;

        self.values.lock().await.insert(key.to_string(), value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_latest_value() -> TestResult {
        let store = MemoryStore::new();

        store.set("wishlist", b"one".to_vec()).await?;
        store.set("wishlist", b"two".to_vec()).await?;

        assert_eq!(store.get("wishlist").await?, Some(b"two".to_vec()));
        assert_eq!(store.len().await, 1);

        Ok(())
    }

    #[tokio::test]
    async fn missing_key_is_none() -> TestResult {
        let store = MemoryStore::new();

        assert_eq!(store.get("absent").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = MemoryStore::new();

        assert!(store.is_empty().await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn rejects_invalid_keys() {
        let store = MemoryStore::new();

        assert!(matches!(
            store.set("../escape", Vec::new()).await,
            Err(PersistenceError::InvalidKey(_))
        ));
    }
}
