//! Persistence
//!
//! Namespaced key-value storage used to keep the wishlist across restarts.
//! Values are opaque blobs; callers own the encoding.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod file;
pub mod memory;
pub mod queue;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use queue::WriteQueue;

/// Errors raised by key-value storage backends.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying I/O failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key is empty or contains a path separator
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous namespaced key-value storage.
#[automock]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be written.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), PersistenceError>;
}

/// Validates a storage key.
///
/// # Errors
///
/// Returns [`PersistenceError::InvalidKey`] if the key is empty, is a relative
/// path component, or contains a path separator.
pub fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);

    if invalid {
        return Err(PersistenceError::InvalidKey(key.to_string()));
    }

    Ok(())
}
