//! File-backed key-value store
//!
//! One file per key under a base directory. Writes go to a sibling temp
//! file first and are renamed into place, so a reader never sees a torn
//! value.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::persistence::{KeyValueStore, PersistenceError, validate_key};

/// Key-value store persisted as files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_path`. The directory is created on first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Directory holding the stored values.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        validate_key(key)?;

        Ok(self.base_path.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.path_for(key)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        let tmp_path = self.base_path.join(format!("{key}.json.tmp"));

        fs::create_dir_all(&self.base_path).await?;
        fs::write(&tmp_path, &value).await?;
        fs::rename(&tmp_path, &path).await?;

        debug!(key, bytes = value.len(), path = %path.display(), "wrote value");

        Ok(())
    }
}
