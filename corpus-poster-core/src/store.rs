//! Corpus and cursor persistence on top of an [`ObjectStore`].
//!
//! Both values are plain JSON: the corpus is an array of strings, the cursor a
//! single non-negative integer. [`LocalFileStore`] is the on-disk backend; the
//! CLI crate adds a cloud bucket backend.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::contract::ObjectStore;
use crate::error::PostError;
use crate::retry::RetryPolicy;

/// Stores each key as a file below `root`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ObjectStore for LocalFileStore {
    async fn get(&self, key: &str) -> Result<Vec<u8>, PostError> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PostError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to read local object");
                Err(PostError::unavailable(key, e))
            }
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), PostError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PostError::unavailable(key, e))?;
        }
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!(path = %path.display(), error = ?e, "Failed to write local object");
            PostError::unavailable(key, e)
        })
    }
}

/// Loads the ordered list of postable units.
pub struct CorpusStore {
    store: Arc<dyn ObjectStore>,
    key: String,
    retry: RetryPolicy,
}

impl CorpusStore {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            retry,
        }
    }

    /// Read and parse the whole corpus. Every failure, a missing object
    /// included, is reported as [`PostError::StoreUnavailable`].
    pub async fn load(&self) -> Result<Vec<String>, PostError> {
        let bytes = self
            .retry
            .run("load_corpus", || self.store.get(&self.key))
            .await
            .map_err(|e| {
                if matches!(e, PostError::NotFound { .. }) {
                    PostError::unavailable(&self.key, e)
                } else {
                    e
                }
            })?;
        let corpus: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| {
            error!(key = %self.key, error = %e, "Corpus is not a JSON array of strings");
            PostError::unavailable(&self.key, e)
        })?;
        info!(key = %self.key, units = corpus.len(), "Corpus loaded");
        Ok(corpus)
    }
}

/// Loads and saves the index of the next unit to post.
pub struct CursorStore {
    store: Arc<dyn ObjectStore>,
    key: String,
    retry: RetryPolicy,
}

impl CursorStore {
    pub fn new(store: Arc<dyn ObjectStore>, key: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            retry,
        }
    }

    pub async fn load(&self) -> Result<usize, PostError> {
        let bytes = self
            .retry
            .run("load_cursor", || self.store.get(&self.key))
            .await?;
        let index: usize = serde_json::from_slice(&bytes).map_err(|e| {
            error!(key = %self.key, error = %e, "Cursor is not a non-negative JSON integer");
            PostError::unavailable(&self.key, e)
        })?;
        info!(key = %self.key, index, "Cursor loaded");
        Ok(index)
    }

    /// Overwrite the persisted cursor. Last writer wins.
    pub async fn save(&self, index: usize) -> Result<(), PostError> {
        let bytes = serde_json::to_vec(&index).map_err(|e| PostError::unavailable(&self.key, e))?;
        self.retry
            .run("save_cursor", || self.store.put(&self.key, bytes.clone()))
            .await?;
        info!(key = %self.key, index, "Cursor saved");
        Ok(())
    }
}
