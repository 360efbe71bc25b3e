//! # contract: the two external collaborators of a run
//!
//! A run only ever talks to the outside world through two traits:
//! - [`Poster`]: publishes one message to the social platform.
//! - [`ObjectStore`]: reads and writes opaque bytes by key (local directory or
//!   a cloud bucket).
//!
//! ## Mocking & Testing
//! - Both traits are annotated for `mockall`; `MockPoster` and
//!   `MockObjectStore` are exported under the default `test-export-mocks`
//!   feature so downstream crates can script them too.
//!
//! ## Adding a backend
//! - Implement the trait and map transport failures onto [`PostError`]:
//!   connection-level failures become [`PostError::Connection`] so the
//!   [`RetryPolicy`] can retry them, everything else is terminal.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::error::PostError;
use crate::retry::RetryPolicy;

/// Publishes a single, already segmented message.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Poster: Send + Sync {
    async fn post(&self, message: &str) -> Result<(), PostError>;
}

/// Key/value byte storage holding the corpus and the cursor.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object stored under `key`. Fails with [`PostError::NotFound`]
    /// if nothing is stored there.
    async fn get(&self, key: &str) -> Result<Vec<u8>, PostError>;

    /// Store `bytes` under `key`, creating the object or overwriting it.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), PostError>;
}

/// Clients built once at process start and shared by every component of a run.
#[derive(Clone)]
pub struct Context {
    pub store: Arc<dyn ObjectStore>,
    pub poster: Arc<dyn Poster>,
    pub retry: RetryPolicy,
}

impl Context {
    pub fn new(store: Arc<dyn ObjectStore>, poster: Arc<dyn Poster>, retry: RetryPolicy) -> Self {
        Self {
            store,
            poster,
            retry,
        }
    }
}
