//! Cache repository trait

use async_trait::async_trait;
use std::sync::Arc;

use crate::{CacheEntry, CacheKey};

/// Where captured HTTP responses are kept
///
/// Implementations include the in-process map and the Redis-backed
/// repository. None of these operations report errors: a repository that
/// cannot reach its storage behaves as if the entry were not there, so a
/// cache outage never breaks the request it sits in front of.
#[async_trait]
pub trait CacheRepository: Send + Sync + 'static {
    /// Store an entry under the key's URI, replacing any previous entry
    ///
    /// The key's expiration, if any, decides when the entry goes stale.
    /// Entries without a body are not worth serving and may be ignored.
    async fn store(&self, key: &CacheKey, entry: CacheEntry);

    /// Get the entry for the key's URI
    ///
    /// Returns `None` if nothing was stored, it was evicted, or the backend
    /// could not be reached.
    async fn retrieve(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Check if an entry exists for the key's URI
    async fn has(&self, key: &CacheKey) -> bool;
}

#[async_trait]
impl<R: CacheRepository + ?Sized> CacheRepository for Arc<R> {
    async fn store(&self, key: &CacheKey, entry: CacheEntry) {
        (**self).store(key, entry).await
    }

    async fn retrieve(&self, key: &CacheKey) -> Option<CacheEntry> {
        (**self).retrieve(key).await
    }

    async fn has(&self, key: &CacheKey) -> bool {
        (**self).has(key).await
    }
}
