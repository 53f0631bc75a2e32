//! Response cache facade
//!
//! Mirrors what a request pipeline does around a handler: look the URI up
//! before running the handler, and after it runs decide from the response
//! headers whether and until when the body may be stored.

use http::HeaderMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

use respcache_core::{CacheEntry, CacheKey, CacheRepository};
use respcache_http::{Expiration, ExpirationError, compute_expiration, entry_from_parts};

#[cfg(feature = "memory")]
use respcache_storage::{MemoryConfig, MemoryRepository, Reaper};

/// Configuration for [`ResponseCache`]
#[derive(Debug, Clone, Default)]
pub struct ResponseCacheConfig {
    /// Lifetime applied when a response carries neither `Cache-Control` nor
    /// `Expires`; `None` caches such responses indefinitely
    pub default_ttl: Option<Duration>,
}

impl ResponseCacheConfig {
    /// Create config with specific default TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            default_ttl: Some(ttl),
        }
    }
}

/// What [`ResponseCache::admit`] did with a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Handed to the repository, expiring at the given instant if any
    Stored { expires_at: Option<SystemTime> },
    /// `Cache-Control: no-cache`; nothing stored
    SkippedNoCache,
    /// The response had no body
    SkippedEmpty,
    /// An expiration header could not be parsed; nothing stored
    Rejected(ExpirationError),
}

impl Admission {
    /// Check if the response was stored
    pub fn is_stored(&self) -> bool {
        matches!(self, Admission::Stored { .. })
    }
}

/// Response cache over any [`CacheRepository`]
pub struct ResponseCache<R: CacheRepository> {
    repository: Arc<R>,
    config: ResponseCacheConfig,
    #[cfg(feature = "memory")]
    reaper: Option<Reaper>,
}

impl<R: CacheRepository> ResponseCache<R> {
    /// Create a new cache over `repository`
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, ResponseCacheConfig::default())
    }

    /// Create with custom config
    pub fn with_config(repository: R, config: ResponseCacheConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
            #[cfg(feature = "memory")]
            reaper: None,
        }
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The configuration this cache was built with
    pub fn config(&self) -> &ResponseCacheConfig {
        &self.config
    }

    /// Cached entry for `uri`, if any
    ///
    /// An entry reported present that is gone by the time it is read (a
    /// reaper sweep or remote expiry in between) is a miss.
    pub async fn lookup(&self, uri: &str) -> Option<CacheEntry> {
        let key = CacheKey::from_uri(uri);
        if !self.repository.has(&key).await {
            return None;
        }

        let entry = self.repository.retrieve(&key).await;
        if entry.is_none() {
            debug!(target: "respcache", key = %uri, "entry vanished between has and retrieve");
        }
        entry
    }

    /// Decide from `headers` whether to store `body` for `uri`, and store it
    pub async fn admit(&self, uri: &str, body: impl Into<String>, headers: &HeaderMap) -> Admission {
        self.admit_entry(uri, entry_from_parts(body, headers)).await
    }

    /// Like [`admit`](Self::admit), for an already assembled entry
    pub async fn admit_entry(&self, uri: &str, entry: CacheEntry) -> Admission {
        if !entry.is_usable() {
            return Admission::SkippedEmpty;
        }

        let expires_at = match compute_expiration(&entry) {
            Ok(Expiration::At(at)) => Some(at),
            Ok(Expiration::Unspecified) => self
                .config
                .default_ttl
                .and_then(|ttl| SystemTime::now().checked_add(ttl)),
            Ok(Expiration::NoCache) => {
                debug!(target: "respcache", key = %uri, "response marked no-cache; not stored");
                return Admission::SkippedNoCache;
            }
            Err(err) => {
                warn!(target: "respcache", key = %uri, error = %err, "unparsable expiration; not stored");
                return Admission::Rejected(err);
            }
        };

        let key = CacheKey::new(uri, expires_at);
        self.repository.store(&key, entry).await;
        Admission::Stored { expires_at }
    }

    /// Stop background work owned by this cache
    ///
    /// Calling it again is a no-op.
    pub fn shutdown(&self) {
        #[cfg(feature = "memory")]
        if let Some(reaper) = &self.reaper {
            reaper.shutdown();
        }
    }
}

#[cfg(feature = "memory")]
impl ResponseCache<MemoryRepository> {
    /// In-process cache with its reaper running
    ///
    /// Must be called from within a Tokio runtime.
    pub fn in_memory(memory: MemoryConfig, config: ResponseCacheConfig) -> Self {
        let repository = MemoryRepository::new(memory);
        let reaper = repository.spawn_reaper();
        Self::with_config(repository, config).with_reaper(reaper)
    }
}

#[cfg(feature = "memory")]
impl<R: CacheRepository> ResponseCache<R> {
    /// Attach a reaper to be stopped by [`shutdown`](Self::shutdown)
    pub fn with_reaper(mut self, reaper: Reaper) -> Self {
        self.reaper = Some(reaper);
        self
    }

    /// The attached reaper, if any
    pub fn reaper(&self) -> Option<&Reaper> {
        self.reaper.as_ref()
    }
}

impl<R: CacheRepository> std::fmt::Debug for ResponseCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
