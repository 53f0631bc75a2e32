//! In-memory cache repository using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

use respcache_core::{
    CacheEntry, CacheKey, CacheMetrics, CacheRepository, CacheTier, EvictionReason, NoopMetrics,
};

use super::reaper::Reaper;

/// Configuration for the memory repository
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Initial map capacity (the map itself is unbounded)
    pub initial_capacity: usize,
    /// Period between reaper sweeps
    pub reap_interval: Duration,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1_024,
            reap_interval: Duration::from_secs(60),
        }
    }
}

impl MemoryConfig {
    /// Set the reaper period
    pub fn reap_interval(mut self, interval: Duration) -> Self {
        self.reap_interval = interval;
        self
    }

    /// Set the initial map capacity
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

/// Stored record: the entry plus the expiration taken from the key it was
/// stored under
#[derive(Debug, Clone)]
struct StoredEntry {
    entry: CacheEntry,
    expires_at: Option<SystemTime>,
}

/// In-process cache repository
///
/// Entries are keyed by URI in a `DashMap`, so request handlers and the
/// [`Reaper`] can read, insert, and delete concurrently without outside
/// locking. There is no native expiry: stale entries stay until a reaper
/// sweep removes them. Cloning creates a new handle to the SAME store.
#[derive(Clone)]
pub struct MemoryRepository {
    data: Arc<DashMap<String, StoredEntry>>,
    metrics: Arc<dyn CacheMetrics>,
    config: MemoryConfig,
}

impl MemoryRepository {
    /// Create a new memory repository
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            data: Arc::new(DashMap::with_capacity(config.initial_capacity)),
            metrics: Arc::new(NoopMetrics),
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MemoryConfig::default())
    }

    /// Report events to `metrics`
    pub fn with_metrics(mut self, metrics: impl CacheMetrics) -> Self {
        self.metrics = Arc::new(metrics);
        self
    }

    /// The configuration this repository was built with
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Start a reaper sweeping this repository every `config.reap_interval`
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_reaper(&self) -> Reaper {
        Reaper::spawn(self.clone(), self.config.reap_interval)
    }

    /// Remove every entry whose expiration is strictly before `now`
    ///
    /// Entries stored without an expiration are kept. Returns the number of
    /// entries removed.
    pub fn remove_expired(&self, now: SystemTime) -> usize {
        let mut removed = 0;
        self.data.retain(|_, stored| match stored.expires_at {
            Some(at) if at < now => {
                removed += 1;
                false
            }
            _ => true,
        });

        if removed > 0 {
            self.metrics.record_eviction(EvictionReason::Expired, removed);
        }
        removed
    }

    /// Expiration recorded for `key`'s URI, if the entry exists and has one
    pub fn expiration_of(&self, key: &CacheKey) -> Option<SystemTime> {
        self.data.get(key.uri()).and_then(|stored| stored.expires_at)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the repository is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for MemoryRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("len", &self.data.len())
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl CacheRepository for MemoryRepository {
    async fn store(&self, key: &CacheKey, entry: CacheEntry) {
        let stored = StoredEntry {
            entry,
            expires_at: key.expires_at(),
        };

        if self.data.insert(key.uri().to_string(), stored).is_some() {
            debug!(target: "respcache", key = %key.uri(), "replaced cached entry");
            self.metrics.record_eviction(EvictionReason::Replaced, 1);
        }
        self.metrics.record_store(key.uri(), CacheTier::Memory);
    }

    async fn retrieve(&self, key: &CacheKey) -> Option<CacheEntry> {
        let found = self
            .data
            .get(key.uri())
            .filter(|stored| stored.entry.is_usable())
            .map(|stored| stored.entry.clone());

        match &found {
            Some(_) => self.metrics.record_hit(key.uri(), CacheTier::Memory),
            None => self.metrics.record_miss(key.uri(), CacheTier::Memory),
        }
        found
    }

    async fn has(&self, key: &CacheKey) -> bool {
        self.data
            .get(key.uri())
            .is_some_and(|stored| stored.entry.is_usable())
    }
}
