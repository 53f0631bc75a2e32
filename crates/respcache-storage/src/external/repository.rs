//! Cache repository backed by a remote store with native expiration

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use respcache_core::{
    CacheEntry, CacheError, CacheKey, CacheMetrics, CacheOperation, CacheRepository, CacheTier,
    Lookup, NoopMetrics, Result,
};

use super::store::RemoteStore;

/// Repository delegating to a [`RemoteStore`]
///
/// Entries are written as JSON (`{"body": ..., "headers": {...}}`) under the
/// request URI, and the store's own expiration removes them; no reaper is
/// involved. Every remote fault is logged and reported to the metrics hook,
/// then degraded: `retrieve` misses, `has` answers `false`, and `store` has no
/// effect.
pub struct ExternalRepository<S: RemoteStore> {
    remote: S,
    metrics: Arc<dyn CacheMetrics>,
}

impl<S: RemoteStore> ExternalRepository<S> {
    /// Wrap `remote`, probing connectivity once
    ///
    /// A failed probe is logged; the repository is still returned and
    /// behaves as an empty cache until the store is reachable.
    pub async fn new(remote: S) -> Self {
        Self::with_metrics(remote, NoopMetrics).await
    }

    /// Wrap `remote` and report events to `metrics`, probing connectivity once
    pub async fn with_metrics(remote: S, metrics: impl CacheMetrics) -> Self {
        let repo = Self {
            remote,
            metrics: Arc::new(metrics),
        };
        if let Err(err) = repo.remote.ping().await {
            repo.report(CacheOperation::Ping, None, &err);
        }
        repo
    }

    /// The underlying store
    pub fn remote(&self) -> &S {
        &self.remote
    }

    /// Store without collapsing faults
    ///
    /// Entries without a body are skipped without contacting the store.
    pub async fn try_store(&self, key: &CacheKey, entry: &CacheEntry) -> Result<()> {
        if !entry.is_usable() {
            return Ok(());
        }

        let value =
            serde_json::to_vec(entry).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let expire_at = key.expires_at().map(unix_seconds);

        self.remote.set(key.uri(), value, expire_at).await?;
        self.metrics.record_store(key.uri(), CacheTier::External);
        Ok(())
    }

    /// Read without collapsing faults
    pub async fn lookup(&self, key: &CacheKey) -> Lookup<CacheEntry> {
        match Lookup::from(self.remote.get(key.uri()).await) {
            Lookup::Found(bytes) => decode(bytes).map_or_else(Lookup::Fault, Lookup::Found),
            Lookup::Absent => Lookup::Absent,
            Lookup::Fault(err) => Lookup::Fault(err),
        }
    }

    /// Existence check without collapsing faults
    pub async fn contains(&self, key: &CacheKey) -> Lookup<bool> {
        match self.remote.exists(key.uri()).await {
            Ok(exists) => Lookup::Found(exists),
            Err(err) => Lookup::Fault(err),
        }
    }

    /// Remove the entry for `key`'s URI, returning whether one existed
    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        match self.remote.delete(key.uri()).await {
            Ok(existed) => existed,
            Err(err) => {
                self.report(CacheOperation::Delete, Some(key), &err);
                false
            }
        }
    }

    /// Release the remote handle
    ///
    /// Consumes the repository, so the handle is released exactly once.
    /// Dropping the repository without calling this releases it too.
    pub async fn close(self) {
        self.remote.close().await;
        info!(target: "respcache", "closed external cache repository");
    }

    fn report(&self, operation: CacheOperation, key: Option<&CacheKey>, err: &CacheError) {
        warn!(
            target: "respcache",
            operation = operation.as_str(),
            key = key.map(CacheKey::uri),
            error = %err,
            "remote cache operation failed; treating as miss"
        );
        self.metrics.record_fault(operation, err);
    }
}

#[async_trait]
impl<S: RemoteStore> CacheRepository for ExternalRepository<S> {
    async fn store(&self, key: &CacheKey, entry: CacheEntry) {
        if let Err(err) = self.try_store(key, &entry).await {
            self.report(CacheOperation::Store, Some(key), &err);
        }
    }

    async fn retrieve(&self, key: &CacheKey) -> Option<CacheEntry> {
        let lookup = self.lookup(key).await;
        match &lookup {
            Lookup::Found(_) => self.metrics.record_hit(key.uri(), CacheTier::External),
            Lookup::Absent => self.metrics.record_miss(key.uri(), CacheTier::External),
            Lookup::Fault(err) => self.report(CacheOperation::Retrieve, Some(key), err),
        }
        lookup.found()
    }

    async fn has(&self, key: &CacheKey) -> bool {
        let lookup = self.contains(key).await;
        if let Some(err) = lookup.fault() {
            self.report(CacheOperation::Has, Some(key), err);
        }
        lookup.exists()
    }
}

impl<S: RemoteStore> fmt::Debug for ExternalRepository<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalRepository").finish_non_exhaustive()
    }
}

/// Decode a stored value
///
/// Values that are not a serialized entry are taken as a bare UTF-8 body
/// written without headers.
fn decode(bytes: Vec<u8>) -> Result<CacheEntry> {
    if let Ok(entry) = serde_json::from_slice::<CacheEntry>(&bytes) {
        if entry.is_usable() {
            return Ok(entry);
        }
    }
    String::from_utf8(bytes)
        .map(CacheEntry::new)
        .map_err(|e| CacheError::Deserialization(e.to_string()))
}

fn unix_seconds(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
