//! Metrics trait for cache observability

use crate::CacheError;

/// Which repository produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTier {
    /// In-process map
    Memory,
    /// Remote key-value store
    External,
}

impl CacheTier {
    /// Get tier as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTier::Memory => "memory",
            CacheTier::External => "external",
        }
    }
}

/// Repository operation, used to label faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOperation {
    Store,
    Retrieve,
    Has,
    Ping,
    Delete,
}

impl CacheOperation {
    /// Get operation as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::Store => "store",
            CacheOperation::Retrieve => "retrieve",
            CacheOperation::Has => "has",
            CacheOperation::Ping => "ping",
            CacheOperation::Delete => "delete",
        }
    }
}

/// Reason an entry left the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvictionReason {
    /// Swept after its expiration passed
    Expired,
    /// Overwritten by a newer store for the same URI
    Replaced,
}

impl EvictionReason {
    /// Get reason as string label
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionReason::Expired => "expired",
            EvictionReason::Replaced => "replaced",
        }
    }
}

/// Side channel for cache events
///
/// Repositories swallow faults to stay fail-open; this is where those faults
/// remain observable. Implement it to feed Prometheus, StatsD, and so on.
pub trait CacheMetrics: Send + Sync + 'static {
    /// Record a cache hit
    fn record_hit(&self, key: &str, tier: CacheTier);

    /// Record a cache miss
    fn record_miss(&self, key: &str, tier: CacheTier);

    /// Record a successful store
    fn record_store(&self, key: &str, tier: CacheTier);

    /// Record evictions
    fn record_eviction(&self, reason: EvictionReason, count: usize);

    /// Record a fault that was degraded to a miss
    fn record_fault(&self, operation: CacheOperation, error: &CacheError);
}

/// No-op metrics implementation (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {
    #[inline]
    fn record_hit(&self, _key: &str, _tier: CacheTier) {}

    #[inline]
    fn record_miss(&self, _key: &str, _tier: CacheTier) {}

    #[inline]
    fn record_store(&self, _key: &str, _tier: CacheTier) {}

    #[inline]
    fn record_eviction(&self, _reason: EvictionReason, _count: usize) {}

    #[inline]
    fn record_fault(&self, _operation: CacheOperation, _error: &CacheError) {}
}

/// Metrics adapter using the `metrics` crate
///
/// # Example
/// ```ignore
/// use respcache_core::MetricsCrateAdapter;
///
/// // metrics::set_global_recorder(recorder);
/// let metrics = MetricsCrateAdapter::new("respcache");
/// // Emits: respcache_hits_total, respcache_faults_total, etc.
/// ```
#[cfg(feature = "metrics")]
#[derive(Debug, Clone)]
pub struct MetricsCrateAdapter {
    prefix: String,
}

#[cfg(feature = "metrics")]
impl MetricsCrateAdapter {
    /// Create a new adapter with the given metric name prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn metric_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

#[cfg(feature = "metrics")]
impl CacheMetrics for MetricsCrateAdapter {
    fn record_hit(&self, _key: &str, tier: CacheTier) {
        metrics::counter!(self.metric_name("hits_total"), "tier" => tier.as_str()).increment(1);
    }

    fn record_miss(&self, _key: &str, tier: CacheTier) {
        metrics::counter!(self.metric_name("misses_total"), "tier" => tier.as_str()).increment(1);
    }

    fn record_store(&self, _key: &str, tier: CacheTier) {
        metrics::counter!(self.metric_name("stores_total"), "tier" => tier.as_str()).increment(1);
    }

    fn record_eviction(&self, reason: EvictionReason, count: usize) {
        metrics::counter!(
            self.metric_name("evictions_total"),
            "reason" => reason.as_str()
        )
        .increment(count as u64);
    }

    fn record_fault(&self, operation: CacheOperation, _error: &CacheError) {
        metrics::counter!(
            self.metric_name("faults_total"),
            "operation" => operation.as_str()
        )
        .increment(1);
    }
}
