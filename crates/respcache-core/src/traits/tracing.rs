use crate::{CacheError, CacheMetrics, CacheOperation, CacheTier, EvictionReason};
use tracing::{debug, warn};

/// Metrics adapter that logs events via `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingMetrics {
    /// Service name/prefix (optional)
    service_name: Option<String>,
}

impl TracingMetrics {
    /// Create new tracing metrics adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with service name prefix
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

impl CacheMetrics for TracingMetrics {
    fn record_hit(&self, key: &str, tier: CacheTier) {
        debug!(
            target: "respcache",
            event = "hit",
            key = %key,
            tier = tier.as_str(),
            service = ?self.service_name,
            "Cache Hit"
        );
    }

    fn record_miss(&self, key: &str, tier: CacheTier) {
        debug!(
            target: "respcache",
            event = "miss",
            key = %key,
            tier = tier.as_str(),
            service = ?self.service_name,
            "Cache Miss"
        );
    }

    fn record_store(&self, key: &str, tier: CacheTier) {
        tracing::trace!(
            target: "respcache",
            event = "store",
            key = %key,
            tier = tier.as_str(),
            service = ?self.service_name,
            "Cache Store"
        );
    }

    fn record_eviction(&self, reason: EvictionReason, count: usize) {
        debug!(
            target: "respcache",
            event = "eviction",
            reason = reason.as_str(),
            count = count,
            service = ?self.service_name,
            "Cache Eviction"
        );
    }

    fn record_fault(&self, operation: CacheOperation, error: &CacheError) {
        warn!(
            target: "respcache",
            event = "fault",
            operation = operation.as_str(),
            error = %error,
            service = ?self.service_name,
            "Cache Fault"
        );
    }
}
