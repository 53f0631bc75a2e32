//! Core traits for cache operations

mod metrics;
mod repository;
#[cfg(feature = "tracing")]
mod tracing;

pub use self::metrics::{CacheMetrics, CacheOperation, CacheTier, EvictionReason, NoopMetrics};
pub use self::repository::CacheRepository;

#[cfg(feature = "metrics")]
pub use self::metrics::MetricsCrateAdapter;

#[cfg(feature = "tracing")]
pub use self::tracing::TracingMetrics;
