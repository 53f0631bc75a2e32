//! Redis-backed repository

mod config;
mod store;

pub use config::RedisConfig;
pub use store::RedisStore;

use respcache_core::{CacheMetrics, Result};

use crate::external::ExternalRepository;

/// External repository over a pooled Redis connection
pub type RedisRepository = ExternalRepository<RedisStore>;

impl ExternalRepository<RedisStore> {
    /// Connect to Redis at `config.url`
    ///
    /// Errors only on an unusable URL. An unreachable server is logged and
    /// the repository degrades to misses until it comes back.
    pub async fn connect(config: RedisConfig) -> Result<Self> {
        Ok(Self::new(RedisStore::connect(config)?).await)
    }

    /// Connect and report events to `metrics`
    pub async fn connect_with_metrics(
        config: RedisConfig,
        metrics: impl CacheMetrics,
    ) -> Result<Self> {
        Ok(Self::with_metrics(RedisStore::connect(config)?, metrics).await)
    }
}
