use async_trait::async_trait;
use bb8::{Pool, PooledConnection, RunError};
use bb8_redis::RedisConnectionManager;
use parking_lot::Mutex;
use redis::{AsyncCommands, RedisError};
use respcache_core::{CacheError, Result};
use tracing::debug;

use super::config::RedisConfig;
use crate::external::RemoteStore;

/// Pooled Redis connection handle
///
/// The pool connects lazily, so constructing a store never touches the
/// network. After [`RemoteStore::close`] every operation fails with
/// [`CacheError::Closed`].
pub struct RedisStore {
    pool: Mutex<Option<Pool<RedisConnectionManager>>>,
    config: RedisConfig,
}

impl RedisStore {
    /// Build a pool for `config.url`
    ///
    /// Fails only if the URL cannot be parsed.
    pub fn connect(config: RedisConfig) -> Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);

        Ok(Self {
            pool: Mutex::new(Some(pool)),
            config,
        })
    }

    /// The configuration this store was built with
    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Get connection from pool
    async fn get_connection(&self) -> Result<PooledConnection<'static, RedisConnectionManager>> {
        let pool = self.pool.lock().clone().ok_or(CacheError::Closed)?;
        pool.get_owned().await.map_err(pool_error)
    }
}

#[async_trait]
impl RemoteStore for RedisStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn set(&self, key: &str, value: Vec<u8>, expire_at: Option<u64>) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let key = self.config.key_for(key);

        // Plain SET drops any previous TTL; EXPIREAT in the same transaction
        // so the value is never visible without its expiration.
        let mut pipe = redis::pipe();
        pipe.atomic().set(&key, value).ignore();
        if let Some(at) = expire_at {
            pipe.cmd("EXPIREAT").arg(&key).arg(at).ignore();
        }

        pipe.query_async::<()>(&mut *conn)
            .await
            .map_err(backend_error)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.get_connection().await?;
        conn.get(self.config.key_for(key))
            .await
            .map_err(backend_error)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        conn.exists(self.config.key_for(key))
            .await
            .map_err(backend_error)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let removed: i64 = conn
            .del(self.config.key_for(key))
            .await
            .map_err(backend_error)?;
        Ok(removed > 0)
    }

    async fn close(&self) {
        if self.pool.lock().take().is_some() {
            debug!(target: "respcache", url = %self.config.url, "released redis pool");
        }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("url", &self.config.url)
            .field("open", &self.pool.lock().is_some())
            .finish()
    }
}

fn pool_error(err: RunError<RedisError>) -> CacheError {
    match err {
        RunError::User(e) => CacheError::Connection(e.to_string()),
        RunError::TimedOut => CacheError::Timeout,
    }
}

fn backend_error(err: RedisError) -> CacheError {
    CacheError::Backend(err.to_string())
}
