//! Configuration for the Redis repository

use std::time::Duration;

/// Configuration for Redis connection and key layout
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,

    /// Connection pool size
    pub pool_size: u32,

    /// How long an operation waits for a connection before failing
    ///
    /// The repositories enforce no timeout of their own; this is the bound
    /// on how long a request can block on the remote store.
    pub connection_timeout: Duration,

    /// Optional key prefix; by default the Redis key is the request URI
    pub key_prefix: Option<String>,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            pool_size: 10,
            connection_timeout: Duration::from_secs(5),
            key_prefix: None,
        }
    }
}

impl RedisConfig {
    /// Create new config with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set pool size
    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Set connection timeout
    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set key prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// The Redis key used for `uri`
    pub fn key_for(&self, uri: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, uri),
            None => uri.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_is_uri() {
        let config = RedisConfig::default();
        assert_eq!(config.key_for("/index.html"), "/index.html");
    }

    #[test]
    fn test_prefixed_key() {
        let config = RedisConfig::new("redis://cache:6379").prefix("resp");
        assert_eq!(config.key_for("/a"), "resp:/a");
        assert_eq!(config.url, "redis://cache:6379");
    }
}
