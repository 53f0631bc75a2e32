//! respcache: HTTP response cache keyed by request URI
//!
//! # Features
//!
//! - **In-process repository** with a background reaper for expired entries
//! - **Redis repository** using native key expiration, failing open
//! - **Cache-Control / Expires** parsing, including the legacy date formats
//! - **Metrics integration**
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use respcache::prelude::*;
//! use http::HeaderMap;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = ResponseCache::in_memory(MemoryConfig::default(), ResponseCacheConfig::default());
//!
//!     let mut headers = HeaderMap::new();
//!     headers.insert("cache-control", "max-age=60".parse().unwrap());
//!     cache.admit("/index.html", "<html></html>", &headers).await;
//!
//!     match cache.lookup("/index.html").await {
//!         Some(entry) => println!("Cached: {:?}", entry.body),
//!         None => println!("Cache miss"),
//!     }
//!
//!     cache.shutdown();
//! }
//! ```

mod cache;

// Re-export core
pub use respcache_core::*;

// Re-export header handling
pub use respcache_http::{
    Directive, Expiration, ExpirationError, HeaderLookup, compute_expiration,
    compute_expiration_at, entry_from_parts, headers_from_map, headers_to_map, parse_http_date,
};

// Re-export storage
pub use respcache_storage::{ExternalRepository, RemoteStore};

#[cfg(feature = "memory")]
pub use respcache_storage::{MemoryConfig, MemoryRepository, Reaper};

#[cfg(feature = "redis")]
pub use respcache_storage::{RedisConfig, RedisRepository, RedisStore};

pub use cache::{Admission, ResponseCache, ResponseCacheConfig};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Admission, CacheEntry, CacheError, CacheKey, CacheRepository, Expiration, ResponseCache,
        ResponseCacheConfig, Result,
    };

    #[cfg(feature = "memory")]
    pub use crate::{MemoryConfig, MemoryRepository};

    #[cfg(feature = "redis")]
    pub use crate::{RedisConfig, RedisRepository};
}

#[cfg(test)]
mod tests;
