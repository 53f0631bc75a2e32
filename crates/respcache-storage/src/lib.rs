//! respcache-storage: Repository implementations for respcache

pub mod external;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis;

pub use external::{ExternalRepository, RemoteStore};

#[cfg(feature = "memory")]
pub use memory::{MemoryConfig, MemoryRepository, Reaper};

#[cfg(feature = "redis")]
pub use self::redis::{RedisConfig, RedisRepository, RedisStore};
