//! Remote key-value store abstraction

use async_trait::async_trait;
use respcache_core::Result;

/// Operations the external repository needs from a remote key-value store
///
/// Keys are request URIs; the store may lay them out differently (e.g. with
/// a prefix). Errors are returned as-is here; the repository above decides
/// that they degrade to a miss.
#[async_trait]
pub trait RemoteStore: Send + Sync + 'static {
    /// Check connectivity
    async fn ping(&self) -> Result<()>;

    /// Write `value` under `key`
    ///
    /// Without `expire_at` the value stays until overwritten. With it, the
    /// store deletes the key at that absolute Unix time in seconds. An
    /// overwrite always clears any previous expiration.
    async fn set(&self, key: &str, value: Vec<u8>, expire_at: Option<u64>) -> Result<()>;

    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Check if `key` exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Delete `key`, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Release the connection handle; later calls fail
    async fn close(&self);
}
