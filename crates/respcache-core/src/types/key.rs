//! Cache key type

use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Identity of a cacheable resource
///
/// Two keys are equal iff their URIs are equal. The expiration instant rides
/// along for the store path and never takes part in equality or hashing, so a
/// lookup key built with [`CacheKey::from_uri`] finds an entry stored with an
/// expiration.
#[derive(Debug, Clone)]
pub struct CacheKey {
    uri: String,
    expires_at: Option<SystemTime>,
}

impl CacheKey {
    /// Key without an expiration, used for lookups
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            expires_at: None,
        }
    }

    /// Key carrying the instant after which the entry is stale
    pub fn with_expiration(uri: impl Into<String>, expires_at: SystemTime) -> Self {
        Self {
            uri: uri.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Key with an optional expiration
    pub fn new(uri: impl Into<String>, expires_at: Option<SystemTime>) -> Self {
        Self {
            uri: uri.into(),
            expires_at,
        }
    }

    /// The resource identifier
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// When the entry stored under this key expires
    pub fn expires_at(&self) -> Option<SystemTime> {
        self.expires_at
    }

    /// Whether the expiration is strictly before `now`
    ///
    /// Keys without an expiration never expire.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        matches!(self.expires_at, Some(at) if at < now)
    }
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl From<&str> for CacheKey {
    fn from(uri: &str) -> Self {
        Self::from_uri(uri)
    }
}

impl From<String> for CacheKey {
    fn from(uri: String) -> Self {
        Self::from_uri(uri)
    }
}
