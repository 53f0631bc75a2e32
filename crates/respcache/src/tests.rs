//! Integration tests for ResponseCache

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::{ExpirationError, ExternalRepository, RemoteStore};
    use async_trait::async_trait;
    use http::HeaderMap;
    use std::time::{Duration, SystemTime};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, value.parse().unwrap());
        }
        map
    }

    /// Remote store that is never reachable
    struct Unreachable;

    #[async_trait]
    impl RemoteStore for Unreachable {
        async fn ping(&self) -> Result<()> {
            Err(CacheError::Connection("connection refused".to_string()))
        }
        async fn set(&self, _key: &str, _value: Vec<u8>, _expire_at: Option<u64>) -> Result<()> {
            Err(CacheError::Connection("connection refused".to_string()))
        }
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(CacheError::Connection("connection refused".to_string()))
        }
        async fn exists(&self, _key: &str) -> Result<bool> {
            Err(CacheError::Connection("connection refused".to_string()))
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            Err(CacheError::Connection("connection refused".to_string()))
        }
        async fn close(&self) {}
    }

    #[tokio::test]
    async fn test_admit_then_lookup() {
        let cache = ResponseCache::new(MemoryRepository::with_defaults());
        let response = headers(&[("cache-control", "max-age=60"), ("content-type", "text/html")]);

        let admission = cache.admit("/index.html", "<html></html>", &response).await;
        assert!(admission.is_stored());

        let entry = cache.lookup("/index.html").await.unwrap();
        assert_eq!(entry.body.as_deref(), Some("<html></html>"));
        assert_eq!(entry.get_header("Content-Type"), Some("text/html"));
    }

    #[tokio::test]
    async fn test_max_age_sets_key_expiration() {
        let cache = ResponseCache::new(MemoryRepository::with_defaults());
        let before = SystemTime::now();

        let admission = cache
            .admit("/a", "a", &headers(&[("cache-control", "max-age=60")]))
            .await;

        let Admission::Stored { expires_at: Some(at) } = admission else {
            panic!("expected a stored entry with expiration, got {admission:?}");
        };
        assert!(at >= before + Duration::from_secs(60));
        assert!(at <= SystemTime::now() + Duration::from_secs(60));
        assert_eq!(
            cache.repository().expiration_of(&CacheKey::from_uri("/a")),
            Some(at)
        );
    }

    #[tokio::test]
    async fn test_no_cache_is_not_stored() {
        let cache = ResponseCache::new(MemoryRepository::with_defaults());

        let admission = cache
            .admit("/private", "secret", &headers(&[("cache-control", "no-cache")]))
            .await;

        assert_eq!(admission, Admission::SkippedNoCache);
        assert!(cache.lookup("/private").await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_expiration_is_rejected() {
        let cache = ResponseCache::new(MemoryRepository::with_defaults());

        let admission = cache
            .admit("/bad", "x", &headers(&[("expires", "tomorrow-ish")]))
            .await;

        assert!(matches!(
            admission,
            Admission::Rejected(ExpirationError::InvalidDate(_))
        ));
        assert!(cache.repository().is_empty());
    }

    #[tokio::test]
    async fn test_unspecified_caches_indefinitely_by_default() {
        let cache = ResponseCache::new(MemoryRepository::with_defaults());

        let admission = cache.admit("/plain", "p", &HeaderMap::new()).await;

        assert_eq!(admission, Admission::Stored { expires_at: None });
        assert!(cache.lookup("/plain").await.is_some());
    }

    #[tokio::test]
    async fn test_default_ttl_applies_to_unspecified() {
        let cache = ResponseCache::with_config(
            MemoryRepository::with_defaults(),
            ResponseCacheConfig::with_ttl(Duration::from_secs(30)),
        );

        let admission = cache.admit("/plain", "p", &HeaderMap::new()).await;

        let Admission::Stored { expires_at: Some(at) } = admission else {
            panic!("expected default ttl, got {admission:?}");
        };
        assert!(at > SystemTime::now());
    }

    #[tokio::test]
    async fn test_default_ttl_does_not_override_expires() {
        let cache = ResponseCache::with_config(
            MemoryRepository::with_defaults(),
            ResponseCacheConfig::with_ttl(Duration::from_secs(30)),
        );

        let admission = cache
            .admit(
                "/dated",
                "d",
                &headers(&[("expires", "Sun, 06 Nov 1994 08:49:37 GMT")]),
            )
            .await;

        assert_eq!(
            admission,
            Admission::Stored {
                expires_at: Some(SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777))
            }
        );
    }

    #[tokio::test]
    async fn test_entry_without_body_is_skipped() {
        let cache = ResponseCache::new(MemoryRepository::with_defaults());

        let admission = cache.admit_entry("/empty", CacheEntry::default()).await;

        assert_eq!(admission, Admission::SkippedEmpty);
        assert!(cache.repository().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_memory_reaper_evicts_and_shutdown_stops_it() {
        let memory = MemoryConfig::default().reap_interval(Duration::from_secs(10));
        let cache = ResponseCache::in_memory(memory, ResponseCacheConfig::default());
        let past = SystemTime::now() - Duration::from_secs(1);

        cache
            .repository()
            .store(&CacheKey::with_expiration("/stale", past), CacheEntry::new("old"))
            .await;
        assert!(cache.lookup("/stale").await.is_some());

        tokio::time::sleep(Duration::from_secs(11)).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(cache.lookup("/stale").await.is_none());

        cache.shutdown();
        cache.shutdown();
        assert!(!cache.reaper().unwrap().is_running());
    }

    #[tokio::test]
    async fn test_unreachable_remote_never_fails_the_request() {
        let cache = ResponseCache::new(ExternalRepository::new(Unreachable).await);

        let admission = cache
            .admit("/a", "a", &headers(&[("cache-control", "max-age=60")]))
            .await;

        assert!(admission.is_stored());
        assert!(cache.lookup("/a").await.is_none());
    }
}
