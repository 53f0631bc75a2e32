//! Redis repository example
//!
//! Expects a Redis server at `REDIS_URL` (default `redis://127.0.0.1:6379`).
//! Without one, every lookup misses and the example still runs to completion.

use http::HeaderMap;
use respcache::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== respcache Redis Example ===\n");

    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    let config = RedisConfig::new(url)
        .pool_size(4)
        .connection_timeout(Duration::from_secs(2));

    let cache = ResponseCache::new(RedisRepository::connect(config).await?);

    let mut headers = HeaderMap::new();
    headers.insert("cache-control", http::HeaderValue::from_static("max-age=30"));
    headers.insert("content-type", http::HeaderValue::from_static("application/json"));

    println!("Admitting /api/items...");
    let admission = cache.admit("/api/items", r#"{"items":[1,2,3]}"#, &headers).await;
    println!("   {:?}", admission);

    match cache.lookup("/api/items").await {
        Some(entry) => {
            println!("✅ Cache HIT!");
            println!("   Body: {:?}", entry.body);
            println!("   Headers: {:?}", entry.headers);
        }
        None => println!("❌ Cache MISS (is Redis running?)"),
    }

    let key = CacheKey::from_uri("/api/items");
    println!("\nInvalidating /api/items...");
    println!("   Removed: {}", cache.repository().invalidate(&key).await);
    println!("   Present after invalidate: {}", cache.repository().has(&key).await);

    println!("\n=== Example Complete ===");
    Ok(())
}
