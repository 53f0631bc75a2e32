//! Basic example demonstrating respcache with the in-process repository

use http::HeaderMap;
use respcache::prelude::*;
use std::time::Duration;

fn response_headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        if let Ok(value) = value.parse() {
            headers.insert(*name, value);
        }
    }
    headers
}

#[tokio::main]
async fn main() {
    println!("=== respcache Basic Example ===\n");

    // Sweep every 5 seconds so the example can show an eviction
    let memory = MemoryConfig::default().reap_interval(Duration::from_secs(5));
    let cache = ResponseCache::in_memory(memory, ResponseCacheConfig::default());

    // A response that may be cached for two seconds
    println!("Admitting /articles/1 with max-age=2...");
    let admission = cache
        .admit(
            "/articles/1",
            "<h1>Hello</h1>",
            &response_headers(&[("cache-control", "max-age=2"), ("content-type", "text/html")]),
        )
        .await;
    println!("   {:?}", admission);

    // A response that must not be cached
    println!("Admitting /account with no-cache...");
    let admission = cache
        .admit("/account", "private", &response_headers(&[("cache-control", "no-cache")]))
        .await;
    println!("   {:?}", admission);

    // A legacy Expires header
    println!("Admitting /legacy with an asctime Expires...");
    let admission = cache
        .admit(
            "/legacy",
            "old school",
            &response_headers(&[("expires", "Sun Nov  6 08:49:37 2094")]),
        )
        .await;
    println!("   {:?}", admission);

    for uri in ["/articles/1", "/account", "/legacy"] {
        match cache.lookup(uri).await {
            Some(entry) => println!("✅ HIT  {} -> {:?}", uri, entry.body),
            None => println!("❌ MISS {}", uri),
        }
    }

    println!("\nWaiting for the reaper...");
    tokio::time::sleep(Duration::from_secs(6)).await;

    match cache.lookup("/articles/1").await {
        Some(_) => println!("   /articles/1 still cached"),
        None => println!("   /articles/1 evicted"),
    }
    println!("   {} entries left", cache.repository().len());

    cache.shutdown();
    println!("\n=== Example Complete ===");
}
