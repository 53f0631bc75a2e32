use http::HeaderMap;
use respcache::TracingMetrics;
use respcache::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize tracing subscriber
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    println!("🔍 Initialized tracing...");

    // 2. Memory repository reporting through TracingMetrics
    let metrics = TracingMetrics::new().with_service_name("example-service");
    let repository = MemoryRepository::with_defaults().with_metrics(metrics);
    let reaper = repository.spawn_reaper();
    let cache = ResponseCache::new(repository).with_reaper(reaper);

    let mut headers = HeaderMap::new();
    headers.insert("cache-control", "max-age=60".parse()?);

    println!("\n⚡ Admitting response...");
    cache.admit("/users/1", "Alice", &headers).await;

    println!("\n⚡ Lookup (Hit)...");
    println!("   Got: {:?}", cache.lookup("/users/1").await.and_then(|e| e.body));

    println!("\n⚡ Lookup (Miss)...");
    println!("   Got: {:?}", cache.lookup("/users/99").await.and_then(|e| e.body));

    println!("\n⚡ Admitting malformed Expires (logged as a warning)...");
    let mut bad = HeaderMap::new();
    bad.insert("expires", "next week".parse()?);
    cache.admit("/users/2", "Bob", &bad).await;

    cache.shutdown();
    println!("\n✅ Check your console output for structured logs!");

    Ok(())
}
