//! Benchmarks for respcache repository and parser throughput

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use http::HeaderMap;
use respcache::{
    CacheEntry, CacheKey, CacheRepository, MemoryRepository, ResponseCache, compute_expiration,
    parse_http_date,
};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn page(size: usize) -> CacheEntry {
    CacheEntry::new("x".repeat(size)).header("Content-Type", "text/html")
}

fn bench_store(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let repo = MemoryRepository::with_defaults();
    let key = CacheKey::from_uri("/bench");

    let mut group = c.benchmark_group("store");
    group.throughput(Throughput::Elements(1));

    group.bench_function("small_body", |b| {
        let entry = page(64);
        b.iter(|| {
            rt.block_on(repo.store(black_box(&key), entry.clone()));
        });
    });

    group.bench_function("medium_body", |b| {
        let entry = page(1024);
        b.iter(|| {
            rt.block_on(repo.store(black_box(&key), entry.clone()));
        });
    });

    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let repo = MemoryRepository::with_defaults();
    let hit = CacheKey::from_uri("/hit");
    let miss = CacheKey::from_uri("/miss");

    rt.block_on(repo.store(&hit, page(1024)));

    let mut group = c.benchmark_group("retrieve");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit", |b| {
        b.iter(|| black_box(rt.block_on(repo.retrieve(black_box(&hit)))));
    });

    group.bench_function("miss", |b| {
        b.iter(|| black_box(rt.block_on(repo.retrieve(black_box(&miss)))));
    });

    group.finish();
}

fn bench_admit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = ResponseCache::new(MemoryRepository::with_defaults());

    let mut headers = HeaderMap::new();
    headers.insert("cache-control", "max-age=60".parse().unwrap());
    headers.insert("content-type", "text/html".parse().unwrap());

    c.bench_function("admit_max_age", |b| {
        b.iter(|| black_box(rt.block_on(cache.admit("/page", "<p>body</p>", black_box(&headers)))));
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("imf_fixdate", |b| {
        b.iter(|| parse_http_date(black_box("Sun, 06 Nov 1994 08:49:37 GMT")));
    });

    group.bench_function("rfc850", |b| {
        b.iter(|| parse_http_date(black_box("Sunday, 06-Nov-94 08:49:37 GMT")));
    });

    group.bench_function("asctime", |b| {
        b.iter(|| parse_http_date(black_box("Sun Nov  6 08:49:37 1994")));
    });

    group.bench_function("cache_control", |b| {
        let entry = CacheEntry::new("b").header("Cache-Control", "public, max-age=3600");
        b.iter(|| compute_expiration(black_box(&entry)));
    });

    group.finish();
}

criterion_group!(benches, bench_store, bench_retrieve, bench_admit, bench_parse);
criterion_main!(benches);
