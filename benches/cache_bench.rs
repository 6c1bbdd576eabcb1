// ABOUTME: Criterion benchmarks for result cache operations
// ABOUTME: Measures key derivation and set/get/invalidate latency on the in-memory backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for cache operations.
//!
//! Measures content-addressed key derivation and set/get/invalidate latency
//! using the in-memory cache backend.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

mod common;

use common::fixtures::{generate_requests, reference_request, RequestBatchSize};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nutrition_engine::cache::memory::InMemoryCache;
use nutrition_engine::cache::{CacheConfig, CacheKey, CacheNamespace, CacheProvider};
use nutrition_engine::intelligence::NutritionEngine;
use nutrition_engine::models::CalculationRequest;
use std::time::{Duration, Instant};

/// Create test cache configuration (no background cleanup for benchmarks)
fn test_cache_config() -> CacheConfig {
    CacheConfig {
        max_entries: 10_000,
        cleanup_interval_secs: 3600,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    }
}

fn make_cache_key(index: usize) -> CacheKey {
    CacheKey::for_value(CacheNamespace::NutritionCalculation, &index).unwrap()
}

/// Benchmark digest derivation from a request
fn bench_key_derivation(c: &mut Criterion) {
    let request = reference_request();
    c.bench_function("cache_key_derivation", |b| {
        b.iter(|| NutritionEngine::<InMemoryCache>::cache_key(black_box(&request)).unwrap());
    });
}

/// Benchmark set and get (hits vs misses)
fn bench_cache_set_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_set_get");
    let cache = InMemoryCache::new(test_cache_config()).unwrap();
    let payloads = generate_requests(RequestBatchSize::Medium);

    group.bench_function("memory_set", |b| {
        let mut key_index = 0_usize;
        b.iter(|| {
            let key = make_cache_key(key_index);
            let payload = &payloads[key_index % payloads.len()];
            key_index = key_index.wrapping_add(1);
            cache
                .set(black_box(&key), black_box(payload), Duration::from_secs(3600))
                .unwrap();
        });
    });

    cache.clear_all().unwrap();
    for (index, payload) in payloads.iter().enumerate() {
        cache
            .set(&make_cache_key(index), payload, Duration::from_secs(3600))
            .unwrap();
    }

    group.bench_function("memory_hit", |b| {
        let mut key_index = 0_usize;
        b.iter(|| {
            let key = make_cache_key(key_index % payloads.len());
            key_index = key_index.wrapping_add(1);
            let _: Option<_> = cache
                .get::<CalculationRequest>(black_box(&key))
                .unwrap();
        });
    });

    group.bench_function("memory_miss", |b| {
        let mut key_index = 100_000_usize;
        b.iter(|| {
            let key = make_cache_key(key_index);
            key_index = key_index.wrapping_add(1);
            let _: Option<_> = cache
                .get::<CalculationRequest>(black_box(&key))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark namespace-wide invalidation of 100 entries
fn bench_cache_invalidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_invalidate");
    let payload = reference_request();

    group.bench_function("memory_namespace_100_entries", |b| {
        b.iter_custom(|iters| {
            let cache = InMemoryCache::new(test_cache_config()).unwrap();
            let pattern = CacheNamespace::NutritionCalculation.pattern();
            let mut elapsed = Duration::ZERO;

            for _ in 0..iters {
                for index in 0..100 {
                    cache
                        .set(&make_cache_key(index), &payload, Duration::from_secs(3600))
                        .unwrap();
                }
                let start = Instant::now();
                cache.invalidate_pattern(black_box(&pattern)).unwrap();
                elapsed += start.elapsed();
            }
            elapsed
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_key_derivation,
    bench_cache_set_get,
    bench_cache_invalidate
);
criterion_main!(benches);
