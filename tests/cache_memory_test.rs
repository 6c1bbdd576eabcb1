// ABOUTME: Integration tests for the in-memory result cache
// ABOUTME: Tests namespaces, TTL expiration, capacity limits, and background cleanup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::create_test_cache;
use nutrition_engine::cache::memory::InMemoryCache;
use nutrition_engine::cache::{CacheConfig, CacheKey, CacheNamespace, CacheProvider};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tokio::time;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestData {
    value: String,
    count: u32,
}

/// Helper: key in the given namespace derived from a label
fn test_cache_key(namespace: CacheNamespace, label: &str) -> CacheKey {
    CacheKey::for_value(namespace, &label).unwrap()
}

fn sample(count: u32) -> TestData {
    TestData {
        value: format!("entry-{count}"),
        count,
    }
}

#[test]
fn test_cache_set_and_get() -> Result<()> {
    let cache = create_test_cache(100)?;
    let key = test_cache_key(CacheNamespace::NutritionCalculation, "a");

    cache.set(&key, &sample(42), Duration::from_secs(10))?;

    let hit = cache.get::<TestData>(&key)?.unwrap();
    assert_eq!(hit.value, sample(42));
    assert!(hit.age < Duration::from_secs(10));
    Ok(())
}

#[test]
fn test_cache_expiration() -> Result<()> {
    let cache = create_test_cache(100)?;
    let key = test_cache_key(CacheNamespace::PatientQuery, "expires");

    cache.set(&key, &sample(1), Duration::from_millis(30))?;
    assert!(cache.exists(&key)?);
    assert!(cache.ttl(&key)?.is_some());

    thread::sleep(Duration::from_millis(60));

    assert!(cache.get::<TestData>(&key)?.is_none());
    assert!(!cache.exists(&key)?);
    assert!(cache.ttl(&key)?.is_none());
    Ok(())
}

#[test]
fn test_same_label_in_two_namespaces_is_two_entries() -> Result<()> {
    let cache = create_test_cache(100)?;
    let calculation = test_cache_key(CacheNamespace::NutritionCalculation, "patient-7");
    let patient = test_cache_key(CacheNamespace::PatientQuery, "patient-7");

    cache.set(&calculation, &sample(1), Duration::from_secs(60))?;
    cache.set(&patient, &sample(2), Duration::from_secs(60))?;

    assert_eq!(cache.len()?, 2);
    assert_eq!(cache.get::<TestData>(&calculation)?.unwrap().value.count, 1);
    assert_eq!(cache.get::<TestData>(&patient)?.unwrap().value.count, 2);
    Ok(())
}

#[test]
fn test_invalidate_pattern_scoped_to_namespace() -> Result<()> {
    let cache = create_test_cache(100)?;
    for label in ["a", "b", "c"] {
        let key = test_cache_key(CacheNamespace::NutritionCalculation, label);
        cache.set(&key, &sample(0), Duration::from_secs(60))?;
    }
    let survivor = test_cache_key(CacheNamespace::PatientQuery, "a");
    cache.set(&survivor, &sample(9), Duration::from_secs(60))?;

    let removed = cache.invalidate_pattern(&CacheNamespace::NutritionCalculation.pattern())?;

    assert_eq!(removed, 3);
    assert_eq!(cache.len()?, 1);
    assert!(cache.exists(&survivor)?);
    Ok(())
}

#[test]
fn test_invalidate_single_key() -> Result<()> {
    let cache = create_test_cache(100)?;
    let key = test_cache_key(CacheNamespace::PatientQuery, "gone");
    cache.set(&key, &sample(3), Duration::from_secs(60))?;

    cache.invalidate(&key)?;
    assert!(cache.is_empty()?);
    Ok(())
}

#[test]
fn test_set_replaces_existing_entry() -> Result<()> {
    let cache = create_test_cache(100)?;
    let key = test_cache_key(CacheNamespace::NutritionCalculation, "same");

    cache.set(&key, &sample(1), Duration::from_secs(60))?;
    cache.set(&key, &sample(2), Duration::from_secs(60))?;

    assert_eq!(cache.len()?, 1);
    assert_eq!(cache.get::<TestData>(&key)?.unwrap().value, sample(2));
    Ok(())
}

#[test]
fn test_capacity_evicts_least_recently_used() -> Result<()> {
    let cache = create_test_cache(3)?;
    let keys: Vec<CacheKey> = ["k1", "k2", "k3", "k4"]
        .iter()
        .map(|label| test_cache_key(CacheNamespace::NutritionCalculation, label))
        .collect();

    for (index, key) in keys.iter().take(3).enumerate() {
        cache.set(key, &sample(u32::try_from(index)?), Duration::from_secs(60))?;
    }
    // Touch k1 so k2 becomes the oldest
    cache.get::<TestData>(&keys[0])?;
    cache.set(&keys[3], &sample(3), Duration::from_secs(60))?;

    assert_eq!(cache.len()?, 3);
    assert!(cache.exists(&keys[0])?);
    assert!(!cache.exists(&keys[1])?);
    assert!(cache.exists(&keys[3])?);
    Ok(())
}

#[test]
fn test_type_mismatch_is_an_error() -> Result<()> {
    let cache = create_test_cache(100)?;
    let key = test_cache_key(CacheNamespace::PatientQuery, "typed");
    cache.set(&key, &"just a string", Duration::from_secs(60))?;

    assert!(cache.get::<TestData>(&key).is_err());
    Ok(())
}

#[test]
fn test_purge_and_clear() -> Result<()> {
    let cache = create_test_cache(100)?;
    let short = test_cache_key(CacheNamespace::PatientQuery, "short");
    let long = test_cache_key(CacheNamespace::PatientQuery, "long");
    cache.set(&short, &sample(1), Duration::from_millis(10))?;
    cache.set(&long, &sample(2), Duration::from_secs(60))?;

    thread::sleep(Duration::from_millis(30));
    assert_eq!(cache.purge_expired()?, 1);
    assert_eq!(cache.len()?, 1);

    cache.clear_all()?;
    assert!(cache.is_empty()?);
    cache.health_check()?;
    Ok(())
}

#[tokio::test]
async fn test_background_cleanup_removes_expired_entries() -> Result<()> {
    let cache = InMemoryCache::new(CacheConfig {
        max_entries: 100,
        cleanup_interval_secs: 1,
        enable_background_cleanup: true,
        ..CacheConfig::default()
    })?;
    let key = test_cache_key(CacheNamespace::NutritionCalculation, "swept");
    cache.set(&key, &sample(5), Duration::from_millis(100))?;
    assert_eq!(cache.len()?, 1);

    // First tick fires immediately, the second after one interval
    time::sleep(Duration::from_millis(1300)).await;

    assert_eq!(cache.len()?, 0);
    Ok(())
}

#[tokio::test]
async fn test_clones_share_entries_and_sweep() -> Result<()> {
    let cache = InMemoryCache::new(CacheConfig {
        max_entries: 10,
        cleanup_interval_secs: 60,
        enable_background_cleanup: true,
        ..CacheConfig::default()
    })?;
    let clone = cache.clone();
    let key = test_cache_key(CacheNamespace::PatientQuery, "shared");

    clone.set(&key, &sample(8), Duration::from_secs(60))?;
    drop(clone);

    assert!(cache.exists(&key)?);
    Ok(())
}
