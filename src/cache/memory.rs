// ABOUTME: In-memory cache implementation with LRU eviction and TTL support
// ABOUTME: Includes an optional tokio background sweep for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey, CacheProvider, CachedValue};
use crate::errors::{AppError, AppResult};
use glob::Pattern;
use lru::LruCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info};

type Store = LruCache<String, CacheEntry>;

/// In-memory cache entry with creation and expiration instants
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    created_at: Instant,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        let created_at = Instant::now();
        Self {
            data,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at.checked_duration_since(Instant::now())
    }
}

/// In-memory cache with LRU eviction and optional background cleanup
///
/// Uses `Arc<Mutex<LruCache>>` for state shared between clones and the sweep
/// task. Entries are replaced wholesale under the lock, so concurrent callers
/// never observe a partially written entry.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Arc<Mutex<Store>>,
    shutdown_tx: Option<Arc<mpsc::Sender<()>>>,
}

impl InMemoryCache {
    /// Default cache capacity when config specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    fn new_with_config(config: &CacheConfig) -> Self {
        // LruCache requires NonZeroUsize for capacity
        let capacity =
            NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);
        let store = Arc::new(Mutex::new(LruCache::new(capacity)));

        let shutdown_tx = if config.enable_background_cleanup {
            Self::spawn_cleanup(&store, config.cleanup_interval())
        } else {
            None
        };

        info!(
            cache.capacity = capacity.get(),
            cache.background_cleanup = shutdown_tx.is_some(),
            "In-memory result cache initialized"
        );

        Self { store, shutdown_tx }
    }

    /// Start the periodic sweep when running inside a tokio runtime
    fn spawn_cleanup(
        store: &Arc<Mutex<Store>>,
        cleanup_interval: Duration,
    ) -> Option<Arc<mpsc::Sender<()>>> {
        let Ok(handle) = Handle::try_current() else {
            debug!("No tokio runtime available, background cache cleanup disabled");
            return None;
        };

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let store_clone = Arc::clone(store);

        handle.spawn(async move {
            let mut interval = time::interval(cleanup_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Ok(mut guard) = store_clone.lock() {
                            Self::cleanup_expired(&mut guard);
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Cache cleanup task received shutdown signal");
                        break;
                    }
                }
            }
        });

        Some(Arc::new(shutdown_tx))
    }

    /// Remove all expired entries from the store
    fn cleanup_expired(store: &mut Store) -> u64 {
        // Collect expired keys first (can't modify while iterating)
        let expired_keys: Vec<String> = store
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            store.pop(key);
        }

        let removed = expired_keys.len() as u64;
        if removed > 0 {
            debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Store>> {
        self.store
            .lock()
            .map_err(|e| AppError::storage(format!("Cache lock poisoned: {e}")))
    }
}

impl CacheProvider for InMemoryCache {
    fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self::new_with_config(&config))
    }

    fn set<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let entry = CacheEntry::new(serialized, ttl);

        // LruCache handles eviction automatically on push
        self.lock()?.push(key.to_string(), entry);

        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> AppResult<Option<CachedValue<T>>> {
        let key = key.to_string();
        let mut store = self.lock()?;

        // LruCache::get is mutable (updates access order for LRU)
        let Some(entry) = store.get(&key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            store.pop(&key);
            return Ok(None);
        }

        let age = entry.created_at.elapsed();
        let value: T = serde_json::from_slice(&entry.data)?;
        drop(store);

        Ok(Some(CachedValue { value, age }))
    }

    fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.lock()?.pop(&key.to_string());
        Ok(())
    }

    fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64> {
        let glob_pattern = Pattern::new(pattern).map_err(|e| {
            AppError::invalid_input(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;

        let mut store = self.lock()?;

        // Collect keys to remove (can't modify while iterating)
        let keys_to_remove: Vec<String> = store
            .iter()
            .filter(|(key, _)| glob_pattern.matches(key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &keys_to_remove {
            store.pop(key);
        }

        Ok(keys_to_remove.len() as u64)
    }

    fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        let key = key.to_string();
        let mut store = self.lock()?;

        // Use peek to avoid updating LRU order
        match store.peek(&key).map(CacheEntry::is_expired) {
            Some(false) => Ok(true),
            Some(true) => {
                store.pop(&key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        let store = self.lock()?;
        Ok(store
            .peek(&key.to_string())
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::remaining_ttl))
    }

    fn purge_expired(&self) -> AppResult<u64> {
        let mut store = self.lock()?;
        Ok(Self::cleanup_expired(&mut store))
    }

    fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    fn health_check(&self) -> AppResult<()> {
        // A poisoned lock is the only failure mode
        self.lock().map(|_| ())
    }

    fn clear_all(&self) -> AppResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}

impl Drop for InMemoryCache {
    fn drop(&mut self) {
        // Only the last clone stops the sweep
        if let Some(tx) = &self.shutdown_tx {
            if Arc::strong_count(tx) == 1 {
                if let Err(e) = tx.try_send(()) {
                    debug!(error = ?e, "Cache shutdown signal send failed (channel likely closed)");
                }
            }
        }
    }
}
