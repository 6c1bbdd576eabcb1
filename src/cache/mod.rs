// ABOUTME: Result cache abstraction with namespaced, content-addressed keys
// ABOUTME: Pluggable provider trait with TTL expiry and bounded capacity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory cache implementation
pub mod memory;

pub use crate::config::cache::{CacheConfig, CacheTtlConfig};

use crate::constants::cache::{NAMESPACE_NUTRITION_CALCULATION, NAMESPACE_PATIENT_QUERY};
use crate::errors::AppResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// Calls are synchronous: a cache lookup sits on the calculation path, and
/// calculation never suspends.
///
/// # Examples
///
/// ```rust,no_run
/// use nutrition_engine::cache::{CacheConfig, CacheKey, CacheNamespace, CacheProvider};
/// use nutrition_engine::cache::memory::InMemoryCache;
/// use std::time::Duration;
/// # fn example() -> Result<(), nutrition_engine::errors::AppError> {
///
/// let cache = InMemoryCache::new(CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// })?;
///
/// let key = CacheKey::for_value(CacheNamespace::PatientQuery, &("patient", 42))?;
/// cache.set(&key, &"Maria", Duration::from_secs(300))?;
///
/// if let Some(hit) = cache.get::<String>(&key)? {
///     println!("cached {} ({} ms old)", hit.value, hit.age.as_millis());
/// }
/// # Ok(())
/// # }
/// ```
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    fn set<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) -> AppResult<()>;

    /// Retrieve value from cache; expired entries are never returned
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> AppResult<Option<CachedValue<T>>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Remove all cache entries matching a glob pattern (e.g., "patient-query:*")
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid
    fn invalidate_pattern(&self, pattern: &str) -> AppResult<u64>;

    /// Check if a live entry exists for key
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    fn exists(&self, key: &CacheKey) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>>;

    /// Drop every expired entry and return how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable
    fn purge_expired(&self) -> AppResult<u64>;

    /// Number of stored entries, expired ones included until purged
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable
    fn len(&self) -> AppResult<usize>;

    /// True when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable
    fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    fn health_check(&self) -> AppResult<()>;

    /// Clear all cache entries in every namespace
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    fn clear_all(&self) -> AppResult<()>;
}

/// A cache hit together with the age of its entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue<T> {
    /// Deserialized value
    pub value: T,
    /// Time since the entry was stored
    pub age: Duration,
}

/// Independent key spaces sharing one store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Calculation results keyed by normalized request
    NutritionCalculation,
    /// Patient lookups made while filling a form
    PatientQuery,
}

impl CacheNamespace {
    /// Key prefix
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::NutritionCalculation => NAMESPACE_NUTRITION_CALCULATION,
            Self::PatientQuery => NAMESPACE_PATIENT_QUERY,
        }
    }

    /// Glob pattern matching every key in this namespace
    #[must_use]
    pub fn pattern(&self) -> String {
        format!("{}:*", self.prefix())
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Namespaced, content-addressed cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Key space
    pub namespace: CacheNamespace,
    /// Hex digest of the canonical input
    pub digest: String,
}

impl CacheKey {
    /// Create a key from a precomputed digest
    #[must_use]
    pub fn new(namespace: CacheNamespace, digest: impl Into<String>) -> Self {
        Self {
            namespace,
            digest: digest.into(),
        }
    }

    /// Key for a serializable value
    ///
    /// The value is converted to a JSON tree first; object keys in that tree
    /// are sorted, so field order never changes the digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized
    pub fn for_value<T: Serialize>(namespace: CacheNamespace, value: &T) -> AppResult<Self> {
        let canonical = serde_json::to_vec(&serde_json::to_value(value)?)?;
        let digest = hex::encode(Sha256::digest(&canonical));
        Ok(Self::new(namespace, digest))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.digest)
    }
}
