// ABOUTME: Result cache configuration loaded from environment variables
// ABOUTME: Capacity, per-namespace TTLs, and background expiry sweep settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::CacheNamespace;
use crate::constants::cache;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// In-memory result cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries before least-recently-used eviction
    pub max_entries: usize,
    /// Interval between background expiry sweeps in seconds
    pub cleanup_interval_secs: u64,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
    /// TTL per namespace
    pub ttl: CacheTtlConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: cache::DEFAULT_CACHE_MAX_ENTRIES,
            cleanup_interval_secs: cache::DEFAULT_CLEANUP_INTERVAL_SECS,
            enable_background_cleanup: true,
            ttl: CacheTtlConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("NUTRITION_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::DEFAULT_CACHE_MAX_ENTRIES),
            cleanup_interval_secs: env::var("NUTRITION_CACHE_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: env::var("NUTRITION_CACHE_BACKGROUND_CLEANUP")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            ttl: CacheTtlConfig::from_env(),
        }
    }

    /// Sweep interval as a `Duration`
    #[must_use]
    pub const fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

/// Cache TTL configuration for each namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheTtlConfig {
    /// Nutrition calculation results (default: 30 minutes)
    pub nutrition_calculation_secs: u64,
    /// Patient lookups (default: 5 minutes)
    pub patient_query_secs: u64,
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            nutrition_calculation_secs: cache::TTL_NUTRITION_CALCULATION_SECS,
            patient_query_secs: cache::TTL_PATIENT_QUERY_SECS,
        }
    }
}

impl CacheTtlConfig {
    /// Load cache TTL configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            nutrition_calculation_secs: env::var("NUTRITION_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::TTL_NUTRITION_CALCULATION_SECS),
            patient_query_secs: env::var("NUTRITION_CACHE_PATIENT_QUERY_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(cache::TTL_PATIENT_QUERY_SECS),
        }
    }

    /// TTL for a namespace
    #[must_use]
    pub const fn ttl_for(&self, namespace: CacheNamespace) -> Duration {
        match namespace {
            CacheNamespace::NutritionCalculation => {
                Duration::from_secs(self.nutrition_calculation_secs)
            }
            CacheNamespace::PatientQuery => Duration::from_secs(self.patient_query_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "NUTRITION_CACHE_MAX_ENTRIES",
        "NUTRITION_CACHE_CLEANUP_INTERVAL_SECS",
        "NUTRITION_CACHE_BACKGROUND_CLEANUP",
        "NUTRITION_CACHE_TTL_SECS",
        "NUTRITION_CACHE_PATIENT_QUERY_TTL_SECS",
    ];

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        for name in VARS {
            env::remove_var(name);
        }
        assert_eq!(CacheConfig::from_env(), CacheConfig::default());
        assert_eq!(
            CacheTtlConfig::default().ttl_for(CacheNamespace::NutritionCalculation),
            Duration::from_secs(1800)
        );
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var("NUTRITION_CACHE_MAX_ENTRIES", "10");
        env::set_var("NUTRITION_CACHE_BACKGROUND_CLEANUP", "false");
        env::set_var("NUTRITION_CACHE_TTL_SECS", "60");
        env::set_var("NUTRITION_CACHE_CLEANUP_INTERVAL_SECS", "not-a-number");

        let config = CacheConfig::from_env();
        for name in VARS {
            env::remove_var(name);
        }

        assert_eq!(config.max_entries, 10);
        assert!(!config.enable_background_cleanup);
        assert_eq!(config.ttl.nutrition_calculation_secs, 60);
        assert_eq!(
            config.cleanup_interval_secs,
            cache::DEFAULT_CLEANUP_INTERVAL_SECS
        );
    }
}
