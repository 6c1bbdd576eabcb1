// ABOUTME: Aggregated engine configuration loaded from environment variables
// ABOUTME: Combines rule tables, cache settings, and logging into one startup snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::cache::CacheConfig;
use super::intelligence::{ConfigError, NutritionConfig};
use crate::logging::LoggingConfig;

/// Everything the engine and its binaries read at startup
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rule tables and validation bounds
    pub nutrition: NutritionConfig,
    /// Result cache settings
    pub cache: CacheConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load the full configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a `NUTRITION_*` override is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            nutrition: NutritionConfig::load()?,
            cache: CacheConfig::from_env(),
            logging: LoggingConfig::from_env(),
        })
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nutrition Engine Configuration:\n\
             - Default Formula: {}\n\
             - Objective Policy: {}\n\
             - Activity Fallback: {}\n\
             - Macro Sum Tolerance: {}%\n\
             - Cache Capacity: {}\n\
             - Calculation TTL: {}s\n\
             - Background Cleanup: {}\n\
             - Log Level: {}",
            self.nutrition.defaults.formula,
            self.nutrition.defaults.objective_policy,
            self.nutrition
                .defaults
                .unknown_activity_fallback
                .map_or("Disabled", |level| level.name()),
            self.nutrition.validation.macro_sum_tolerance_percent,
            self.cache.max_entries,
            self.cache.ttl.nutrition_calculation_secs,
            if self.cache.enable_background_cleanup {
                "Enabled"
            } else {
                "Disabled"
            },
            self.logging.level,
        )
    }
}
