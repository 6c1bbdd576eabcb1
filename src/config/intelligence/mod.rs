// ABOUTME: Nutrition engine configuration container with global singleton and env overrides
// ABOUTME: Loads rule tables from defaults, applies NUTRITION_* overrides, and validates them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Rule table configuration
//!
//! Configuration is environment-only: built-in defaults, then a small set of
//! `NUTRITION_*` environment overrides, then validation.

/// Configuration error types
pub mod error;
/// Nutrition rule tables
pub mod nutrition;

pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, Bounds, CalculationDefaults, LeanMassCoefficients,
    MealSplitConfig, ObjectiveConfig, ProfileMacrosConfig, ProfileRatios, SexBasedFormulaConfig,
    SexCoefficients, ValidationConfig,
};

use crate::models::{ActivityLevel, ObjectivePolicy};
use nutrition_core::intelligence::algorithms::BmrFormula;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static NUTRITION_CONFIG: OnceLock<NutritionConfig> = OnceLock::new();

/// Environment variable selecting the default objective policy
pub const ENV_OBJECTIVE_POLICY: &str = "NUTRITION_OBJECTIVE_POLICY";
/// Environment variable selecting the default BMR formula
pub const ENV_DEFAULT_FORMULA: &str = "NUTRITION_DEFAULT_FORMULA";
/// Environment variable naming the unknown-activity fallback level
pub const ENV_ACTIVITY_FALLBACK: &str = "NUTRITION_ACTIVITY_FALLBACK";
/// Environment variable overriding the macro sum tolerance
pub const ENV_MACRO_SUM_TOLERANCE: &str = "NUTRITION_MACRO_SUM_TOLERANCE_PERCENT";

/// Complete configuration of the nutrition engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// BMR equation coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Objective ratios and offsets
    pub objectives: ObjectiveConfig,
    /// Protein and fat ratios per profile
    pub profile_macros: ProfileMacrosConfig,
    /// Input bounds and output sanity ranges
    pub validation: ValidationConfig,
    /// Meal split proportions
    pub meal_split: MealSplitConfig,
    /// Defaults for open choices
    pub defaults: CalculationDefaults,
}

impl NutritionConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        NUTRITION_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load nutrition config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found in the rule tables
    pub fn validate(&self) -> Result<(), ConfigError> {
        nutrition::validate_activity_factors(&self.activity_factors)?;
        nutrition::validate_objectives(&self.objectives)?;
        nutrition::validate_profiles(&self.profile_macros)?;
        nutrition::validate_bounds(&self.validation)?;
        self.meal_split.validate()?;
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Parse an enum override through its alias-aware parser
    fn apply_env_choice<T>(
        env_var_name: &str,
        parse: fn(&str) -> Option<T>,
        valid: &[&str],
        target: &mut T,
    ) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = parse(&val).ok_or_else(|| {
                ConfigError::Parse(format!(
                    "Invalid {env_var_name}: '{val}'. Valid options: {}",
                    valid.join(", ")
                ))
            })?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_choice(
            ENV_OBJECTIVE_POLICY,
            ObjectivePolicy::parse,
            &ObjectivePolicy::NAMES,
            &mut self.defaults.objective_policy,
        )?;
        Self::apply_env_choice(
            ENV_DEFAULT_FORMULA,
            BmrFormula::parse,
            &BmrFormula::NAMES,
            &mut self.defaults.formula,
        )?;

        // Empty or "none" disables the fallback explicitly
        if let Ok(val) = env::var(ENV_ACTIVITY_FALLBACK) {
            let trimmed = val.trim();
            self.defaults.unknown_activity_fallback =
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(ActivityLevel::parse(trimmed).ok_or_else(|| {
                        ConfigError::Parse(format!(
                            "Invalid {ENV_ACTIVITY_FALLBACK}: '{val}'. Valid options: {}",
                            ActivityLevel::NAMES.join(", ")
                        ))
                    })?)
                };
        }

        Self::apply_env_var(
            ENV_MACRO_SUM_TOLERANCE,
            &mut self.validation.macro_sum_tolerance_percent,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            ENV_OBJECTIVE_POLICY,
            ENV_DEFAULT_FORMULA,
            ENV_ACTIVITY_FALLBACK,
            ENV_MACRO_SUM_TOLERANCE,
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        let config = NutritionConfig::load().unwrap();
        assert_eq!(config, NutritionConfig::default());
        assert_eq!(config.defaults.objective_policy, ObjectivePolicy::Ratio);
        assert_eq!(config.defaults.unknown_activity_fallback, None);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var(ENV_OBJECTIVE_POLICY, "enp");
        env::set_var(ENV_ACTIVITY_FALLBACK, "moderado");
        env::set_var(ENV_MACRO_SUM_TOLERANCE, "7.5");

        let config = NutritionConfig::load().unwrap();
        clear_env();

        assert_eq!(config.defaults.objective_policy, ObjectivePolicy::Offset);
        assert_eq!(
            config.defaults.unknown_activity_fallback,
            Some(ActivityLevel::Moderate)
        );
        assert!((config.validation.macro_sum_tolerance_percent - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    #[serial]
    fn test_invalid_override_rejected() {
        clear_env();
        env::set_var(ENV_OBJECTIVE_POLICY, "sometimes");
        let result = NutritionConfig::load();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    #[serial]
    fn test_out_of_range_tolerance_fails_validation() {
        clear_env();
        env::set_var(ENV_MACRO_SUM_TOLERANCE, "-1");
        let result = NutritionConfig::load();
        clear_env();
        assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
    }
}
