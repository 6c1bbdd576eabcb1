// ABOUTME: Nutrition calculation orchestrator tying validation, formulas, and the result cache
// ABOUTME: Runs the input pass, cache lookup, calculation chain, and output pass in fixed order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Engine
//!
//! [`NutritionEngine::calculate`] is the single entry point of a calculation:
//!
//! 1. input pass; any violation returns [`ValidationErrors`] and nothing else
//! 2. cache lookup by normalized request; a hit is returned with
//!    `from_cache = true` and the entry's age
//! 3. BMR, expenditure, target, macros, in that order
//! 4. output pass; findings are attached as warnings, while a non-finite
//!    number rejects the request instead of being stored
//! 5. store and return with `from_cache = false`
//!
//! The cache is injected. Cache faults are logged and the calculation
//! proceeds without it.

use super::nutrition_calculator::{
    calculate_activity_adjusted_expenditure, calculate_bmr, calculate_macros,
    calculate_objective_adjusted_target, distribute_across_meals, resolve_ratios, round_to,
};
use super::nutrition_form::{CalculationForm, ParsedForm};
use super::nutrition_validation::{
    body_fat_required_issue, check_output, custom_target_required_issue, fields, validate_input,
};
use crate::cache::memory::InMemoryCache;
use crate::cache::{CacheKey, CacheNamespace, CacheProvider};
use crate::config::environment::EngineConfig;
use crate::config::intelligence::NutritionConfig;
use crate::errors::{AppResult, FieldIssue, IssueKind, ValidationErrors};
use crate::models::{
    CalculationRequest, CalculationResult, CalculationWarning, MealTarget, Objective, Provenance,
    WarningCode,
};
use chrono::{NaiveDate, Utc};
use std::time::Duration;
use tracing::{debug, warn};

/// Energy values are reported with two decimals
const ENERGY_DECIMALS: i32 = 2;

/// Calculation orchestrator owning its rule tables and result cache
#[derive(Clone)]
pub struct NutritionEngine<C: CacheProvider = InMemoryCache> {
    config: NutritionConfig,
    cache: C,
    cache_ttl: Duration,
}

impl NutritionEngine<InMemoryCache> {
    /// Build an engine with an in-memory cache from a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be created
    pub fn with_in_memory_cache(config: &EngineConfig) -> AppResult<Self> {
        let cache = InMemoryCache::new(config.cache.clone())?;
        Ok(Self::new(
            config.nutrition.clone(),
            cache,
            config.cache.ttl.ttl_for(CacheNamespace::NutritionCalculation),
        ))
    }
}

impl<C: CacheProvider> NutritionEngine<C> {
    /// Create an engine from rule tables, a cache, and the result TTL
    #[must_use]
    pub const fn new(config: NutritionConfig, cache: C, cache_ttl: Duration) -> Self {
        Self {
            config,
            cache,
            cache_ttl,
        }
    }

    /// Rule tables in use
    #[must_use]
    pub const fn config(&self) -> &NutritionConfig {
        &self.config
    }

    /// Result cache in use
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Cache key for a request
    ///
    /// Inputs that cannot affect the result are dropped first, so requests
    /// that differ only in those inputs share an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized
    pub fn cache_key(request: &CalculationRequest) -> AppResult<CacheKey> {
        let mut normalized = *request;
        if normalized.objective != Objective::Custom {
            normalized.custom_target_kcal = None;
        }
        CacheKey::for_value(CacheNamespace::NutritionCalculation, &normalized)
    }

    /// Calculate energy and macronutrient targets for a request
    ///
    /// # Errors
    ///
    /// Returns field-addressed errors when the input pass fails; no partial
    /// result is ever produced
    pub fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ValidationErrors> {
        validate_input(request, &self.config.validation)?;

        let key = match Self::cache_key(request) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(error = %e, "Failed to derive cache key, calculating without cache");
                None
            }
        };

        if let Some(hit) = key.as_ref().and_then(|key| self.lookup(key)) {
            return Ok(hit);
        }

        let result = self.compute(request)?;

        if let Some(key) = key {
            if let Err(e) = self.cache.set(&key, &result, self.cache_ttl) {
                warn!(error = %e, cache.key = %key, "Failed to store calculation result");
            }
        }

        Ok(result)
    }

    /// Parse a raw form and calculate
    ///
    /// Warnings raised while parsing (activity fallback) are appended to the
    /// result; they are not part of the cached entry.
    ///
    /// # Errors
    ///
    /// Returns field-addressed errors when the form cannot be read or the
    /// input pass fails
    pub fn calculate_form(
        &self,
        form: &CalculationForm,
        today: NaiveDate,
    ) -> Result<CalculationResult, ValidationErrors> {
        let parsed = form.parse(today, &self.config.defaults, &self.config.validation)?;
        self.calculate_parsed(&parsed)
    }

    /// Calculate an already parsed form, appending its parse warnings
    ///
    /// # Errors
    ///
    /// Returns field-addressed errors when the input pass fails
    pub fn calculate_parsed(
        &self,
        parsed: &ParsedForm,
    ) -> Result<CalculationResult, ValidationErrors> {
        let mut result = self.calculate(&parsed.request)?;
        for warning in &parsed.warnings {
            warn!(code = ?warning.code, "{}", warning.message);
        }
        result.warnings.extend(parsed.warnings.iter().cloned());
        Ok(result)
    }

    /// Split a result's targets across the configured meals
    #[must_use]
    pub fn meal_plan(&self, result: &CalculationResult) -> Vec<MealTarget> {
        distribute_across_meals(
            result.energy_target_kcal,
            &result.macros,
            &self.config.meal_split,
        )
    }

    /// Drop every cached calculation result
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is unavailable
    pub fn clear_cache(&self) -> AppResult<u64> {
        self.cache
            .invalidate_pattern(&CacheNamespace::NutritionCalculation.pattern())
    }

    fn lookup(&self, key: &CacheKey) -> Option<CalculationResult> {
        match self.cache.get::<CalculationResult>(key) {
            Ok(Some(hit)) => {
                let age_ms = u64::try_from(hit.age.as_millis()).unwrap_or(u64::MAX);
                debug!(cache.key = %key, cache.age_ms = age_ms, "Calculation cache hit");
                let mut result = hit.value;
                result.provenance.from_cache = true;
                result.provenance.cache_age_ms = Some(age_ms);
                Some(result)
            }
            Ok(None) => {
                debug!(cache.key = %key, "Calculation cache miss");
                None
            }
            Err(e) => {
                warn!(error = %e, cache.key = %key, "Cache lookup failed, recalculating");
                None
            }
        }
    }

    fn compute(&self, request: &CalculationRequest) -> Result<CalculationResult, ValidationErrors> {
        let patient = &request.patient;
        let mut warnings = Vec::new();

        let bmr = calculate_bmr(patient, request.formula, &self.config.bmr).map_err(|e| {
            let issue = if request.formula.requires_body_fat() && patient.body_fat_percent.is_none()
            {
                body_fat_required_issue(request.formula)
            } else {
                FieldIssue::new(fields::FORMULA, IssueKind::NotFinite, e.message)
            };
            single_issue(issue)
        })?;

        let expenditure = calculate_activity_adjusted_expenditure(
            bmr,
            request.activity_level,
            &self.config.activity_factors,
        );

        let mut target = calculate_objective_adjusted_target(
            expenditure,
            request.objective,
            request.objective_policy,
            request.custom_target_kcal,
            &self.config.objectives,
        )
        .map_err(|_| single_issue(custom_target_required_issue()))?;

        if target <= 0.0 {
            warnings.push(CalculationWarning::new(
                WarningCode::EnergyTargetNotPositive,
                format!("Energy target {target:.0} kcal is not positive and was clamped to 0"),
            ));
            target = 0.0;
        }

        let ratios = resolve_ratios(
            request.profile,
            &request.macro_config,
            &self.config.profile_macros,
        );
        let plan = calculate_macros(
            target,
            patient.weight_kg,
            ratios,
            request.macro_config.carb_floor,
        );

        if plan.carbs_clamped {
            warnings.push(CalculationWarning::new(
                WarningCode::CarbsClamped,
                "Protein and fat exceed the energy target; carbohydrates set to 0 g",
            ));
        }
        if plan.carb_floor_applied {
            warnings.push(CalculationWarning::new(
                WarningCode::CarbFloorApplied,
                format!(
                    "Carbohydrates raised to the {} g floor; total energy exceeds the target",
                    plan.macros.carbs.grams
                ),
            ));
        }
        warnings.extend(check_output(
            bmr,
            patient.weight_kg,
            target,
            &plan.macros,
            &self.config.validation,
        ));

        let result = CalculationResult {
            bmr_kcal: round_to(bmr, ENERGY_DECIMALS),
            total_energy_expenditure_kcal: round_to(expenditure, ENERGY_DECIMALS),
            energy_target_kcal: round_to(target, ENERGY_DECIMALS),
            macros: plan.macros,
            formula: request.formula,
            activity_level: request.activity_level,
            objective: request.objective,
            objective_policy: request.objective_policy,
            profile: request.profile,
            protein_g_per_kg: ratios.protein_g_per_kg,
            fat_g_per_kg: ratios.fat_g_per_kg,
            warnings,
            provenance: Provenance {
                from_cache: false,
                cache_age_ms: None,
                computed_at: Utc::now(),
            },
        };

        if !all_finite(&result) {
            return Err(single_issue(FieldIssue::new(
                fields::RESULT,
                IssueKind::NotFinite,
                "calculation produced a non-finite value; check the energy target and carb floor",
            )));
        }
        for warning in &result.warnings {
            warn!(code = ?warning.code, "{}", warning.message);
        }
        Ok(result)
    }
}

fn all_finite(result: &CalculationResult) -> bool {
    let macros = &result.macros;
    [macros.protein, macros.carbs, macros.fat]
        .iter()
        .flat_map(|amount| [amount.grams, amount.kcal, amount.percent])
        .chain([
            result.bmr_kcal,
            result.total_energy_expenditure_kcal,
            result.energy_target_kcal,
            result.protein_g_per_kg,
            result.fat_g_per_kg,
        ])
        .all(f64::is_finite)
}

fn single_issue(issue: FieldIssue) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.push(issue);
    errors
}
