// ABOUTME: Nutrition calculation algorithms using peer-reviewed scientific formulas
// ABOUTME: BMR, activity-adjusted expenditure, objective targets, macros, BMI, and meal split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Pure functions of the calculation chain. Each stage consumes the previous
//! stage's unrounded output; rounding happens once, when the orchestrator
//! builds the result.
//!
//! # Scientific References
//!
//! - Roza, A.M. & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
//!   *American Journal of Clinical Nutrition*, 40(1), 168-182.
//!   <https://doi.org/10.1093/ajcn/40.1.168>
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - FAO/WHO/UNU (2004). Human energy requirements. Food and Nutrition Technical Report Series 1.

use super::algorithms::{estimate_bmr, BmrInputs};
use crate::config::intelligence::{
    ActivityFactorsConfig, BmrConfig, MealSplitConfig, ObjectiveConfig, ProfileMacrosConfig,
    ProfileRatios,
};
use crate::constants::energy::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};
use crate::errors::{AppError, AppResult};
use crate::models::{
    ActivityLevel, CarbFloorPolicy, MacroAmount, MacroBreakdown, MacroConfig, MealTarget,
    Objective, ObjectivePolicy, PatientMeasurement, Profile,
};
use nutrition_core::intelligence::algorithms::BmrFormula;
use serde::{Deserialize, Serialize};

/// Macro breakdown plus what the carbohydrate step had to do to produce it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroPlan {
    /// Grams, kcal, and percentages
    pub macros: MacroBreakdown,
    /// Protein and fat alone exceeded the target; carbohydrates clamped to zero
    pub carbs_clamped: bool,
    /// Carbohydrates were raised to the configured floor
    pub carb_floor_applied: bool,
}

/// Round to a fixed number of decimals
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Calculate Basal Metabolic Rate with the selected formula
///
/// - Harris-Benedict revised: M `88.362 + 13.397w + 4.799h - 5.677a`,
///   F `447.593 + 9.247w + 3.098h - 4.330a`
/// - Mifflin-St Jeor: `10w + 6.25h - 5a + 5` (M) / `- 161` (F)
///
/// # Errors
///
/// Returns an error if the formula needs body fat and none was measured
pub fn calculate_bmr(
    patient: &PatientMeasurement,
    formula: BmrFormula,
    config: &BmrConfig,
) -> AppResult<f64> {
    estimate_bmr(formula, &BmrInputs::from_measurement(patient), config)
}

/// Calculate activity-adjusted energy expenditure (TDEE / GET)
///
/// Formula: `expenditure = BMR x activity factor`
#[must_use]
pub fn calculate_activity_adjusted_expenditure(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> f64 {
    bmr * config.factor_for(activity_level)
}

/// Calculate the objective-adjusted energy target (VET)
///
/// Ratio policy multiplies, offset policy adds; the `custom` objective
/// returns the caller's target under either policy. The result may be zero or
/// negative under the offset policy; the orchestrator clamps and warns.
///
/// # Errors
///
/// Returns an error if the objective is `custom` and no positive, finite
/// target was supplied
pub fn calculate_objective_adjusted_target(
    expenditure: f64,
    objective: Objective,
    policy: ObjectivePolicy,
    custom_target_kcal: Option<f64>,
    config: &ObjectiveConfig,
) -> AppResult<f64> {
    let adjusted = match policy {
        ObjectivePolicy::Ratio => config.ratio_for(objective).map(|ratio| expenditure * ratio),
        ObjectivePolicy::Offset => config
            .offset_for(objective)
            .map(|offset| expenditure + offset),
    };

    match adjusted {
        Some(target) => Ok(target),
        None => custom_target_kcal
            .filter(|target| target.is_finite() && *target > 0.0)
            .ok_or_else(|| {
                AppError::invalid_input("custom objective requires a positive custom_target_kcal")
            }),
    }
}

/// Protein and fat ratios for a profile, with per-request overrides applied
#[must_use]
pub fn resolve_ratios(
    profile: Profile,
    overrides: &MacroConfig,
    table: &ProfileMacrosConfig,
) -> ProfileRatios {
    let base = table.ratios_for(profile);
    ProfileRatios {
        protein_g_per_kg: overrides.protein_g_per_kg.unwrap_or(base.protein_g_per_kg),
        fat_g_per_kg: overrides.fat_g_per_kg.unwrap_or(base.fat_g_per_kg),
    }
}

/// Distribute an energy target into protein, fat, and carbohydrates
///
/// Protein and fat are fixed by body weight; carbohydrates take the
/// remaining energy. Grams are whole numbers and every kcal value derives
/// from the rounded grams. A negative remainder is clamped to zero, or raised
/// to the carbohydrate floor when one is configured.
#[must_use]
pub fn calculate_macros(
    energy_target_kcal: f64,
    weight_kg: f64,
    ratios: ProfileRatios,
    carb_floor: CarbFloorPolicy,
) -> MacroPlan {
    let protein_g = (weight_kg * ratios.protein_g_per_kg).round();
    let fat_g = (weight_kg * ratios.fat_g_per_kg).round();
    let protein_kcal = protein_g * KCAL_PER_G_PROTEIN;
    let fat_kcal = fat_g * KCAL_PER_G_FAT;

    let remainder_kcal = energy_target_kcal - protein_kcal - fat_kcal;
    let floor_kcal = carb_floor.floor_kcal(energy_target_kcal, KCAL_PER_G_CARBS);

    let (carbs_raw_kcal, carbs_clamped, carb_floor_applied) =
        if floor_kcal > 0.0 && remainder_kcal < floor_kcal {
            (floor_kcal, false, true)
        } else if remainder_kcal < 0.0 {
            (0.0, true, false)
        } else {
            (remainder_kcal, false, false)
        };

    let carbs_g = (carbs_raw_kcal / KCAL_PER_G_CARBS).round();
    let carbs_kcal = carbs_g * KCAL_PER_G_CARBS;

    let total_kcal = protein_kcal + carbs_kcal + fat_kcal;
    let percent_of_total = |kcal: f64| {
        if total_kcal > 0.0 {
            round_to(kcal / total_kcal * 100.0, 1)
        } else {
            0.0
        }
    };

    MacroPlan {
        macros: MacroBreakdown {
            protein: MacroAmount {
                grams: protein_g,
                kcal: protein_kcal,
                percent: percent_of_total(protein_kcal),
            },
            carbs: MacroAmount {
                grams: carbs_g,
                kcal: carbs_kcal,
                percent: percent_of_total(carbs_kcal),
            },
            fat: MacroAmount {
                grams: fat_g,
                kcal: fat_kcal,
                percent: percent_of_total(fat_kcal),
            },
        },
        carbs_clamped,
        carb_floor_applied,
    }
}

/// Body mass index (kg/m²), rounded to one decimal
#[must_use]
pub fn calculate_bmi(patient: &PatientMeasurement) -> f64 {
    round_to(patient.bmi(), 1)
}

/// Split a daily target and its macros across the day's meals
///
/// Each meal receives its configured share of the energy target and of each
/// macro's grams, rounded to one decimal.
#[must_use]
pub fn distribute_across_meals(
    energy_target_kcal: f64,
    macros: &MacroBreakdown,
    config: &MealSplitConfig,
) -> Vec<MealTarget> {
    config
        .proportions()
        .into_iter()
        .filter(|(_, proportion)| *proportion > 0.0)
        .map(|(slot, proportion)| MealTarget {
            slot,
            proportion,
            energy_kcal: round_to(energy_target_kcal * proportion, 1),
            protein_g: round_to(macros.protein.grams * proportion, 1),
            carbs_g: round_to(macros.carbs.grams * proportion, 1),
            fat_g: round_to(macros.fat.grams * proportion, 1),
        })
        .collect()
}
