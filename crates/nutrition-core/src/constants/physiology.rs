// ABOUTME: Physiological plausibility bounds for patient measurements and computed outputs
// ABOUTME: Inclusive input limits, BMR-per-kg expectations, and literature macro ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Minimum accepted body weight (kg, inclusive)
pub const WEIGHT_MIN_KG: f64 = 20.0;
/// Maximum accepted body weight (kg, inclusive)
pub const WEIGHT_MAX_KG: f64 = 300.0;

/// Minimum accepted height (cm, inclusive)
pub const HEIGHT_MIN_CM: f64 = 100.0;
/// Maximum accepted height (cm, inclusive)
pub const HEIGHT_MAX_CM: f64 = 250.0;

/// Minimum accepted age (years, inclusive)
pub const AGE_MIN_YEARS: u32 = 10;
/// Maximum accepted age (years, inclusive)
pub const AGE_MAX_YEARS: u32 = 100;

/// Minimum accepted body-fat percentage
pub const BODY_FAT_MIN_PERCENT: f64 = 3.0;
/// Maximum accepted body-fat percentage
pub const BODY_FAT_MAX_PERCENT: f64 = 70.0;

/// Lowest plausible BMR per kg of body weight (kcal/kg/day)
pub const BMR_MIN_KCAL_PER_KG: f64 = 15.0;
/// Highest plausible BMR per kg of body weight (kcal/kg/day)
pub const BMR_MAX_KCAL_PER_KG: f64 = 35.0;

/// Allowed divergence between macro kcal sum and energy target (percent)
pub const MACRO_SUM_TOLERANCE_PERCENT: f64 = 5.0;

/// Protein share of energy, AMDR-style bounds (percent)
pub const PROTEIN_PERCENT_RANGE: (f64, f64) = (10.0, 35.0);
/// Carbohydrate share of energy (percent)
pub const CARBS_PERCENT_RANGE: (f64, f64) = (20.0, 65.0);
/// Fat share of energy (percent)
pub const FAT_PERCENT_RANGE: (f64, f64) = (15.0, 35.0);

/// Accepted protein override (g/kg)
pub const PROTEIN_OVERRIDE_RANGE_G_PER_KG: (f64, f64) = (0.5, 3.5);
/// Accepted fat override (g/kg)
pub const FAT_OVERRIDE_RANGE_G_PER_KG: (f64, f64) = (0.3, 2.5);
/// Accepted custom objective target (kcal/day)
pub const CUSTOM_TARGET_RANGE_KCAL: (f64, f64) = (1.0, 10_000.0);
/// Accepted absolute carbohydrate floor (g/day)
pub const CARB_FLOOR_RANGE_G: (f64, f64) = (1.0, 1_000.0);

/// BMI at or above which the overweight/obese profile is suggested
pub const BMI_OVERWEIGHT_THRESHOLD: f64 = 25.0;
