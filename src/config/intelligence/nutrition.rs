// ABOUTME: Nutrition rule tables for BMR coefficients, activity factors, objectives, and profiles
// ABOUTME: Also holds validation bounds, meal split proportions, and calculation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Rule Tables
//!
//! Immutable lookup tables consumed by the formula library and the validator.
//! Every value has a documented default; a process-wide instance is loaded
//! once through [`super::NutritionConfig::global`].
//!
//! # Scientific References
//!
//! - Harris & Benedict (1919); Roza & Shizgal (1984) DOI: 10.1093/ajcn/40.1.168
//! - Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Cunningham (1980) DOI: 10.1093/ajcn/33.11.2372
//! - FAO/WHO/UNU (2004) physical activity level factors

use super::error::ConfigError;
use crate::constants::physiology;
use crate::models::{ActivityLevel, MealSlot, Objective, ObjectivePolicy, Profile, Sex};
use nutrition_core::intelligence::algorithms::BmrFormula;
use serde::{Deserialize, Serialize};

// ============================================================================
// BMR coefficients
// ============================================================================

/// Linear coefficients of a sex-based BMR equation
///
/// `bmr = constant + weight x w + height x h + age x a`; the age coefficient
/// is stored with its sign (negative for every published equation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SexCoefficients {
    /// Intercept (kcal)
    pub constant: f64,
    /// Per kg of body weight
    pub weight: f64,
    /// Per cm of height
    pub height: f64,
    /// Per year of age
    pub age: f64,
}

impl SexCoefficients {
    /// Evaluate the linear equation
    #[must_use]
    pub fn apply(&self, weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
        self.age.mul_add(
            age_years,
            self.height
                .mul_add(height_cm, self.weight.mul_add(weight_kg, self.constant)),
        )
    }
}

/// Male and female coefficient sets of one equation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SexBasedFormulaConfig {
    /// Male coefficients
    pub male: SexCoefficients,
    /// Female coefficients
    pub female: SexCoefficients,
}

impl SexBasedFormulaConfig {
    /// Coefficients for a sex
    #[must_use]
    pub const fn for_sex(&self, sex: Sex) -> &SexCoefficients {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

/// `bmr = constant + lean_mass x LBM`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeanMassCoefficients {
    /// Intercept (kcal)
    pub constant: f64,
    /// Per kg of lean body mass
    pub lean_mass: f64,
}

/// BMR equation coefficients for every supported formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Harris-Benedict 1919
    pub harris_benedict_original: SexBasedFormulaConfig,
    /// Harris-Benedict revised, Roza & Shizgal 1984
    pub harris_benedict_revised: SexBasedFormulaConfig,
    /// Mifflin-St Jeor 1990
    pub mifflin_st_jeor: SexBasedFormulaConfig,
    /// Katch-McArdle
    pub katch_mcardle: LeanMassCoefficients,
    /// Cunningham 1980
    pub cunningham: LeanMassCoefficients,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            harris_benedict_original: SexBasedFormulaConfig {
                male: SexCoefficients {
                    constant: 66.473,
                    weight: 13.7516,
                    height: 5.0033,
                    age: -6.755,
                },
                female: SexCoefficients {
                    constant: 655.0955,
                    weight: 9.5634,
                    height: 1.8496,
                    age: -4.6756,
                },
            },
            harris_benedict_revised: SexBasedFormulaConfig {
                male: SexCoefficients {
                    constant: 88.362,
                    weight: 13.397,
                    height: 4.799,
                    age: -5.677,
                },
                female: SexCoefficients {
                    constant: 447.593,
                    weight: 9.247,
                    height: 3.098,
                    age: -4.330,
                },
            },
            mifflin_st_jeor: SexBasedFormulaConfig {
                male: SexCoefficients {
                    constant: 5.0,
                    weight: 10.0,
                    height: 6.25,
                    age: -5.0,
                },
                female: SexCoefficients {
                    constant: -161.0,
                    weight: 10.0,
                    height: 6.25,
                    age: -5.0,
                },
            },
            katch_mcardle: LeanMassCoefficients {
                constant: 370.0,
                lean_mass: 21.6,
            },
            cunningham: LeanMassCoefficients {
                constant: 500.0,
                lean_mass: 22.0,
            },
        }
    }
}

// ============================================================================
// Activity, objective, and profile tables
// ============================================================================

/// Activity factor multipliers for expenditure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Intense: 1.725
    pub intense: f64,
    /// Very intense: 1.9
    pub very_intense: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            intense: 1.725,
            very_intense: 1.9,
        }
    }
}

impl ActivityFactorsConfig {
    /// Factor for a level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Intense => self.intense,
            ActivityLevel::VeryIntense => self.very_intense,
        }
    }
}

/// Objective adjustment, per policy
///
/// The ratio and offset columns are separate prescriptions; a calculation
/// reads exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveConfig {
    /// Weight loss ratio: 0.8
    pub weight_loss_ratio: f64,
    /// Maintenance ratio: 1.0
    pub maintenance_ratio: f64,
    /// Hypertrophy ratio: 1.15
    pub hypertrophy_ratio: f64,
    /// Weight loss offset: -500 kcal
    pub weight_loss_offset_kcal: f64,
    /// Maintenance offset: 0 kcal
    pub maintenance_offset_kcal: f64,
    /// Hypertrophy offset: +400 kcal
    pub hypertrophy_offset_kcal: f64,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            weight_loss_ratio: 0.8,
            maintenance_ratio: 1.0,
            hypertrophy_ratio: 1.15,
            weight_loss_offset_kcal: -500.0,
            maintenance_offset_kcal: 0.0,
            hypertrophy_offset_kcal: 400.0,
        }
    }
}

impl ObjectiveConfig {
    /// Ratio for an objective; `None` for `custom`
    #[must_use]
    pub const fn ratio_for(&self, objective: Objective) -> Option<f64> {
        match objective {
            Objective::WeightLoss => Some(self.weight_loss_ratio),
            Objective::Maintenance => Some(self.maintenance_ratio),
            Objective::Hypertrophy => Some(self.hypertrophy_ratio),
            Objective::Custom => None,
        }
    }

    /// Offset for an objective; `None` for `custom`
    #[must_use]
    pub const fn offset_for(&self, objective: Objective) -> Option<f64> {
        match objective {
            Objective::WeightLoss => Some(self.weight_loss_offset_kcal),
            Objective::Maintenance => Some(self.maintenance_offset_kcal),
            Objective::Hypertrophy => Some(self.hypertrophy_offset_kcal),
            Objective::Custom => None,
        }
    }
}

/// Protein and fat grams per kg of body weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileRatios {
    /// Protein g/kg
    pub protein_g_per_kg: f64,
    /// Fat g/kg
    pub fat_g_per_kg: f64,
}

/// Macro ratios per body-composition profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileMacrosConfig {
    /// Eutrophic: 1.4 / 1.0
    pub eutrophic: ProfileRatios,
    /// Overweight: 1.8 / 0.9
    pub overweight: ProfileRatios,
    /// Athlete: 2.0 / 1.0
    pub athlete: ProfileRatios,
}

impl Default for ProfileMacrosConfig {
    fn default() -> Self {
        Self {
            eutrophic: ProfileRatios {
                protein_g_per_kg: 1.4,
                fat_g_per_kg: 1.0,
            },
            overweight: ProfileRatios {
                protein_g_per_kg: 1.8,
                fat_g_per_kg: 0.9,
            },
            athlete: ProfileRatios {
                protein_g_per_kg: 2.0,
                fat_g_per_kg: 1.0,
            },
        }
    }
}

impl ProfileMacrosConfig {
    /// Ratios for a profile
    #[must_use]
    pub const fn ratios_for(&self, profile: Profile) -> ProfileRatios {
        match profile {
            Profile::Eutrophic => self.eutrophic,
            Profile::Overweight => self.overweight,
            Profile::Athlete => self.athlete,
        }
    }
}

// ============================================================================
// Validation bounds
// ============================================================================

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

impl Bounds {
    /// Build from a `(min, max)` pair
    #[must_use]
    pub const fn from_pair((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }

    /// Whether the value lies inside, bounds included
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn check(&self, name: &str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(ConfigError::InvalidRange(format!(
                "{name}: min ({}) must be below max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Input plausibility bounds and output sanity ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Body weight (kg): 20-300
    pub weight_kg: Bounds,
    /// Height (cm): 100-250
    pub height_cm: Bounds,
    /// Age (years): 10-100
    pub age_years: Bounds,
    /// Body fat (%): 3-70
    pub body_fat_percent: Bounds,
    /// Expected BMR per kg of body weight: 15-35 kcal/kg
    pub bmr_kcal_per_kg: Bounds,
    /// Allowed divergence of macro kcal from the target (%): 5
    pub macro_sum_tolerance_percent: f64,
    /// Protein share (%): 10-35
    pub protein_percent: Bounds,
    /// Carbohydrate share (%): 20-65
    pub carbs_percent: Bounds,
    /// Fat share (%): 15-35
    pub fat_percent: Bounds,
    /// Protein override (g/kg): 0.5-3.5
    pub protein_override_g_per_kg: Bounds,
    /// Fat override (g/kg): 0.3-2.5
    pub fat_override_g_per_kg: Bounds,
    /// Custom objective target (kcal/day): 1-10000
    pub custom_target_kcal: Bounds,
    /// Absolute carbohydrate floor (g/day): 1-1000
    pub carb_floor_grams: Bounds,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            weight_kg: Bounds {
                min: physiology::WEIGHT_MIN_KG,
                max: physiology::WEIGHT_MAX_KG,
            },
            height_cm: Bounds {
                min: physiology::HEIGHT_MIN_CM,
                max: physiology::HEIGHT_MAX_CM,
            },
            age_years: Bounds {
                min: f64::from(physiology::AGE_MIN_YEARS),
                max: f64::from(physiology::AGE_MAX_YEARS),
            },
            body_fat_percent: Bounds {
                min: physiology::BODY_FAT_MIN_PERCENT,
                max: physiology::BODY_FAT_MAX_PERCENT,
            },
            bmr_kcal_per_kg: Bounds {
                min: physiology::BMR_MIN_KCAL_PER_KG,
                max: physiology::BMR_MAX_KCAL_PER_KG,
            },
            macro_sum_tolerance_percent: physiology::MACRO_SUM_TOLERANCE_PERCENT,
            protein_percent: Bounds::from_pair(physiology::PROTEIN_PERCENT_RANGE),
            carbs_percent: Bounds::from_pair(physiology::CARBS_PERCENT_RANGE),
            fat_percent: Bounds::from_pair(physiology::FAT_PERCENT_RANGE),
            protein_override_g_per_kg: Bounds::from_pair(
                physiology::PROTEIN_OVERRIDE_RANGE_G_PER_KG,
            ),
            fat_override_g_per_kg: Bounds::from_pair(physiology::FAT_OVERRIDE_RANGE_G_PER_KG),
            custom_target_kcal: Bounds::from_pair(physiology::CUSTOM_TARGET_RANGE_KCAL),
            carb_floor_grams: Bounds::from_pair(physiology::CARB_FLOOR_RANGE_G),
        }
    }
}

// ============================================================================
// Meal split
// ============================================================================

/// Share of the daily target assigned to each meal
///
/// Proportions must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealSplitConfig {
    /// Breakfast: 25%
    pub breakfast: f64,
    /// Morning snack: 5%
    pub morning_snack: f64,
    /// Lunch: 35%
    pub lunch: f64,
    /// Afternoon snack: 10%
    pub afternoon_snack: f64,
    /// Dinner: 20%
    pub dinner: f64,
    /// Supper: 5%
    pub supper: f64,
}

impl Default for MealSplitConfig {
    fn default() -> Self {
        Self {
            breakfast: 0.25,
            morning_snack: 0.05,
            lunch: 0.35,
            afternoon_snack: 0.10,
            dinner: 0.20,
            supper: 0.05,
        }
    }
}

impl MealSplitConfig {
    const SUM_TOLERANCE: f64 = 1e-6;

    /// Slots paired with their proportions, in meal order
    #[must_use]
    pub const fn proportions(&self) -> [(MealSlot, f64); 6] {
        [
            (MealSlot::Breakfast, self.breakfast),
            (MealSlot::MorningSnack, self.morning_snack),
            (MealSlot::Lunch, self.lunch),
            (MealSlot::AfternoonSnack, self.afternoon_snack),
            (MealSlot::Dinner, self.dinner),
            (MealSlot::Supper, self.supper),
        ]
    }

    /// Validate proportions
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` if a proportion is outside 0.0-1.0,
    /// or `ConfigError::InvalidWeights` if they do not sum to 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (slot, value) in self.proportions() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{slot:?} proportion must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        let sum: f64 = self.proportions().iter().map(|(_, value)| value).sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "meal proportions must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Values applied when a form leaves a choice open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationDefaults {
    /// Objective policy when none is selected
    pub objective_policy: ObjectivePolicy,
    /// Formula when none is selected
    pub formula: BmrFormula,
    /// Level used when the activity value is unrecognized; `None` rejects it
    pub unknown_activity_fallback: Option<ActivityLevel>,
}

impl Default for CalculationDefaults {
    fn default() -> Self {
        Self {
            objective_policy: ObjectivePolicy::Ratio,
            formula: BmrFormula::default(),
            unknown_activity_fallback: None,
        }
    }
}

/// Validate that every activity factor is positive and ordered by intensity
pub(super) fn validate_activity_factors(config: &ActivityFactorsConfig) -> Result<(), ConfigError> {
    let mut previous = 0.0;
    for level in ActivityLevel::ALL {
        let factor = config.factor_for(level);
        if !factor.is_finite() || factor <= previous {
            return Err(ConfigError::InvalidRange(format!(
                "activity factor for {level} must be positive and above the previous level, \
                 got {factor}"
            )));
        }
        previous = factor;
    }
    Ok(())
}

/// Validate objective ratios and the ordering of the offsets
pub(super) fn validate_objectives(config: &ObjectiveConfig) -> Result<(), ConfigError> {
    for (name, ratio) in [
        ("weight_loss_ratio", config.weight_loss_ratio),
        ("maintenance_ratio", config.maintenance_ratio),
        ("hypertrophy_ratio", config.hypertrophy_ratio),
    ] {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{name} must be positive, got {ratio}"
            )));
        }
    }
    if config.weight_loss_offset_kcal > config.maintenance_offset_kcal
        || config.maintenance_offset_kcal > config.hypertrophy_offset_kcal
    {
        return Err(ConfigError::InvalidRange(
            "objective offsets must satisfy weight_loss <= maintenance <= hypertrophy".to_owned(),
        ));
    }
    Ok(())
}

/// Validate that every profile ratio is positive
pub(super) fn validate_profiles(config: &ProfileMacrosConfig) -> Result<(), ConfigError> {
    for (profile, ratios) in [
        (Profile::Eutrophic, config.eutrophic),
        (Profile::Overweight, config.overweight),
        (Profile::Athlete, config.athlete),
    ] {
        if !(ratios.protein_g_per_kg > 0.0 && ratios.fat_g_per_kg > 0.0) {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{profile} protein and fat ratios must be positive"
            )));
        }
    }
    Ok(())
}

/// Validate bounds ordering and percentage ranges
pub(super) fn validate_bounds(config: &ValidationConfig) -> Result<(), ConfigError> {
    config.weight_kg.check("weight_kg")?;
    config.height_cm.check("height_cm")?;
    config.age_years.check("age_years")?;
    config.body_fat_percent.check("body_fat_percent")?;
    config.bmr_kcal_per_kg.check("bmr_kcal_per_kg")?;
    config.protein_override_g_per_kg.check("protein_override_g_per_kg")?;
    config.fat_override_g_per_kg.check("fat_override_g_per_kg")?;
    config.custom_target_kcal.check("custom_target_kcal")?;
    config.carb_floor_grams.check("carb_floor_grams")?;
    for (name, bounds) in [
        ("protein_percent", config.protein_percent),
        ("carbs_percent", config.carbs_percent),
        ("fat_percent", config.fat_percent),
    ] {
        bounds.check(name)?;
        if bounds.min < 0.0 || bounds.max > 100.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{name} must lie within 0-100"
            )));
        }
    }
    let tolerance = config.macro_sum_tolerance_percent;
    if !tolerance.is_finite() || tolerance <= 0.0 || tolerance > 100.0 {
        return Err(ConfigError::ValueOutOfRange(format!(
            "macro_sum_tolerance_percent must be in (0, 100], got {tolerance}"
        )));
    }
    Ok(())
}
