// ABOUTME: Nutrition prescription models: categorical inputs, requests, results, and warnings
// ABOUTME: ActivityLevel, Objective, ObjectivePolicy, Profile, MacroBreakdown, CalculationResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::patient::PatientMeasurement;
use crate::constants::physiology::BMI_OVERWEIGHT_THRESHOLD;
use crate::intelligence::algorithms::BmrFormula;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

fn normalize_token(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

// ============================================================================
// Categorical inputs
// ============================================================================

/// Physical activity level, ordered by intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Intense,
    /// Hard daily training or physical job
    VeryIntense,
}

impl ActivityLevel {
    /// Every level, least to most intense
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Intense,
        Self::VeryIntense,
    ];

    /// Canonical identifiers
    pub const NAMES: [&'static str; 5] =
        ["sedentary", "light", "moderate", "intense", "very_intense"];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Intense => "intense",
            Self::VeryIntense => "very_intense",
        }
    }

    /// Parse canonical names and the aliases found in stored form data
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_token(s).as_str() {
            "sedentary" | "sedentario" | "sedentaria" => Some(Self::Sedentary),
            "light" | "lightly_active" | "leve" | "pouco_ativo" => Some(Self::Light),
            "moderate" | "moderately_active" | "moderado" | "moderada" => Some(Self::Moderate),
            "intense" | "very_active" | "intenso" | "intensa" | "ativo" => Some(Self::Intense),
            "very_intense" | "extra_active" | "muito_intenso" | "muito_ativo" => {
                Some(Self::VeryIntense)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Nutritional goal driving the energy target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Caloric deficit
    WeightLoss,
    /// Caloric balance
    Maintenance,
    /// Caloric surplus for muscle gain
    Hypertrophy,
    /// Caller-supplied target
    Custom,
}

impl Objective {
    /// Canonical identifiers
    pub const NAMES: [&'static str; 4] = ["weight_loss", "maintenance", "hypertrophy", "custom"];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::Maintenance => "maintenance",
            Self::Hypertrophy => "hypertrophy",
            Self::Custom => "custom",
        }
    }

    /// Parse canonical names and stored aliases
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_token(s).as_str() {
            "weight_loss" | "loss" | "emagrecimento" | "perda_de_peso" | "deficit" => {
                Some(Self::WeightLoss)
            }
            "maintenance" | "maintain" | "manutencao" | "manutenção" => Some(Self::Maintenance),
            "hypertrophy" | "muscle_gain" | "gain" | "hipertrofia" | "ganho_de_massa" => {
                Some(Self::Hypertrophy)
            }
            "custom" | "personalizado" | "personalizada" => Some(Self::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the objective adjusts expenditure
///
/// The two policies are distinct prescriptions and are never combined in one
/// result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectivePolicy {
    /// Multiply expenditure by a per-objective ratio (0.8 / 1.0 / 1.15)
    #[default]
    Ratio,
    /// Add a fixed per-objective kcal offset (-500 / 0 / +400), the ENP variant
    Offset,
}

impl ObjectivePolicy {
    /// Canonical identifiers
    pub const NAMES: [&'static str; 2] = ["ratio", "offset"];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ratio => "ratio",
            Self::Offset => "offset",
        }
    }

    /// Parse canonical names and aliases
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_token(s).as_str() {
            "ratio" | "percentage" | "percent" | "factor" => Some(Self::Ratio),
            "offset" | "enp" | "fixed" | "kcal_offset" => Some(Self::Offset),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body-composition profile driving protein and fat ratios
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Normal weight
    Eutrophic,
    /// Overweight or obese
    Overweight,
    /// Trained athlete
    Athlete,
}

impl Profile {
    /// Canonical identifiers
    pub const NAMES: [&'static str; 3] = ["eutrophic", "overweight", "athlete"];

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eutrophic => "eutrophic",
            Self::Overweight => "overweight",
            Self::Athlete => "athlete",
        }
    }

    /// Parse canonical names and stored aliases
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_token(s).as_str() {
            "eutrophic" | "normal" | "normal_weight" | "eutrofico" | "eutrófico" => {
                Some(Self::Eutrophic)
            }
            "overweight" | "obese" | "overweight_obese" | "sobrepeso" | "obesidade"
            | "obeso" => Some(Self::Overweight),
            "athlete" | "atleta" => Some(Self::Athlete),
            _ => None,
        }
    }

    /// Profile suggested by BMI alone
    ///
    /// Athletes are never suggested: muscle mass inflates BMI, so that
    /// profile is always an explicit choice.
    #[must_use]
    pub fn suggest_from_bmi(bmi: f64) -> Self {
        if bmi >= BMI_OVERWEIGHT_THRESHOLD {
            Self::Overweight
        } else {
            Self::Eutrophic
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do when protein and fat leave too little room for carbohydrates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum CarbFloorPolicy {
    /// Clamp the carbohydrate remainder at zero
    #[default]
    None,
    /// Raise carbohydrates to at least this share of the energy target
    PercentOfTarget {
        /// Minimum share in percent (default 10)
        percent: f64,
    },
    /// Raise carbohydrates to at least this many grams
    MinimumGrams {
        /// Minimum grams (default 50)
        grams: f64,
    },
}

impl CarbFloorPolicy {
    /// Default percent floor
    pub const DEFAULT_PERCENT: f64 = 10.0;
    /// Default gram floor
    pub const DEFAULT_GRAMS: f64 = 50.0;

    /// Floor in kcal for a given energy target
    #[must_use]
    pub fn floor_kcal(&self, energy_target_kcal: f64, kcal_per_g_carbs: f64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::PercentOfTarget { percent } => energy_target_kcal.max(0.0) * percent / 100.0,
            Self::MinimumGrams { grams } => grams * kcal_per_g_carbs,
        }
    }
}

/// Optional per-calculation macro overrides
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MacroConfig {
    /// Protein g/kg replacing the profile ratio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g_per_kg: Option<f64>,
    /// Fat g/kg replacing the profile ratio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g_per_kg: Option<f64>,
    /// Carbohydrate floor fallback
    #[serde(default)]
    pub carb_floor: CarbFloorPolicy,
}

// ============================================================================
// Request
// ============================================================================

/// Typed, normalized input to one calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Anthropometric data
    pub patient: PatientMeasurement,
    /// Physical activity level
    pub activity_level: ActivityLevel,
    /// Goal
    pub objective: Objective,
    /// Objective adjustment policy
    pub objective_policy: ObjectivePolicy,
    /// Target for the `custom` objective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_target_kcal: Option<f64>,
    /// Body-composition profile
    pub profile: Profile,
    /// Selected BMR formula
    pub formula: BmrFormula,
    /// Macro overrides
    #[serde(default)]
    pub macro_config: MacroConfig,
}

impl CalculationRequest {
    /// Create a request using the ratio policy and no macro overrides
    #[must_use]
    pub fn new(
        patient: PatientMeasurement,
        activity_level: ActivityLevel,
        objective: Objective,
        profile: Profile,
        formula: BmrFormula,
    ) -> Self {
        Self {
            patient,
            activity_level,
            objective,
            objective_policy: ObjectivePolicy::default(),
            custom_target_kcal: None,
            profile,
            formula,
            macro_config: MacroConfig::default(),
        }
    }

    /// Select the objective policy
    #[must_use]
    pub const fn with_policy(mut self, policy: ObjectivePolicy) -> Self {
        self.objective_policy = policy;
        self
    }

    /// Supply the `custom` objective target
    #[must_use]
    pub const fn with_custom_target(mut self, target_kcal: f64) -> Self {
        self.custom_target_kcal = Some(target_kcal);
        self
    }

    /// Supply macro overrides
    #[must_use]
    pub const fn with_macro_config(mut self, macro_config: MacroConfig) -> Self {
        self.macro_config = macro_config;
        self
    }
}

// ============================================================================
// Result
// ============================================================================

/// One macronutrient's share of the prescription
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroAmount {
    /// Grams per day
    pub grams: f64,
    /// Kcal per day
    pub kcal: f64,
    /// Share of total macro kcal (0-100)
    pub percent: f64,
}

/// Protein, carbohydrate, and fat amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroBreakdown {
    /// Protein
    pub protein: MacroAmount,
    /// Carbohydrates
    pub carbs: MacroAmount,
    /// Fat
    pub fat: MacroAmount,
}

impl MacroBreakdown {
    /// Sum of the three kcal values
    #[must_use]
    pub fn total_kcal(&self) -> f64 {
        self.protein.kcal + self.carbs.kcal + self.fat.kcal
    }

    /// Sum of the three percentages
    #[must_use]
    pub fn total_percent(&self) -> f64 {
        self.protein.percent + self.carbs.percent + self.fat.percent
    }
}

/// Severity family of a non-blocking warning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Output outside physiologically expected bounds
    Range,
    /// Macro energy diverges from the target after rounding, clamping, or flooring
    Consistency,
    /// A documented fallback replaced an unrecognized input
    ConfigFallback,
}

/// Specific warning condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// BMR outside weight x 15 .. weight x 35
    BmrOutOfExpectedRange,
    /// Energy target was zero or negative and was clamped to zero
    EnergyTargetNotPositive,
    /// Protein share outside 10-35 %
    ProteinPercentOutOfRange,
    /// Carbohydrate share outside 20-65 %
    CarbsPercentOutOfRange,
    /// Fat share outside 15-35 %
    FatPercentOutOfRange,
    /// Protein and fat alone exceed the target; carbohydrates clamped to zero
    CarbsClamped,
    /// Carbohydrates raised to the configured floor
    CarbFloorApplied,
    /// Macro kcal sum diverges from the target beyond tolerance
    MacroSumDivergence,
    /// Unknown activity level replaced by the configured fallback
    ActivityLevelFallback,
}

impl WarningCode {
    /// Family this code belongs to
    #[must_use]
    pub const fn kind(&self) -> WarningKind {
        match self {
            Self::BmrOutOfExpectedRange
            | Self::EnergyTargetNotPositive
            | Self::ProteinPercentOutOfRange
            | Self::CarbsPercentOutOfRange
            | Self::FatPercentOutOfRange => WarningKind::Range,
            Self::CarbsClamped | Self::CarbFloorApplied | Self::MacroSumDivergence => {
                WarningKind::Consistency
            }
            Self::ActivityLevelFallback => WarningKind::ConfigFallback,
        }
    }
}

/// Advisory attached to an otherwise valid result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// Family
    pub kind: WarningKind,
    /// Condition
    pub code: WarningCode,
    /// Message suitable for an advisory banner
    pub message: String,
}

impl CalculationWarning {
    /// Create a warning; the kind follows from the code
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            kind: code.kind(),
            code,
            message: message.into(),
        }
    }
}

/// Where a result came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Served from the result cache
    pub from_cache: bool,
    /// Age of the cache entry in milliseconds, when served from cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_age_ms: Option<u64>,
    /// When the numbers were computed
    pub computed_at: DateTime<Utc>,
}

/// Energy and macronutrient prescription
///
/// Constructed once per request by the engine and never mutated afterwards;
/// cache hits return a copy with updated provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Basal metabolic rate (kcal/day)
    pub bmr_kcal: f64,
    /// Activity-adjusted expenditure, TDEE / GET (kcal/day)
    pub total_energy_expenditure_kcal: f64,
    /// Objective-adjusted target, VET (kcal/day)
    pub energy_target_kcal: f64,
    /// Macro breakdown
    pub macros: MacroBreakdown,
    /// Formula actually used
    pub formula: BmrFormula,
    /// Activity level used
    pub activity_level: ActivityLevel,
    /// Objective used
    pub objective: Objective,
    /// Objective policy used
    pub objective_policy: ObjectivePolicy,
    /// Profile used
    pub profile: Profile,
    /// Protein ratio applied (g/kg)
    pub protein_g_per_kg: f64,
    /// Fat ratio applied (g/kg)
    pub fat_g_per_kg: f64,
    /// Non-blocking advisories
    pub warnings: Vec<CalculationWarning>,
    /// Cache provenance
    pub provenance: Provenance,
}

impl CalculationResult {
    /// True when any warning is attached
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True when a warning with this code is attached
    #[must_use]
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}

/// Snapshot stored by the persistence step as calculation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationHistoryRecord {
    /// Record identifier
    pub id: Uuid,
    /// Patient the calculation belongs to
    pub patient_id: Uuid,
    /// When the record was created
    pub recorded_at: DateTime<Utc>,
    /// Normalized inputs
    pub request: CalculationRequest,
    /// Outputs including warnings
    pub result: CalculationResult,
}

impl CalculationHistoryRecord {
    /// Build a history record for a patient
    #[must_use]
    pub fn new(patient_id: Uuid, request: CalculationRequest, result: CalculationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            recorded_at: Utc::now(),
            request,
            result,
        }
    }
}

// ============================================================================
// Meal split
// ============================================================================

/// Meal slot in a daily plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Breakfast
    Breakfast,
    /// Mid-morning snack
    MorningSnack,
    /// Lunch
    Lunch,
    /// Afternoon snack
    AfternoonSnack,
    /// Dinner
    Dinner,
    /// Late snack
    Supper,
}

/// Energy and macro target for one meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MealTarget {
    /// Slot
    pub slot: MealSlot,
    /// Share of the daily target (0-1)
    pub proportion: f64,
    /// Kcal for this meal
    pub energy_kcal: f64,
    /// Protein grams
    pub protein_g: f64,
    /// Carbohydrate grams
    pub carbs_g: f64,
    /// Fat grams
    pub fat_g: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_levels_are_ordered() {
        assert!(ActivityLevel::Sedentary < ActivityLevel::Light);
        assert!(ActivityLevel::Intense < ActivityLevel::VeryIntense);
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::parse(level.name()), Some(level));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(ActivityLevel::parse("Muito Intenso"), Some(ActivityLevel::VeryIntense));
        assert_eq!(Objective::parse("emagrecimento"), Some(Objective::WeightLoss));
        assert_eq!(ObjectivePolicy::parse("ENP"), Some(ObjectivePolicy::Offset));
        assert_eq!(Profile::parse("obesidade"), Some(Profile::Overweight));
        assert_eq!(Profile::parse("skinny"), None);
    }

    #[test]
    fn test_profile_suggestion() {
        assert_eq!(Profile::suggest_from_bmi(22.0), Profile::Eutrophic);
        assert_eq!(Profile::suggest_from_bmi(25.0), Profile::Overweight);
        assert_eq!(Profile::suggest_from_bmi(41.0), Profile::Overweight);
    }

    #[test]
    fn test_warning_kind_follows_code() {
        let warning = CalculationWarning::new(WarningCode::CarbsClamped, "clamped");
        assert_eq!(warning.kind, WarningKind::Consistency);
        assert_eq!(WarningCode::BmrOutOfExpectedRange.kind(), WarningKind::Range);
    }

    #[test]
    fn test_carb_floor_kcal() {
        assert!(CarbFloorPolicy::None.floor_kcal(2000.0, 4.0).abs() < f64::EPSILON);
        let percent = CarbFloorPolicy::PercentOfTarget { percent: 10.0 };
        assert!((percent.floor_kcal(2000.0, 4.0) - 200.0).abs() < f64::EPSILON);
        let grams = CarbFloorPolicy::MinimumGrams { grams: 50.0 };
        assert!((grams.floor_kcal(2000.0, 4.0) - 200.0).abs() < f64::EPSILON);
    }
}
