// ABOUTME: Input and output validation passes for nutrition calculations
// ABOUTME: Blocking field-addressed errors before calculation, advisory warnings after
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Validation
//!
//! Two passes around the calculation chain:
//!
//! - **Input pass** ([`validate_input`]): every raw-input violation is
//!   collected, addressed to its field, and returned together. A request that
//!   fails never reaches a formula.
//! - **Output pass** ([`check_output`]): physiological and arithmetic sanity
//!   checks on the computed numbers. Findings become [`CalculationWarning`]s
//!   attached to the result; they never block it.

use crate::config::intelligence::{Bounds, ValidationConfig};
use crate::errors::{FieldIssue, IssueKind, ValidationErrors};
use crate::models::{
    CalculationRequest, CalculationWarning, CarbFloorPolicy, MacroAmount, MacroBreakdown,
    Objective, WarningCode,
};
use nutrition_core::intelligence::algorithms::BmrFormula;

/// Form field names used in field-addressed errors
pub mod fields {
    /// Body weight
    pub const WEIGHT_KG: &str = "weight_kg";
    /// Height
    pub const HEIGHT_CM: &str = "height_cm";
    /// Age in years
    pub const AGE_YEARS: &str = "age_years";
    /// Birth date, used when age is absent
    pub const BIRTH_DATE: &str = "birth_date";
    /// Biological sex
    pub const SEX: &str = "sex";
    /// Body-fat percentage
    pub const BODY_FAT_PERCENT: &str = "body_fat_percent";
    /// Activity level
    pub const ACTIVITY_LEVEL: &str = "activity_level";
    /// Objective
    pub const OBJECTIVE: &str = "objective";
    /// Objective policy
    pub const OBJECTIVE_POLICY: &str = "objective_policy";
    /// Custom objective target
    pub const CUSTOM_TARGET_KCAL: &str = "custom_target_kcal";
    /// Body-composition profile
    pub const PROFILE: &str = "profile";
    /// BMR formula
    pub const FORMULA: &str = "formula";
    /// Protein override
    pub const PROTEIN_G_PER_KG: &str = "macro_config.protein_g_per_kg";
    /// Fat override
    pub const FAT_G_PER_KG: &str = "macro_config.fat_g_per_kg";
    /// Carbohydrate floor
    pub const CARB_FLOOR: &str = "macro_config.carb_floor";
    /// Computed result as a whole
    pub const RESULT: &str = "result";
}

/// Issue raised when a lean-mass formula is selected without body fat
#[must_use]
pub fn body_fat_required_issue(formula: BmrFormula) -> FieldIssue {
    FieldIssue::new(
        fields::BODY_FAT_PERCENT,
        IssueKind::BodyFatRequired {
            formula: formula.name().to_owned(),
        },
        format!("{} requires body_fat_percent", formula.description()),
    )
}

/// Issue raised when the `custom` objective has no positive target
#[must_use]
pub fn custom_target_required_issue() -> FieldIssue {
    FieldIssue::new(
        fields::CUSTOM_TARGET_KCAL,
        IssueKind::CustomTargetRequired,
        "custom objective requires a positive custom_target_kcal",
    )
}

/// Check a measurement against its bounds; returns the issue, if any
#[must_use]
pub fn check_measure(field: &str, value: f64, bounds: Bounds) -> Option<FieldIssue> {
    if !value.is_finite() {
        return Some(FieldIssue::new(
            field,
            IssueKind::NotFinite,
            format!("{field} must be a finite number"),
        ));
    }
    if value <= 0.0 {
        return Some(FieldIssue::new(
            field,
            IssueKind::NotPositive { actual: value },
            format!("{field} must be positive, got {value}"),
        ));
    }
    if !bounds.contains(value) {
        return Some(FieldIssue::out_of_range(
            field, bounds.min, bounds.max, value,
        ));
    }
    None
}

/// Input pass: collect every blocking problem with a request
///
/// # Errors
///
/// Returns all field-addressed issues when at least one is found
pub fn validate_input(
    request: &CalculationRequest,
    config: &ValidationConfig,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let patient = &request.patient;

    errors
        .issues
        .extend(check_measure(fields::WEIGHT_KG, patient.weight_kg, config.weight_kg));
    errors
        .issues
        .extend(check_measure(fields::HEIGHT_CM, patient.height_cm, config.height_cm));

    let age = f64::from(patient.age_years);
    if !config.age_years.contains(age) {
        errors.push(FieldIssue::out_of_range(
            fields::AGE_YEARS,
            config.age_years.min,
            config.age_years.max,
            age,
        ));
    }

    match patient.body_fat_percent {
        Some(percent) => errors.issues.extend(check_measure(
            fields::BODY_FAT_PERCENT,
            percent,
            config.body_fat_percent,
        )),
        None if request.formula.requires_body_fat() => {
            errors.push(body_fat_required_issue(request.formula));
        }
        None => {}
    }

    if request.objective == Objective::Custom {
        match request.custom_target_kcal {
            Some(target) => errors.issues.extend(check_measure(
                fields::CUSTOM_TARGET_KCAL,
                target,
                config.custom_target_kcal,
            )),
            None => errors.push(custom_target_required_issue()),
        }
    }

    let overrides = &request.macro_config;
    if let Some(protein) = overrides.protein_g_per_kg {
        errors.issues.extend(check_measure(
            fields::PROTEIN_G_PER_KG,
            protein,
            config.protein_override_g_per_kg,
        ));
    }
    if let Some(fat) = overrides.fat_g_per_kg {
        errors.issues.extend(check_measure(
            fields::FAT_G_PER_KG,
            fat,
            config.fat_override_g_per_kg,
        ));
    }
    errors
        .issues
        .extend(check_carb_floor(overrides.carb_floor, config));

    errors.into_result(())
}

fn check_carb_floor(policy: CarbFloorPolicy, config: &ValidationConfig) -> Option<FieldIssue> {
    match policy {
        CarbFloorPolicy::None => None,
        CarbFloorPolicy::PercentOfTarget { percent } => {
            check_measure(fields::CARB_FLOOR, percent, Bounds { min: 0.0, max: 100.0 })
        }
        CarbFloorPolicy::MinimumGrams { grams } => {
            check_measure(fields::CARB_FLOOR, grams, config.carb_floor_grams)
        }
    }
}

/// Output pass: sanity checks on computed numbers
///
/// - BMR outside `weight x 15 .. weight x 35` kcal
/// - macro kcal sum diverging from the target beyond tolerance
/// - protein, carbohydrate, or fat share outside its expected range
#[must_use]
pub fn check_output(
    bmr_kcal: f64,
    weight_kg: f64,
    energy_target_kcal: f64,
    macros: &MacroBreakdown,
    config: &ValidationConfig,
) -> Vec<CalculationWarning> {
    let mut warnings = Vec::new();

    let expected_min = weight_kg * config.bmr_kcal_per_kg.min;
    let expected_max = weight_kg * config.bmr_kcal_per_kg.max;
    if !(expected_min..=expected_max).contains(&bmr_kcal) {
        warnings.push(CalculationWarning::new(
            WarningCode::BmrOutOfExpectedRange,
            format!(
                "BMR {bmr_kcal:.0} kcal is outside the expected \
                 {expected_min:.0}-{expected_max:.0} kcal for {weight_kg} kg"
            ),
        ));
    }

    let total_kcal = macros.total_kcal();
    let diverges = if energy_target_kcal > 0.0 {
        (total_kcal - energy_target_kcal).abs() / energy_target_kcal * 100.0
            > config.macro_sum_tolerance_percent
    } else {
        total_kcal > 0.0
    };
    if diverges {
        warnings.push(CalculationWarning::new(
            WarningCode::MacroSumDivergence,
            format!(
                "Macronutrients total {total_kcal:.0} kcal against a target of \
                 {energy_target_kcal:.0} kcal"
            ),
        ));
    }

    for (name, amount, bounds, code) in [
        (
            "Protein",
            macros.protein,
            config.protein_percent,
            WarningCode::ProteinPercentOutOfRange,
        ),
        (
            "Carbohydrate",
            macros.carbs,
            config.carbs_percent,
            WarningCode::CarbsPercentOutOfRange,
        ),
        (
            "Fat",
            macros.fat,
            config.fat_percent,
            WarningCode::FatPercentOutOfRange,
        ),
    ] {
        if let Some(warning) = check_share(name, amount, bounds, code) {
            warnings.push(warning);
        }
    }

    warnings
}

fn check_share(
    name: &str,
    amount: MacroAmount,
    bounds: Bounds,
    code: WarningCode,
) -> Option<CalculationWarning> {
    (!bounds.contains(amount.percent)).then(|| {
        CalculationWarning::new(
            code,
            format!(
                "{name} share {:.1}% is outside the recommended {}-{}%",
                amount.percent, bounds.min, bounds.max
            ),
        )
    })
}
