// ABOUTME: BMR equation implementations and the formula dispatch table
// ABOUTME: Sex-based linear equations and lean-mass equations evaluated from config coefficients

use crate::config::intelligence::{BmrConfig, LeanMassCoefficients, SexBasedFormulaConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{PatientMeasurement, Sex};
use nutrition_core::intelligence::algorithms::BmrFormula;

/// Numeric inputs shared by every BMR equation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmrInputs {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age_years: f64,
    /// Coefficient selector
    pub sex: Sex,
    /// Lean body mass (kg), known only when body fat was measured
    pub lean_body_mass_kg: Option<f64>,
}

impl BmrInputs {
    /// Derive inputs from a measurement
    #[must_use]
    pub fn from_measurement(patient: &PatientMeasurement) -> Self {
        Self {
            weight_kg: patient.weight_kg,
            height_cm: patient.height_cm,
            age_years: f64::from(patient.age_years),
            sex: patient.sex,
            lean_body_mass_kg: patient.lean_body_mass_kg(),
        }
    }
}

/// One BMR equation; `None` when a required input is absent
pub type BmrFn = fn(&BmrInputs, &BmrConfig) -> Option<f64>;

fn sex_based(inputs: &BmrInputs, coefficients: &SexBasedFormulaConfig) -> f64 {
    coefficients
        .for_sex(inputs.sex)
        .apply(inputs.weight_kg, inputs.height_cm, inputs.age_years)
}

fn lean_mass(inputs: &BmrInputs, coefficients: &LeanMassCoefficients) -> Option<f64> {
    inputs
        .lean_body_mass_kg
        .map(|lbm| coefficients.lean_mass.mul_add(lbm, coefficients.constant))
}

fn harris_benedict_original(inputs: &BmrInputs, config: &BmrConfig) -> Option<f64> {
    Some(sex_based(inputs, &config.harris_benedict_original))
}

fn harris_benedict_revised(inputs: &BmrInputs, config: &BmrConfig) -> Option<f64> {
    Some(sex_based(inputs, &config.harris_benedict_revised))
}

fn mifflin_st_jeor(inputs: &BmrInputs, config: &BmrConfig) -> Option<f64> {
    Some(sex_based(inputs, &config.mifflin_st_jeor))
}

fn katch_mcardle(inputs: &BmrInputs, config: &BmrConfig) -> Option<f64> {
    lean_mass(inputs, &config.katch_mcardle)
}

fn cunningham(inputs: &BmrInputs, config: &BmrConfig) -> Option<f64> {
    lean_mass(inputs, &config.cunningham)
}

/// Dispatch table: the equation registered for each formula
#[must_use]
pub const fn formula_fn(formula: BmrFormula) -> BmrFn {
    match formula {
        BmrFormula::HarrisBenedictOriginal => harris_benedict_original,
        BmrFormula::HarrisBenedictRevised => harris_benedict_revised,
        BmrFormula::MifflinStJeor => mifflin_st_jeor,
        BmrFormula::KatchMcArdle => katch_mcardle,
        BmrFormula::Cunningham => cunningham,
    }
}

/// Estimate BMR (kcal/day) with the selected formula
///
/// # Errors
///
/// Returns `AppError::InvalidInput` when the formula needs lean body mass and
/// no body-fat percentage was supplied, or when the result is not finite
pub fn estimate_bmr(formula: BmrFormula, inputs: &BmrInputs, config: &BmrConfig) -> AppResult<f64> {
    let bmr = formula_fn(formula)(inputs, config).ok_or_else(|| {
        AppError::invalid_input(format!(
            "{} requires body_fat_percent",
            formula.description()
        ))
    })?;

    if !bmr.is_finite() {
        return Err(AppError::invalid_input(format!(
            "{formula} produced a non-finite BMR"
        )));
    }
    Ok(bmr)
}
