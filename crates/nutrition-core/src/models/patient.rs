// ABOUTME: Patient anthropometric measurement model and biological sex normalization
// ABOUTME: Handles sex code aliases, age derivation from birth date, and lean mass helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex used only to select formula coefficients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male coefficient set
    Male,
    /// Female coefficient set
    Female,
}

impl Sex {
    /// Canonical identifiers
    pub const NAMES: [&'static str; 2] = ["male", "female"];

    /// Parse the many spellings patient records carry
    ///
    /// Accepts English and Portuguese words and single-letter codes,
    /// case-insensitive: `male`, `m`, `masculino`, `homem`, `man`,
    /// `female`, `f`, `feminino`, `mulher`, `woman`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "masculino" | "masc" | "homem" | "man" | "h" => Some(Self::Male),
            "female" | "f" | "feminino" | "fem" | "mulher" | "woman" => Some(Self::Female),
            _ => None,
        }
    }

    /// Canonical name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anthropometric input to every formula
///
/// Bounds are not enforced by construction; the validator's input pass
/// rejects implausible values before any formula runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientMeasurement {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in completed years
    pub age_years: u32,
    /// Biological sex (coefficient selector)
    pub sex: Sex,
    /// Body-fat percentage, required by lean-mass formulas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
}

impl PatientMeasurement {
    /// Create a measurement without body-fat data
    #[must_use]
    pub const fn new(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> Self {
        Self {
            weight_kg,
            height_cm,
            age_years,
            sex,
            body_fat_percent: None,
        }
    }

    /// Attach body-fat percentage
    #[must_use]
    pub const fn with_body_fat(mut self, percent: f64) -> Self {
        self.body_fat_percent = Some(percent);
        self
    }

    /// Lean body mass in kg, when body fat is known
    #[must_use]
    pub fn lean_body_mass_kg(&self) -> Option<f64> {
        self.body_fat_percent
            .map(|percent| self.weight_kg * (1.0 - percent / 100.0))
    }

    /// Body mass index (kg/m²)
    #[must_use]
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

/// Completed years between `birth_date` and `today`
///
/// Returns `None` when the birth date lies in the future.
#[must_use]
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth_date > today {
        return None;
    }
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Parse a decimal typed into a form, accepting a comma separator
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_aliases_normalize_to_one_code() {
        for raw in ["male", "M", "Masculino", " homem "] {
            assert_eq!(Sex::parse(raw), Some(Sex::Male), "{raw}");
        }
        for raw in ["female", "f", "FEMININO", "mulher"] {
            assert_eq!(Sex::parse(raw), Some(Sex::Female), "{raw}");
        }
        assert_eq!(Sex::parse("x"), None);
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
        let day_before = NaiveDate::from_ymd_opt(2020, 6, 14).unwrap();
        let birthday = NaiveDate::from_ymd_opt(2020, 6, 15).unwrap();

        assert_eq!(age_on(birth, day_before), Some(29));
        assert_eq!(age_on(birth, birthday), Some(30));
        assert_eq!(age_on(birthday, birth), None);
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal("70,5"), Some(70.5));
        assert_eq!(parse_decimal(" 175 "), Some(175.0));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn test_lean_body_mass() {
        let patient = PatientMeasurement::new(80.0, 180.0, 30, Sex::Male).with_body_fat(20.0);
        let lbm = patient.lean_body_mass_kg().unwrap();
        assert!((lbm - 64.0).abs() < f64::EPSILON);
        assert!(PatientMeasurement::new(80.0, 180.0, 30, Sex::Male)
            .lean_body_mass_kg()
            .is_none());
    }
}
