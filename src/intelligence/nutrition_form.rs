// ABOUTME: Form-state normalization into typed nutrition calculation requests
// ABOUTME: Parses decimals, dates, sex codes, and categorical aliases into field-addressed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calculation Form
//!
//! Patient records and form state arrive as strings: decimals with comma
//! separators, birth dates instead of ages, sex codes in several languages,
//! and activity or objective names in whatever vocabulary the record was
//! saved with. [`CalculationForm::parse`] turns that into a
//! [`CalculationRequest`], or into a [`ValidationErrors`] naming every field
//! that could not be read.
//!
//! Unknown categorical values are configuration errors. The only exception
//! is the activity level, which falls back to a configured level when
//! [`CalculationDefaults::unknown_activity_fallback`] is set; the fallback is
//! reported as a warning.

use super::nutrition_validation::{check_measure, fields};
use crate::config::intelligence::{Bounds, CalculationDefaults, ValidationConfig};
use crate::errors::{FieldIssue, ValidationErrors};
use crate::models::{
    age_on, parse_decimal, ActivityLevel, CalculationRequest, CalculationWarning, CarbFloorPolicy,
    MacroConfig, Objective, ObjectivePolicy, PatientMeasurement, Profile, Sex, WarningCode,
};
use chrono::NaiveDate;
use nutrition_core::intelligence::algorithms::BmrFormula;
use serde::{Deserialize, Serialize};

/// Accepted birth date layouts
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Raw calculation form, every field as received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationForm {
    /// Body weight in kg
    pub weight_kg: Option<String>,
    /// Height in cm
    pub height_cm: Option<String>,
    /// Age in completed years; takes precedence over `birth_date`
    #[serde(alias = "age")]
    pub age_years: Option<String>,
    /// Birth date (`YYYY-MM-DD` or `DD/MM/YYYY`)
    pub birth_date: Option<String>,
    /// Biological sex in any supported spelling
    pub sex: Option<String>,
    /// Body-fat percentage
    pub body_fat_percent: Option<String>,
    /// Activity level name or alias
    pub activity_level: Option<String>,
    /// Objective name or alias
    pub objective: Option<String>,
    /// `ratio` or `offset`; configured default when absent
    pub objective_policy: Option<String>,
    /// Target for the `custom` objective
    pub custom_target_kcal: Option<String>,
    /// Profile name or alias
    pub profile: Option<String>,
    /// BMR formula name or alias; configured default when absent
    pub formula: Option<String>,
    /// Protein override in g/kg
    pub protein_g_per_kg: Option<String>,
    /// Fat override in g/kg
    pub fat_g_per_kg: Option<String>,
    /// `none`, `percent[:p]`, or `grams[:g]`
    pub carb_floor: Option<String>,
}

/// Typed request plus warnings raised while reading the form
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedForm {
    /// Normalized request
    pub request: CalculationRequest,
    /// Fallbacks applied while parsing
    pub warnings: Vec<CalculationWarning>,
}

/// Trimmed, non-blank field value
fn present(field: Option<&String>) -> Option<&str> {
    field.map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Collects issues while fields are read one by one
struct FormReader<'a> {
    errors: ValidationErrors,
    bounds: &'a ValidationConfig,
}

impl FormReader<'_> {
    fn decimal(&mut self, field: &str, raw: Option<&String>) -> Option<f64> {
        let raw = present(raw)?;
        let value = parse_decimal(raw);
        if value.is_none() {
            self.errors.push(FieldIssue::not_numeric(field, raw));
        }
        value
    }

    fn required_decimal(&mut self, field: &str, raw: Option<&String>) -> Option<f64> {
        if present(raw).is_none() {
            self.errors.push(FieldIssue::missing(field));
            return None;
        }
        self.decimal(field, raw)
    }

    fn choice<T>(
        &mut self,
        field: &str,
        raw: Option<&String>,
        parse: fn(&str) -> Option<T>,
        valid: &[&str],
    ) -> Option<T> {
        let raw = present(raw)?;
        let value = parse(raw);
        if value.is_none() {
            self.errors.push(FieldIssue::unknown_value(field, raw, valid));
        }
        value
    }

    fn required_choice<T>(
        &mut self,
        field: &str,
        raw: Option<&String>,
        parse: fn(&str) -> Option<T>,
        valid: &[&str],
    ) -> Option<T> {
        if present(raw).is_none() {
            self.errors.push(FieldIssue::missing(field));
            return None;
        }
        self.choice(field, raw, parse, valid)
    }

    fn age(&mut self, form: &CalculationForm, today: NaiveDate) -> Option<u32> {
        if let Some(raw) = present(form.age_years.as_ref()) {
            let age = raw.parse::<u32>().ok();
            if age.is_none() {
                self.errors.push(FieldIssue::not_numeric(fields::AGE_YEARS, raw));
            }
            return age;
        }

        let Some(raw) = present(form.birth_date.as_ref()) else {
            self.errors.push(FieldIssue::missing(fields::AGE_YEARS));
            return None;
        };
        let Some(birth_date) = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        else {
            self.errors.push(FieldIssue::invalid_format(
                fields::BIRTH_DATE,
                raw,
                "a date as YYYY-MM-DD or DD/MM/YYYY",
            ));
            return None;
        };
        let age = age_on(birth_date, today);
        if age.is_none() {
            self.errors.push(FieldIssue::invalid_format(
                fields::BIRTH_DATE,
                raw,
                "a date that is not in the future",
            ));
        }
        age
    }

    fn sex(&mut self, raw: Option<&String>) -> Option<Sex> {
        let Some(raw) = present(raw) else {
            self.errors.push(FieldIssue::missing(fields::SEX));
            return None;
        };
        let sex = Sex::parse(raw);
        if sex.is_none() {
            self.errors.push(FieldIssue::invalid_format(
                fields::SEX,
                raw,
                "male or female (M/F, masculino/feminino)",
            ));
        }
        sex
    }

    fn carb_floor(&mut self, raw: Option<&String>) -> CarbFloorPolicy {
        let Some(raw) = present(raw) else {
            return CarbFloorPolicy::None;
        };
        let lowered = raw.to_lowercase();
        let (kind, amount) = lowered
            .split_once(':')
            .map_or((lowered.as_str(), None), |(kind, amount)| {
                (kind.trim(), Some(amount))
            });
        let amount = amount.map(parse_decimal);

        let policy = match (kind, amount) {
            ("none" | "off", None) => Some(CarbFloorPolicy::None),
            ("percent" | "percent_of_target", None) => Some(CarbFloorPolicy::PercentOfTarget {
                percent: CarbFloorPolicy::DEFAULT_PERCENT,
            }),
            ("percent" | "percent_of_target", Some(Some(percent))) => {
                Some(CarbFloorPolicy::PercentOfTarget { percent })
            }
            ("grams" | "minimum_grams", None) => Some(CarbFloorPolicy::MinimumGrams {
                grams: CarbFloorPolicy::DEFAULT_GRAMS,
            }),
            ("grams" | "minimum_grams", Some(Some(grams))) => {
                Some(CarbFloorPolicy::MinimumGrams { grams })
            }
            _ => None,
        };

        policy.unwrap_or_else(|| {
            self.errors.push(FieldIssue::invalid_format(
                fields::CARB_FLOOR,
                raw,
                "none, percent[:p], or grams[:g]",
            ));
            CarbFloorPolicy::None
        })
    }

    /// Report plausibility issues for numbers that did parse
    fn check_parsed(
        &mut self,
        field: &str,
        value: Option<f64>,
        bounds: fn(&ValidationConfig) -> Bounds,
    ) {
        let limits = bounds(self.bounds);
        if let Some(issue) = value.and_then(|value| check_measure(field, value, limits)) {
            self.errors.push(issue);
        }
    }
}

impl CalculationForm {
    /// Normalize the form into a typed request
    ///
    /// `today` anchors age derivation from `birth_date`. When any field
    /// cannot be read, the returned errors also cover the plausibility of the
    /// measurements that could be read, so one round trip reports every
    /// problem the form can show.
    ///
    /// # Errors
    ///
    /// Returns field-addressed issues for missing, malformed, or unknown values
    pub fn parse(
        &self,
        today: NaiveDate,
        defaults: &CalculationDefaults,
        bounds: &ValidationConfig,
    ) -> Result<ParsedForm, ValidationErrors> {
        let mut reader = FormReader {
            errors: ValidationErrors::new(),
            bounds,
        };
        let mut warnings = Vec::new();

        let weight_kg = reader.required_decimal(fields::WEIGHT_KG, self.weight_kg.as_ref());
        let height_cm = reader.required_decimal(fields::HEIGHT_CM, self.height_cm.as_ref());
        let age_years = reader.age(self, today);
        let sex = reader.sex(self.sex.as_ref());
        let body_fat_percent =
            reader.decimal(fields::BODY_FAT_PERCENT, self.body_fat_percent.as_ref());

        let activity_level = match present(self.activity_level.as_ref()) {
            Some(raw) => match (ActivityLevel::parse(raw), defaults.unknown_activity_fallback) {
                (Some(level), _) => Some(level),
                (None, Some(fallback)) => {
                    warnings.push(CalculationWarning::new(
                        WarningCode::ActivityLevelFallback,
                        format!("Unknown activity level '{raw}', using {fallback}"),
                    ));
                    Some(fallback)
                }
                (None, None) => {
                    reader.errors.push(FieldIssue::unknown_value(
                        fields::ACTIVITY_LEVEL,
                        raw,
                        &ActivityLevel::NAMES,
                    ));
                    None
                }
            },
            None => {
                reader.errors.push(FieldIssue::missing(fields::ACTIVITY_LEVEL));
                None
            }
        };

        let objective = reader.required_choice(
            fields::OBJECTIVE,
            self.objective.as_ref(),
            Objective::parse,
            &Objective::NAMES,
        );
        let objective_policy = reader
            .choice(
                fields::OBJECTIVE_POLICY,
                self.objective_policy.as_ref(),
                ObjectivePolicy::parse,
                &ObjectivePolicy::NAMES,
            )
            .unwrap_or(defaults.objective_policy);
        let custom_target_kcal =
            reader.decimal(fields::CUSTOM_TARGET_KCAL, self.custom_target_kcal.as_ref());
        let profile = reader.required_choice(
            fields::PROFILE,
            self.profile.as_ref(),
            Profile::parse,
            &Profile::NAMES,
        );
        let formula = reader
            .choice(
                fields::FORMULA,
                self.formula.as_ref(),
                BmrFormula::parse,
                &BmrFormula::NAMES,
            )
            .unwrap_or(defaults.formula);

        let macro_config = MacroConfig {
            protein_g_per_kg: reader
                .decimal(fields::PROTEIN_G_PER_KG, self.protein_g_per_kg.as_ref()),
            fat_g_per_kg: reader.decimal(fields::FAT_G_PER_KG, self.fat_g_per_kg.as_ref()),
            carb_floor: reader.carb_floor(self.carb_floor.as_ref()),
        };

        let (
            Some(weight_kg),
            Some(height_cm),
            Some(age_years),
            Some(sex),
            Some(activity_level),
            Some(objective),
            Some(profile),
        ) = (
            weight_kg,
            height_cm,
            age_years,
            sex,
            activity_level,
            objective,
            profile,
        )
        else {
            reader.check_parsed(fields::WEIGHT_KG, weight_kg, |b| b.weight_kg);
            reader.check_parsed(fields::HEIGHT_CM, height_cm, |b| b.height_cm);
            reader.check_parsed(fields::BODY_FAT_PERCENT, body_fat_percent, |b| {
                b.body_fat_percent
            });
            return Err(reader.errors);
        };

        let request = CalculationRequest {
            patient: PatientMeasurement {
                weight_kg,
                height_cm,
                age_years,
                sex,
                body_fat_percent,
            },
            activity_level,
            objective,
            objective_policy,
            custom_target_kcal,
            profile,
            formula,
            macro_config,
        };

        reader.errors.into_result(ParsedForm { request, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn form() -> CalculationForm {
        CalculationForm {
            weight_kg: Some("70,5".into()),
            height_cm: Some("175".into()),
            birth_date: Some("15/06/1990".into()),
            sex: Some("Masculino".into()),
            activity_level: Some("moderado".into()),
            objective: Some("emagrecimento".into()),
            profile: Some("eutrofico".into()),
            ..CalculationForm::default()
        }
    }

    fn parse(
        form: &CalculationForm,
        defaults: &CalculationDefaults,
    ) -> Result<ParsedForm, ValidationErrors> {
        form.parse(today(), defaults, &ValidationConfig::default())
    }

    #[test]
    fn test_aliases_and_birth_date() {
        let parsed = parse(&form(), &CalculationDefaults::default()).unwrap();
        let request = parsed.request;

        assert!((request.patient.weight_kg - 70.5).abs() < f64::EPSILON);
        assert_eq!(request.patient.age_years, 33);
        assert_eq!(request.patient.sex, Sex::Male);
        assert_eq!(request.activity_level, ActivityLevel::Moderate);
        assert_eq!(request.objective, Objective::WeightLoss);
        assert_eq!(request.profile, Profile::Eutrophic);
        assert_eq!(request.formula, BmrFormula::MifflinStJeor);
        assert_eq!(request.objective_policy, ObjectivePolicy::Ratio);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_unknown_activity_without_fallback_is_config_error() {
        let raw = CalculationForm {
            activity_level: Some("couch".into()),
            ..form()
        };
        let errors = parse(&raw, &CalculationDefaults::default()).unwrap_err();
        assert!(errors.has_field(fields::ACTIVITY_LEVEL));
        assert!(errors.has_config_issues());
    }

    #[test]
    fn test_unknown_activity_with_fallback_warns() {
        let raw = CalculationForm {
            activity_level: Some("couch".into()),
            ..form()
        };
        let defaults = CalculationDefaults {
            unknown_activity_fallback: Some(ActivityLevel::Sedentary),
            ..CalculationDefaults::default()
        };
        let parsed = parse(&raw, &defaults).unwrap();
        assert_eq!(parsed.request.activity_level, ActivityLevel::Sedentary);
        assert_eq!(parsed.warnings[0].code, WarningCode::ActivityLevelFallback);
    }

    #[test]
    fn test_errors_cover_every_field() {
        let raw = CalculationForm {
            weight_kg: Some("heavy".into()),
            height_cm: Some("40".into()),
            birth_date: Some("2030-01-01".into()),
            sex: Some("x".into()),
            profile: None,
            carb_floor: Some("grams:lots".into()),
            ..form()
        };
        let errors = parse(&raw, &CalculationDefaults::default()).unwrap_err();
        for field in [
            fields::WEIGHT_KG,
            fields::HEIGHT_CM,
            fields::BIRTH_DATE,
            fields::SEX,
            fields::PROFILE,
            fields::CARB_FLOOR,
        ] {
            assert!(errors.has_field(field), "{field}");
        }
    }

    #[test]
    fn test_carb_floor_specs() {
        for (raw, expected) in [
            ("none", CarbFloorPolicy::None),
            ("percent", CarbFloorPolicy::PercentOfTarget { percent: 10.0 }),
            ("percent:15", CarbFloorPolicy::PercentOfTarget { percent: 15.0 }),
            ("grams", CarbFloorPolicy::MinimumGrams { grams: 50.0 }),
            ("Grams:80", CarbFloorPolicy::MinimumGrams { grams: 80.0 }),
        ] {
            let parsed = parse(
                &CalculationForm {
                    carb_floor: Some(raw.into()),
                    ..form()
                },
                &CalculationDefaults::default(),
            )
            .unwrap();
            assert_eq!(parsed.request.macro_config.carb_floor, expected, "{raw}");
        }
    }
}
