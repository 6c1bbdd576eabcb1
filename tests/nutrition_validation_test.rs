// ABOUTME: Integration tests for the nutrition input and output validation passes
// ABOUTME: Covers inclusive bounds, field-addressed errors, and advisory range warnings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{low_target_request, reference_request};
use nutrition_engine::config::intelligence::ValidationConfig;
use nutrition_engine::errors::{AppError, ErrorCode, IssueCategory, IssueKind};
use nutrition_engine::intelligence::nutrition_validation::fields;
use nutrition_engine::intelligence::{check_output, validate_input, BmrFormula};
use nutrition_engine::models::{
    CarbFloorPolicy, MacroAmount, MacroBreakdown, MacroConfig, Objective, WarningCode, WarningKind,
};

fn macros(protein: (f64, f64), carbs: (f64, f64), fat: (f64, f64)) -> MacroBreakdown {
    let amount = |(kcal, percent): (f64, f64)| MacroAmount {
        grams: 0.0,
        kcal,
        percent,
    };
    MacroBreakdown {
        protein: amount(protein),
        carbs: amount(carbs),
        fat: amount(fat),
    }
}

// ============================================================================
// Input pass
// ============================================================================

#[test]
fn test_reference_request_passes() {
    validate_input(&reference_request(), &ValidationConfig::default()).unwrap();
}

#[test]
fn test_weight_lower_bound_is_inclusive() {
    let config = ValidationConfig::default();

    let mut request = reference_request();
    request.patient.weight_kg = 20.0;
    validate_input(&request, &config).unwrap();

    request.patient.weight_kg = 19.999;
    let errors = validate_input(&request, &config).unwrap_err();
    assert_eq!(errors.len(), 1);
    let issue = &errors.issues[0];
    assert_eq!(issue.field, fields::WEIGHT_KG);
    assert!(matches!(
        issue.kind,
        IssueKind::OutOfRange { min, .. } if (min - 20.0).abs() < f64::EPSILON
    ));
}

#[test]
fn test_age_upper_bound_is_inclusive() {
    let config = ValidationConfig::default();

    let mut request = reference_request();
    request.patient.age_years = 100;
    validate_input(&request, &config).unwrap();

    request.patient.age_years = 101;
    let errors = validate_input(&request, &config).unwrap_err();
    assert!(errors.has_field(fields::AGE_YEARS));
    assert_eq!(errors.issues[0].category(), IssueCategory::Input);
}

#[test]
fn test_height_bounds() {
    let config = ValidationConfig::default();
    let mut request = reference_request();

    for (height, valid) in [(99.9, false), (100.0, true), (250.0, true), (250.1, false)] {
        request.patient.height_cm = height;
        assert_eq!(validate_input(&request, &config).is_ok(), valid, "{height}");
    }
}

#[test]
fn test_non_finite_and_non_positive_values() {
    let config = ValidationConfig::default();
    let mut request = reference_request();

    request.patient.weight_kg = f64::INFINITY;
    request.patient.height_cm = 0.0;
    let errors = validate_input(&request, &config).unwrap_err();

    assert!(matches!(
        errors.for_field(fields::WEIGHT_KG).next().unwrap().kind,
        IssueKind::NotFinite
    ));
    assert!(matches!(
        errors.for_field(fields::HEIGHT_CM).next().unwrap().kind,
        IssueKind::NotPositive { .. }
    ));
}

#[test]
fn test_lean_mass_formula_without_body_fat_is_blocked() {
    let mut request = reference_request();
    request.formula = BmrFormula::KatchMcArdle;

    let errors = validate_input(&request, &ValidationConfig::default()).unwrap_err();
    let issue = errors.for_field(fields::BODY_FAT_PERCENT).next().unwrap();
    assert!(matches!(
        &issue.kind,
        IssueKind::BodyFatRequired { formula } if formula == "katch_mcardle"
    ));
}

#[test]
fn test_body_fat_bounds_checked_when_present() {
    let mut request = reference_request();
    request.patient = request.patient.with_body_fat(75.0);

    let errors = validate_input(&request, &ValidationConfig::default()).unwrap_err();
    assert!(errors.has_field(fields::BODY_FAT_PERCENT));
}

#[test]
fn test_custom_objective_requires_positive_target() {
    let config = ValidationConfig::default();
    let mut request = reference_request();
    request.objective = Objective::Custom;

    let errors = validate_input(&request, &config).unwrap_err();
    assert!(matches!(
        errors.issues[0].kind,
        IssueKind::CustomTargetRequired
    ));

    request.custom_target_kcal = Some(-100.0);
    assert!(validate_input(&request, &config).is_err());

    validate_input(&low_target_request(), &config).unwrap();
}

#[test]
fn test_macro_override_bounds() {
    let config = ValidationConfig::default();
    let request = reference_request().with_macro_config(MacroConfig {
        protein_g_per_kg: Some(0.4),
        fat_g_per_kg: Some(2.6),
        carb_floor: CarbFloorPolicy::PercentOfTarget { percent: 150.0 },
    });

    let errors = validate_input(&request, &config).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.has_field(fields::PROTEIN_G_PER_KG));
    assert!(errors.has_field(fields::FAT_G_PER_KG));
    assert!(errors.has_field(fields::CARB_FLOOR));
}

#[test]
fn test_custom_target_and_carb_floor_upper_bounds() {
    let config = ValidationConfig::default();
    let at_limits = low_target_request()
        .with_custom_target(config.custom_target_kcal.max)
        .with_macro_config(MacroConfig {
            carb_floor: CarbFloorPolicy::MinimumGrams {
                grams: config.carb_floor_grams.max,
            },
            ..MacroConfig::default()
        });
    validate_input(&at_limits, &config).unwrap();

    let over = low_target_request()
        .with_custom_target(10_000.5)
        .with_macro_config(MacroConfig {
            carb_floor: CarbFloorPolicy::MinimumGrams { grams: 1e308 },
            ..MacroConfig::default()
        });
    let errors = validate_input(&over, &config).unwrap_err();
    assert_eq!(errors.len(), 2);
    for field in [fields::CUSTOM_TARGET_KCAL, fields::CARB_FLOOR] {
        assert!(errors
            .for_field(field)
            .any(|issue| matches!(issue.kind, IssueKind::OutOfRange { .. })));
    }
}

#[test]
fn test_validation_errors_convert_to_app_error() {
    let mut request = reference_request();
    request.patient.weight_kg = 5.0;
    let errors = validate_input(&request, &ValidationConfig::default()).unwrap_err();

    let app_error = AppError::from(errors);
    assert_eq!(app_error.code, ErrorCode::InvalidInput);
    assert_eq!(app_error.http_status(), 400);
    assert_eq!(
        app_error.context.details["fields"][0]["field"],
        fields::WEIGHT_KG
    );
}

// ============================================================================
// Output pass
// ============================================================================

#[test]
fn test_balanced_output_has_no_warnings() {
    let warnings = check_output(
        1695.67,
        70.0,
        2628.28,
        &macros((392.0, 14.9), (1608.0, 61.1), (630.0, 24.0)),
        &ValidationConfig::default(),
    );
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn test_bmr_expected_range_is_per_kg() {
    let config = ValidationConfig::default();
    let balanced = macros((400.0, 20.0), (1000.0, 50.0), (600.0, 30.0));

    // 70 kg: 1050 .. 2450 kcal
    for (bmr, flagged) in [(1049.0, true), (1050.0, false), (2450.0, false), (2451.0, true)] {
        let warnings = check_output(bmr, 70.0, 2000.0, &balanced, &config);
        let has = warnings
            .iter()
            .any(|warning| warning.code == WarningCode::BmrOutOfExpectedRange);
        assert_eq!(has, flagged, "{bmr}");
    }
}

#[test]
fn test_macro_sum_divergence_threshold() {
    let config = ValidationConfig::default();
    let within = macros((400.0, 19.5), (1050.0, 51.2), (600.0, 29.3));
    let beyond = macros((400.0, 18.6), (1150.0, 53.5), (600.0, 27.9));

    // 2050 vs 2000 is 2.5%; 2150 vs 2000 is 7.5%
    assert!(!check_output(1600.0, 70.0, 2000.0, &within, &config)
        .iter()
        .any(|warning| warning.code == WarningCode::MacroSumDivergence));
    assert!(check_output(1600.0, 70.0, 2000.0, &beyond, &config)
        .iter()
        .any(|warning| warning.code == WarningCode::MacroSumDivergence));
}

#[test]
fn test_share_warnings_are_range_kind() {
    let warnings = check_output(
        1600.0,
        70.0,
        2000.0,
        &macros((800.0, 40.0), (300.0, 15.0), (900.0, 45.0)),
        &ValidationConfig::default(),
    );
    let codes: Vec<_> = warnings.iter().map(|warning| warning.code).collect();

    assert!(codes.contains(&WarningCode::ProteinPercentOutOfRange));
    assert!(codes.contains(&WarningCode::CarbsPercentOutOfRange));
    assert!(codes.contains(&WarningCode::FatPercentOutOfRange));
    assert!(warnings
        .iter()
        .all(|warning| warning.kind == WarningKind::Range));
}
