// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, fixture requests, and engines with isolated caches
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutrition_engine`

use anyhow::Result;
use nutrition_engine::cache::memory::InMemoryCache;
use nutrition_engine::cache::{CacheConfig, CacheProvider};
use nutrition_engine::config::intelligence::NutritionConfig;
use nutrition_engine::intelligence::{BmrFormula, CalculationForm, NutritionEngine};
use nutrition_engine::models::{
    ActivityLevel, CalculationRequest, Objective, PatientMeasurement, Profile, Sex,
};
use std::env;
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls verbosity; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// In-memory cache without the background sweep
pub fn create_test_cache(max_entries: usize) -> Result<InMemoryCache> {
    let config = CacheConfig {
        max_entries,
        enable_background_cleanup: false,
        ..CacheConfig::default()
    };
    Ok(InMemoryCache::new(config)?)
}

/// Engine with default rule tables and a private cache
pub fn create_test_engine() -> Result<NutritionEngine> {
    create_test_engine_with(NutritionConfig::default(), Duration::from_secs(1800))
}

/// Engine with custom rule tables and result TTL
pub fn create_test_engine_with(config: NutritionConfig, ttl: Duration) -> Result<NutritionEngine> {
    init_test_logging();
    Ok(NutritionEngine::new(config, create_test_cache(100)?, ttl))
}

/// 70 kg, 175 cm, 30 y male
pub fn reference_patient() -> PatientMeasurement {
    PatientMeasurement::new(70.0, 175.0, 30, Sex::Male)
}

/// Harris-Benedict revised, moderate activity, maintenance, eutrophic
pub fn reference_request() -> CalculationRequest {
    CalculationRequest::new(
        reference_patient(),
        ActivityLevel::Moderate,
        Objective::Maintenance,
        Profile::Eutrophic,
        BmrFormula::HarrisBenedictRevised,
    )
}

/// 100 kg overweight patient with a 1200 kcal custom target
pub fn low_target_request() -> CalculationRequest {
    CalculationRequest::new(
        PatientMeasurement::new(100.0, 170.0, 40, Sex::Male),
        ActivityLevel::Sedentary,
        Objective::Custom,
        Profile::Overweight,
        BmrFormula::MifflinStJeor,
    )
    .with_custom_target(1200.0)
}

/// Complete form equivalent to the reference request
pub fn reference_form() -> CalculationForm {
    CalculationForm {
        weight_kg: Some("70".into()),
        height_cm: Some("175".into()),
        age_years: Some("30".into()),
        sex: Some("M".into()),
        activity_level: Some("moderate".into()),
        objective: Some("maintenance".into()),
        profile: Some("eutrophic".into()),
        formula: Some("harris_benedict_revised".into()),
        ..CalculationForm::default()
    }
}

/// Approximate float comparison
pub fn approx(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}
