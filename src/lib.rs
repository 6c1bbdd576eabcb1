// ABOUTME: Main library entry point for the nutrition calculation engine
// ABOUTME: Energy expenditure, energy targets, and macronutrient distribution with caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Engine
//!
//! Computes basal metabolic rate, activity-adjusted expenditure, an
//! objective-adjusted energy target, and a protein / carbohydrate / fat
//! breakdown from a patient's anthropometric data.
//!
//! ## Features
//!
//! - **Five BMR formulas**: Harris-Benedict (original and revised),
//!   Mifflin-St Jeor, Katch-McArdle, Cunningham
//! - **Two objective policies**: ratio and fixed kcal offset, never mixed
//! - **Field-addressed validation**: every input problem reported at once
//! - **Advisory warnings**: physiological and arithmetic sanity checks
//! - **Result cache**: namespaced, content-addressed, TTL and LRU bounded
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrition_engine::config::environment::EngineConfig;
//! use nutrition_engine::errors::AppResult;
//! use nutrition_engine::intelligence::{BmrFormula, NutritionEngine};
//! use nutrition_engine::models::{
//!     ActivityLevel, CalculationRequest, Objective, PatientMeasurement, Profile, Sex,
//! };
//!
//! fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let engine = NutritionEngine::with_in_memory_cache(&config)?;
//!
//!     let request = CalculationRequest::new(
//!         PatientMeasurement::new(70.0, 175.0, 30, Sex::Male),
//!         ActivityLevel::Moderate,
//!         Objective::Maintenance,
//!         Profile::Eutrophic,
//!         BmrFormula::HarrisBenedictRevised,
//!     );
//!     let result = engine.calculate(&request)?;
//!     println!("Target: {} kcal", result.energy_target_kcal);
//!     Ok(())
//! }
//! ```

/// Result cache with pluggable backends
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Physiological bounds, energy densities, and cache defaults
pub mod constants;

/// Unified error handling with field-addressed validation errors
pub mod errors;

/// Nutrition formulas, validation, and orchestration
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Domain models for requests, results, and warnings
pub mod models;
