// ABOUTME: Nutrition intelligence module: formulas, validation, form parsing, and orchestration
// ABOUTME: Re-exports the calculation entry points used by binaries and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Energy and macronutrient prescription from anthropometric data.
//!
//! - [`algorithms`]: BMR equations and their dispatch table
//! - [`nutrition_calculator`]: the pure calculation chain
//! - [`nutrition_validation`]: input and output passes
//! - [`nutrition_form`]: raw form normalization
//! - [`nutrition_engine`]: the orchestrator with its result cache

/// BMR estimation algorithms
pub mod algorithms;
/// Pure calculation chain
pub mod nutrition_calculator;
/// Calculation orchestrator
pub mod nutrition_engine;
/// Form-state normalization
pub mod nutrition_form;
/// Input and output validation passes
pub mod nutrition_validation;

pub use algorithms::{estimate_bmr, BmrFormula, BmrInputs};
pub use nutrition_calculator::{
    calculate_activity_adjusted_expenditure, calculate_bmi, calculate_bmr, calculate_macros,
    calculate_objective_adjusted_target, distribute_across_meals, resolve_ratios, MacroPlan,
};
pub use nutrition_engine::NutritionEngine;
pub use nutrition_form::{CalculationForm, ParsedForm};
pub use nutrition_validation::{check_output, validate_input};
