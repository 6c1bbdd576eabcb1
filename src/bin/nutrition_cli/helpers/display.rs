// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for nutrition-cli
// ABOUTME: Provides consistent display functions for results, meal plans, and validation errors

use nutrition_engine::errors::ValidationErrors;
use nutrition_engine::models::{CalculationResult, MacroAmount, MealTarget};

/// Display a calculation result with its warnings
pub fn display_result(result: &CalculationResult) {
    println!("\nNutrition Prescription");
    println!("{}", "=".repeat(60));
    println!("   Formula: {}", result.formula.description());
    println!(
        "   Activity: {}   Objective: {} ({})   Profile: {}",
        result.activity_level, result.objective, result.objective_policy, result.profile
    );
    println!("   BMR: {:.2} kcal/day", result.bmr_kcal);
    println!(
        "   Expenditure: {:.2} kcal/day",
        result.total_energy_expenditure_kcal
    );
    println!("   Energy target: {:.2} kcal/day", result.energy_target_kcal);

    println!("\nMacronutrients");
    println!("{}", "-".repeat(60));
    display_macro("Protein", &result.macros.protein);
    display_macro("Carbs", &result.macros.carbs);
    display_macro("Fat", &result.macros.fat);
    println!(
        "   Ratios: protein {} g/kg, fat {} g/kg",
        result.protein_g_per_kg, result.fat_g_per_kg
    );

    if result.has_warnings() {
        println!("\nWarnings");
        println!("{}", "-".repeat(60));
        for warning in &result.warnings {
            println!("   [{:?}] {}", warning.kind, warning.message);
        }
    }

    if result.provenance.from_cache {
        println!(
            "\n(served from cache, {} ms old)",
            result.provenance.cache_age_ms.unwrap_or_default()
        );
    }
}

fn display_macro(label: &str, amount: &MacroAmount) {
    println!(
        "   {label:<8} {:>6.0} g  {:>7.0} kcal  {:>5.1}%",
        amount.grams, amount.kcal, amount.percent
    );
}

/// Display per-meal targets
pub fn display_meal_plan(meals: &[MealTarget]) {
    println!("\nMeal Split");
    println!("{}", "-".repeat(60));
    for meal in meals {
        println!(
            "   {:<16} {:>3.0}%  {:>7.1} kcal  P {:>5.1} g  C {:>5.1} g  F {:>5.1} g",
            format!("{:?}", meal.slot),
            meal.proportion * 100.0,
            meal.energy_kcal,
            meal.protein_g,
            meal.carbs_g,
            meal.fat_g
        );
    }
}

/// Display field-addressed validation errors on stderr
pub fn display_field_errors(errors: &ValidationErrors) {
    eprintln!("\nThe calculation could not run:");
    for (field, messages) in errors.messages_by_field() {
        for message in messages {
            eprintln!("   {field}: {message}");
        }
    }
}
