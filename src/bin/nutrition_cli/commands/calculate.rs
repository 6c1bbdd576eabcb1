// ABOUTME: Calculate command for nutrition-cli
// ABOUTME: Builds a form from flags, runs the engine, and prints results or field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use nutrition_engine::config::environment::EngineConfig;
use nutrition_engine::errors::AppResult;
use nutrition_engine::intelligence::{CalculationForm, NutritionEngine};
use nutrition_engine::models::{
    CalculationHistoryRecord, CalculationRequest, CalculationResult, MealTarget,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::process::ExitCode;
use tracing::{debug, info};
use uuid::Uuid;

use crate::helpers::display::{display_field_errors, display_meal_plan, display_result};
use crate::CalculateArgs;

/// Exit code for input the engine rejected
const EXIT_INVALID_INPUT: u8 = 2;

/// Run one calculation and print its outcome
pub fn run(args: CalculateArgs) -> AppResult<ExitCode> {
    let mut config = EngineConfig::from_env()?;
    // One-shot process: nothing to sweep
    config.cache.enable_background_cleanup = false;
    debug!("{}", config.summary());

    let engine = NutritionEngine::with_in_memory_cache(&config)?;
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    let form = form_from_args(&args);

    let outcome = form
        .parse(today, &engine.config().defaults, &engine.config().validation)
        .and_then(|parsed| {
            engine
                .calculate_parsed(&parsed)
                .map(|result| (parsed.request, result))
        });
    let (request, result) = match outcome {
        Ok(calculated) => calculated,
        Err(errors) => {
            if args.json {
                print_json(&errors)?;
            } else {
                display_field_errors(&errors);
            }
            return Ok(ExitCode::from(EXIT_INVALID_INPUT));
        }
    };
    info!(
        energy_target_kcal = result.energy_target_kcal,
        warnings = result.warnings.len(),
        "Calculation complete"
    );

    let meals = args.meals.then(|| engine.meal_plan(&result));

    if args.json {
        print_json(&json_payload(args.patient_id, request, result, meals)?)?;
    } else {
        display_result(&result);
        if let Some(meals) = meals {
            display_meal_plan(&meals);
        }
        if let Some(patient_id) = args.patient_id {
            println!("\nPatient: {patient_id}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// JSON output: the bare result, or a history record when a patient is given,
/// with the meal split alongside when requested
fn json_payload(
    patient_id: Option<Uuid>,
    request: CalculationRequest,
    result: CalculationResult,
    meals: Option<Vec<MealTarget>>,
) -> AppResult<Value> {
    let (label, body) = match patient_id {
        Some(patient_id) => (
            "record",
            serde_json::to_value(CalculationHistoryRecord::new(patient_id, request, result))?,
        ),
        None => ("result", serde_json::to_value(result)?),
    };
    let Some(meals) = meals else {
        return Ok(body);
    };
    let mut payload = Map::new();
    payload.insert(label.to_owned(), body);
    payload.insert("meals".to_owned(), serde_json::to_value(meals)?);
    Ok(Value::Object(payload))
}

fn form_from_args(args: &CalculateArgs) -> CalculationForm {
    CalculationForm {
        weight_kg: args.weight.clone(),
        height_cm: args.height.clone(),
        age_years: args.age.clone(),
        birth_date: args.birth_date.clone(),
        sex: args.sex.clone(),
        body_fat_percent: args.body_fat.clone(),
        activity_level: args.activity.clone(),
        objective: args.objective.clone(),
        objective_policy: args.policy.clone(),
        custom_target_kcal: args.custom_target.clone(),
        profile: args.profile.clone(),
        formula: args.formula.clone(),
        protein_g_per_kg: args.protein_g_per_kg.clone(),
        fat_g_per_kg: args.fat_g_per_kg.clone(),
        carb_floor: args.carb_floor.clone(),
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
