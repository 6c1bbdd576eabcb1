// ABOUTME: Formulas command for nutrition-cli
// ABOUTME: Lists every supported BMR formula with its equation and input requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrition_engine::config::intelligence::NutritionConfig;
use nutrition_engine::errors::AppResult;
use nutrition_engine::intelligence::BmrFormula;
use serde_json::json;

/// Print the supported formulas
pub fn list(json: bool) -> AppResult<()> {
    let default_formula = NutritionConfig::global().defaults.formula;

    if json {
        let formulas: Vec<_> = BmrFormula::ALL
            .iter()
            .map(|formula| {
                json!({
                    "name": formula.name(),
                    "description": formula.description(),
                    "formula": formula.formula(),
                    "requires_body_fat": formula.requires_body_fat(),
                    "default": *formula == default_formula,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&formulas)?);
        return Ok(());
    }

    println!("\nSupported BMR formulas");
    println!("{}", "=".repeat(60));
    for formula in BmrFormula::ALL {
        let marker = if formula == default_formula {
            " (default)"
        } else {
            ""
        };
        println!("{}{marker}", formula.name());
        println!("   {}", formula.description());
        println!("   {}", formula.formula());
        if formula.requires_body_fat() {
            println!("   Requires: body_fat_percent");
        }
    }
    Ok(())
}
