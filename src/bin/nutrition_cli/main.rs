// ABOUTME: Nutrition CLI - command-line front end for the nutrition calculation engine
// ABOUTME: Calculates energy and macro targets from form-style flags and lists BMR formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Calculate with the default formula and ratio policy
//! nutrition-cli calculate --weight 70 --height 175 --age 30 --sex M \
//!     --activity moderate --objective maintenance --profile eutrophic
//!
//! # Portuguese aliases, birth date, offset policy, JSON output
//! nutrition-cli calculate --weight 82,5 --height 168 --birth-date 15/06/1985 \
//!     --sex feminino --activity leve --objective emagrecimento --policy enp \
//!     --profile sobrepeso --json
//!
//! # Lean-mass formula with a carbohydrate floor and per-meal split
//! nutrition-cli calculate --weight 100 --height 180 --age 40 --sex male \
//!     --body-fat 30 --formula katch --activity sedentary --objective custom \
//!     --custom-target 1200 --profile overweight --carb-floor grams:50 --meals
//!
//! # List supported BMR formulas
//! nutrition-cli formulas
//! ```

mod commands;
mod helpers;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use nutrition_engine::errors::AppResult;
use nutrition_engine::logging::LoggingConfig;
use std::process::ExitCode;
use tracing::debug;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "nutrition-cli",
    about = "Nutrition Engine CLI",
    long_about = "Energy expenditure, energy target, and macronutrient calculation \
                  from patient measurements."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Calculate BMR, expenditure, energy target, and macros
    Calculate(CalculateArgs),

    /// List supported BMR formulas
    Formulas {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Flags mirror the calculation form; values are read the way the form reads them
#[derive(Args)]
struct CalculateArgs {
    /// Body weight in kg (comma decimals accepted)
    #[arg(long)]
    weight: Option<String>,

    /// Height in cm
    #[arg(long)]
    height: Option<String>,

    /// Age in completed years
    #[arg(long)]
    age: Option<String>,

    /// Birth date (YYYY-MM-DD or DD/MM/YYYY), used when --age is absent
    #[arg(long)]
    birth_date: Option<String>,

    /// Biological sex (male/female, M/F, masculino/feminino)
    #[arg(long)]
    sex: Option<String>,

    /// Body-fat percentage (required by Katch-McArdle and Cunningham)
    #[arg(long)]
    body_fat: Option<String>,

    /// Activity level (sedentary, light, moderate, intense, very_intense)
    #[arg(long)]
    activity: Option<String>,

    /// Objective (weight_loss, maintenance, hypertrophy, custom)
    #[arg(long)]
    objective: Option<String>,

    /// Objective policy (ratio or offset)
    #[arg(long)]
    policy: Option<String>,

    /// Energy target in kcal for the custom objective
    #[arg(long)]
    custom_target: Option<String>,

    /// Profile (eutrophic, overweight, athlete)
    #[arg(long)]
    profile: Option<String>,

    /// BMR formula (defaults to the configured formula)
    #[arg(long)]
    formula: Option<String>,

    /// Protein override in g/kg
    #[arg(long)]
    protein_g_per_kg: Option<String>,

    /// Fat override in g/kg
    #[arg(long)]
    fat_g_per_kg: Option<String>,

    /// Carbohydrate floor: none, percent[:p], grams[:g]
    #[arg(long)]
    carb_floor: Option<String>,

    /// Reference date for age derivation (defaults to today, UTC)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Also show the per-meal split
    #[arg(long)]
    meals: bool,

    /// Wrap the result in a history record for this patient
    #[arg(long)]
    patient_id: Option<Uuid>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::for_cli(cli.verbose).init() {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("Nutrition CLI");

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> AppResult<ExitCode> {
    match command {
        Command::Calculate(args) => commands::calculate::run(args),
        Command::Formulas { json } => {
            commands::formulas::list(json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
