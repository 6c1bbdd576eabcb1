// ABOUTME: Core data models for nutrition calculations
// ABOUTME: Re-exports patient measurements, categorical inputs, requests, and results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Typed inputs and outputs of the nutrition engine. Raw form strings are
//! normalized into these types before any formula runs.

mod nutrition;
mod patient;

// Patient domain
pub use patient::{age_on, parse_decimal, PatientMeasurement, Sex};

// Prescription domain
pub use nutrition::{
    ActivityLevel, CalculationHistoryRecord, CalculationRequest, CalculationResult,
    CalculationWarning, CarbFloorPolicy, MacroAmount, MacroBreakdown, MacroConfig, MealSlot,
    MealTarget, Objective, ObjectivePolicy, Profile, Provenance, WarningCode, WarningKind,
};
