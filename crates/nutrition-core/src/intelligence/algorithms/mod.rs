// ABOUTME: Intelligence algorithm types re-exported from nutrition-core
// ABOUTME: Contains BmrFormula for resting energy estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Basal metabolic rate estimation formulas
pub mod bmr;

pub use bmr::BmrFormula;
