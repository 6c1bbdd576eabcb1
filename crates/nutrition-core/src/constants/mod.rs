// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for cache defaults, physiological bounds, and energy densities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single large file.

/// Cache-related constants (TTL, capacity, cleanup interval)
pub mod cache;
/// Plausible measurement bounds and expected output ranges
pub mod physiology;

/// Energy density of macronutrients (Atwater general factors)
pub mod energy {
    /// Protein: 4 kcal per gram
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// Carbohydrate: 4 kcal per gram
    pub const KCAL_PER_G_CARBS: f64 = 4.0;
    /// Fat: 9 kcal per gram
    pub const KCAL_PER_G_FAT: f64 = 9.0;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Engine service name
    pub const NUTRITION_ENGINE: &str = "nutrition-engine";
    /// CLI service name
    pub const NUTRITION_CLI: &str = "nutrition-cli";
}
