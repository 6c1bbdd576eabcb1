// ABOUTME: Benchmark fixtures for generating plausible calculation requests
// ABOUTME: Provides deterministic request generation for reproducible measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for generating plausible calculation requests.

use nutrition_engine::intelligence::BmrFormula;
use nutrition_engine::models::{
    ActivityLevel, CalculationRequest, Objective, PatientMeasurement, Profile, Sex,
};

/// Predefined batch sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum RequestBatchSize {
    /// Small batch (10 requests): a clinic morning
    Small,
    /// Medium batch (1000 requests): a bulk re-calculation
    Medium,
}

impl RequestBatchSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 10,
            Self::Medium => 1_000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "10",
            Self::Medium => "1000",
        }
    }
}

/// Reference adult: 70 kg, 175 cm, 30 y male, Harris-Benedict revised
#[must_use]
pub fn reference_request() -> CalculationRequest {
    CalculationRequest::new(
        PatientMeasurement::new(70.0, 175.0, 30, Sex::Male),
        ActivityLevel::Moderate,
        Objective::Maintenance,
        Profile::Eutrophic,
        BmrFormula::HarrisBenedictRevised,
    )
}

/// Generate distinct, valid requests cycling through every categorical input
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn generate_requests(size: RequestBatchSize) -> Vec<CalculationRequest> {
    const OBJECTIVES: [Objective; 3] = [
        Objective::WeightLoss,
        Objective::Maintenance,
        Objective::Hypertrophy,
    ];
    const PROFILES: [Profile; 3] = [Profile::Eutrophic, Profile::Overweight, Profile::Athlete];

    (0..size.count())
        .map(|index| {
            let weight_kg = 50.0 + ((index * 37) % 70) as f64;
            let height_cm = 150.0 + ((index * 13) % 50) as f64;
            let age_years = 18 + ((index * 7) % 60) as u32;
            let sex = if index % 2 == 0 { Sex::Male } else { Sex::Female };
            let formula = BmrFormula::ALL[index % BmrFormula::ALL.len()];

            let mut patient = PatientMeasurement::new(weight_kg, height_cm, age_years, sex);
            if formula.requires_body_fat() {
                patient = patient.with_body_fat(12.0 + (index % 20) as f64);
            }

            CalculationRequest::new(
                patient,
                ActivityLevel::ALL[index % ActivityLevel::ALL.len()],
                OBJECTIVES[index % OBJECTIVES.len()],
                PROFILES[index % PROFILES.len()],
                formula,
            )
        })
        .collect()
}
