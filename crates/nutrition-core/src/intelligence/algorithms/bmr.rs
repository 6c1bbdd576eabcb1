// ABOUTME: Basal metabolic rate formula identifiers with metadata and alias parsing
// ABOUTME: Harris-Benedict (original/revised), Mifflin-St Jeor, Katch-McArdle, Cunningham
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Basal metabolic rate estimation formula
///
/// Exactly one formula is active per calculation. Sex-based formulas carry a
/// male and a female coefficient set; lean-mass formulas need body-fat
/// percentage and ignore sex.
///
/// # Scientific References
///
/// - Harris, J.A. & Benedict, F.G. (1919). *A Biometric Study of Basal Metabolism in Man.*
/// - Roza, A.M. & Shizgal, H.M. (1984). "The Harris Benedict equation reevaluated."
///   *Am J Clin Nutr*, 40(1), 168-182.
/// - Mifflin, M.D. et al. (1990). "A new predictive equation for resting energy expenditure."
///   *Am J Clin Nutr*, 51(2), 241-247.
/// - `McArdle`, W.D., Katch, F.I. & Katch, V.L. (1996). *Exercise Physiology.*
/// - Cunningham, J.J. (1980). "A reanalysis of the factors influencing basal metabolic rate."
///   *Am J Clin Nutr*, 33(11), 2372-2374.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Harris-Benedict (1919)
    HarrisBenedictOriginal,
    /// Harris-Benedict revised by Roza & Shizgal (1984)
    HarrisBenedictRevised,
    /// Mifflin-St Jeor (1990)
    MifflinStJeor,
    /// Katch-McArdle: 370 + 21.6 x lean mass
    KatchMcArdle,
    /// Cunningham: 500 + 22 x lean mass
    Cunningham,
}

impl Default for BmrFormula {
    fn default() -> Self {
        // Most accurate for the general population in validation studies
        Self::MifflinStJeor
    }
}

impl BmrFormula {
    /// Every supported formula, in presentation order
    pub const ALL: [Self; 5] = [
        Self::HarrisBenedictOriginal,
        Self::HarrisBenedictRevised,
        Self::MifflinStJeor,
        Self::KatchMcArdle,
        Self::Cunningham,
    ];

    /// Canonical identifiers accepted by [`BmrFormula::parse`]
    pub const NAMES: [&'static str; 5] = [
        "harris_benedict_original",
        "harris_benedict_revised",
        "mifflin_st_jeor",
        "katch_mcardle",
        "cunningham",
    ];

    /// Whether this formula needs body-fat percentage
    #[must_use]
    pub const fn requires_body_fat(&self) -> bool {
        matches!(self, Self::KatchMcArdle | Self::Cunningham)
    }

    /// Get formula name for logging and serialization
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HarrisBenedictOriginal => "harris_benedict_original",
            Self::HarrisBenedictRevised => "harris_benedict_revised",
            Self::MifflinStJeor => "mifflin_st_jeor",
            Self::KatchMcArdle => "katch_mcardle",
            Self::Cunningham => "cunningham",
        }
    }

    /// Get formula description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::HarrisBenedictOriginal => "Harris-Benedict (1919, original coefficients)",
            Self::HarrisBenedictRevised => "Harris-Benedict revised (Roza & Shizgal, 1984)",
            Self::MifflinStJeor => "Mifflin-St Jeor (1990, general population)",
            Self::KatchMcArdle => "Katch-McArdle (lean-mass based, needs body fat)",
            Self::Cunningham => "Cunningham (lean-mass based, athletes, needs body fat)",
        }
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::HarrisBenedictOriginal => concat!(
                "M: 66.473 + 13.7516w + 5.0033h - 6.755a | ",
                "F: 655.0955 + 9.5634w + 1.8496h - 4.6756a"
            ),
            Self::HarrisBenedictRevised => {
                "M: 88.362 + 13.397w + 4.799h - 5.677a | F: 447.593 + 9.247w + 3.098h - 4.330a"
            }
            Self::MifflinStJeor => "10w + 6.25h - 5a + 5 (M) | - 161 (F)",
            Self::KatchMcArdle => "370 + 21.6 x LBM",
            Self::Cunningham => "500 + 22 x LBM",
        }
    }

    /// Parse a formula identifier, accepting common abbreviations
    ///
    /// Matching is case-insensitive and treats `-`, space, and `_` alike.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "harris_benedict_original" | "harris_benedict_1919" | "hb_original" | "hb1919" => {
                Some(Self::HarrisBenedictOriginal)
            }
            "harris_benedict_revised" | "harris_benedict" | "hb" | "hbr" | "hb_revised" => {
                Some(Self::HarrisBenedictRevised)
            }
            "mifflin_st_jeor" | "mifflin" | "msj" => Some(Self::MifflinStJeor),
            "katch_mcardle" | "katch" | "km" => Some(Self::KatchMcArdle),
            "cunningham" => Some(Self::Cunningham),
            _ => None,
        }
    }
}

impl fmt::Display for BmrFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BmrFormula {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!(
                    "Unknown BMR formula: '{s}'. Valid options: {}",
                    Self::NAMES.join(", ")
                ),
            )
        })
    }
}
