// ABOUTME: Configuration error types for nutrition rule table validation
// ABOUTME: Defines error variants for invalid ranges, unparseable overrides, and bad proportions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for rule table validation.

use crate::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bounds are inverted or a factor is not positive
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Failed to parse an override value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Proportions don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}
