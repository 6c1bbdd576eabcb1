// ABOUTME: Field-addressed validation error collection for blocking input failures
// ABOUTME: Distinguishes raw-input issues from unknown categorical (configuration) values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// Whether an issue comes from raw patient/form input or from an unrecognized categorical value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Missing, malformed, or implausible measurement or requirement
    Input,
    /// Unknown activity level, objective, profile, formula, or policy
    Config,
}

/// What exactly is wrong with a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// Field absent or blank
    Missing,
    /// Field present but not a number
    NotNumeric {
        /// Raw value as received
        value: String,
    },
    /// Field present but not in the expected shape (dates, floor specs)
    InvalidFormat {
        /// Raw value as received
        value: String,
    },
    /// NaN or infinite
    NotFinite,
    /// Zero or negative
    NotPositive {
        /// Value received
        actual: f64,
    },
    /// Outside the inclusive plausible range
    OutOfRange {
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
        /// Value received
        actual: f64,
    },
    /// Selected BMR formula needs body-fat percentage
    BodyFatRequired {
        /// Formula that was selected
        formula: String,
    },
    /// `custom` objective selected without a positive target
    CustomTargetRequired,
    /// Categorical value not recognized and no fallback configured
    UnknownValue {
        /// Raw value as received
        value: String,
        /// Accepted canonical values
        expected: Vec<String>,
    },
}

impl IssueKind {
    /// Classify this issue
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        match self {
            Self::UnknownValue { .. } => IssueCategory::Config,
            Self::Missing
            | Self::NotNumeric { .. }
            | Self::InvalidFormat { .. }
            | Self::NotFinite
            | Self::NotPositive { .. }
            | Self::OutOfRange { .. }
            | Self::BodyFatRequired { .. }
            | Self::CustomTargetRequired => IssueCategory::Input,
        }
    }
}

/// One blocking problem addressed to a single form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field name as the form knows it (`weight_kg`, `macro_config.protein_g_per_kg`)
    pub field: String,
    /// Structured reason
    #[serde(flatten)]
    pub kind: IssueKind,
    /// Message suitable for inline display
    pub message: String,
}

impl FieldIssue {
    /// Create a new field issue
    #[must_use]
    pub fn new(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    /// Field is required but absent
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::new(field, IssueKind::Missing, format!("{field} is required"))
    }

    /// Field is not a number
    #[must_use]
    pub fn not_numeric(field: &str, value: &str) -> Self {
        Self::new(
            field,
            IssueKind::NotNumeric {
                value: value.to_owned(),
            },
            format!("{field} must be a number, got '{value}'"),
        )
    }

    /// Field is not in the expected shape
    #[must_use]
    pub fn invalid_format(field: &str, value: &str, expected: &str) -> Self {
        Self::new(
            field,
            IssueKind::InvalidFormat {
                value: value.to_owned(),
            },
            format!("{field} must be {expected}, got '{value}'"),
        )
    }

    /// Field is outside its inclusive range
    #[must_use]
    pub fn out_of_range(field: &str, min: f64, max: f64, actual: f64) -> Self {
        Self::new(
            field,
            IssueKind::OutOfRange { min, max, actual },
            format!("{field} must be between {min} and {max}, got {actual}"),
        )
    }

    /// Categorical value is not recognized
    #[must_use]
    pub fn unknown_value(field: &str, value: &str, expected: &[&str]) -> Self {
        Self::new(
            field,
            IssueKind::UnknownValue {
                value: value.to_owned(),
                expected: expected.iter().map(|s| (*s).to_owned()).collect(),
            },
            format!(
                "Unknown {field}: '{value}'. Valid options: {}",
                expected.join(", ")
            ),
        )
    }

    /// Category of this issue
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        self.kind.category()
    }
}

/// Collection of blocking validation issues
///
/// An empty collection means the input passed. The engine returns this type
/// as its only hard failure; nothing is computed when it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// All issues in the order they were detected
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Record an issue
    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    /// Append every issue from another collection
    pub fn extend(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    /// True when no issue was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of recorded issues
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Iterate over issues
    pub fn iter(&self) -> impl Iterator<Item = &FieldIssue> {
        self.issues.iter()
    }

    /// Issues addressed to one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldIssue> + 'a {
        self.issues.iter().filter(move |issue| issue.field == field)
    }

    /// True if any issue concerns the given field
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// True if any issue is an unknown categorical value
    #[must_use]
    pub fn has_config_issues(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.category() == IssueCategory::Config)
    }

    /// Messages grouped by field, for inline form rendering
    #[must_use]
    pub fn messages_by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &self.issues {
            grouped
                .entry(issue.field.clone())
                .or_default()
                .push(issue.message.clone());
        }
        grouped
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one issue was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}", issue.message)?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let code = if errors.has_config_issues() {
            ErrorCode::ConfigInvalid
        } else {
            ErrorCode::InvalidInput
        };
        let details = serde_json::json!({ "fields": errors.issues });
        Self::new(code, errors.to_string()).with_details(details)
    }
}
