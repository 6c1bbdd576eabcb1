// ABOUTME: Algorithm layer enabling pluggable BMR estimation methods
// ABOUTME: Provides a dispatch table mapping each BmrFormula to its equation

//! Algorithm Selection Module
//!
//! Formulas are identified by an enum and dispatched through a table of pure
//! functions, so adding a variant never touches call sites.
//!
//! # Example
//!
//! ```rust,no_run
//! use nutrition_engine::config::intelligence::BmrConfig;
//! use nutrition_engine::intelligence::algorithms::{estimate_bmr, BmrFormula, BmrInputs};
//! use nutrition_engine::models::{PatientMeasurement, Sex};
//!
//! let patient = PatientMeasurement::new(70.0, 175.0, 30, Sex::Male);
//! let inputs = BmrInputs::from_measurement(&patient);
//! let bmr = estimate_bmr(BmrFormula::HarrisBenedictRevised, &inputs, &BmrConfig::default());
//! ```

pub mod bmr;

pub use bmr::{estimate_bmr, formula_fn, BmrFn, BmrInputs};
pub use nutrition_core::intelligence::algorithms::BmrFormula;
