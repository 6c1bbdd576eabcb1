// ABOUTME: Core types and constants for the nutrition calculation engine
// ABOUTME: Foundation crate with error handling, domain models, and physiological constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Core
//!
//! Foundation crate providing shared types and constants for the nutrition
//! engine. It changes rarely, which keeps incremental builds of the engine
//! crate cheap.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and field-addressed `ValidationErrors`
//! - **constants**: Physiological bounds, energy densities, and cache defaults
//! - **models**: Patient measurements, categorical inputs, requests, and results
//! - **intelligence**: `BmrFormula` identifiers

/// Unified error handling system with standard error codes
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Intelligence types (`BmrFormula`)
pub mod intelligence;
