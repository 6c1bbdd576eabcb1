// ABOUTME: Error types for the nutrition engine, re-exported from nutrition-core
// ABOUTME: AppError, ErrorCode, and field-addressed ValidationErrors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! The error types live in `nutrition-core` so that the models and the
//! engine share them; this module re-exports them under the engine crate.

pub use nutrition_core::errors::*;
