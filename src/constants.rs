// ABOUTME: Engine constants re-exported from nutrition-core
// ABOUTME: Physiological bounds, energy densities, cache defaults, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module

pub use nutrition_core::constants::*;
