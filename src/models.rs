// ABOUTME: Domain models for nutrition calculations, re-exported from nutrition-core
// ABOUTME: Patient measurements, categorical inputs, requests, results, and warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models

pub use nutrition_core::models::*;
