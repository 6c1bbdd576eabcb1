// ABOUTME: Cache-related constants for TTL, capacity, and cleanup intervals
// ABOUTME: Defaults for the in-memory calculation result cache and its namespaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default maximum cache entries per cache instance
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;

/// Default cleanup interval in seconds for expired entries
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

/// Calculation result TTL (30 minutes) - identical re-renders within a consultation
pub const TTL_NUTRITION_CALCULATION_SECS: u64 = 1_800;

/// Patient query TTL (5 minutes) - patient records change during a consultation
pub const TTL_PATIENT_QUERY_SECS: u64 = 300;

/// Namespace prefix for nutrition calculation results
pub const NAMESPACE_NUTRITION_CALCULATION: &str = "nutrition-calc";

/// Namespace prefix for patient record queries
pub const NAMESPACE_PATIENT_QUERY: &str = "patient-query";
