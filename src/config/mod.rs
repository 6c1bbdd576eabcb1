// ABOUTME: Configuration management module for the nutrition engine
// ABOUTME: Handles environment loading, rule tables, and cache settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! - **Environment**: Aggregated startup configuration from environment variables
//! - **Intelligence**: Rule tables (BMR coefficients, activity factors, objectives, profiles)
//! - **Cache**: Result cache capacity, TTLs, and sweep interval

/// Result cache configuration
pub mod cache;
/// Aggregated startup configuration
pub mod environment;
/// Rule tables and validation bounds
pub mod intelligence;
