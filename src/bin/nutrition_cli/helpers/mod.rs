// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Helper modules for nutrition-cli
// ABOUTME: Provides text rendering for results, meal plans, and field errors

pub mod display;
