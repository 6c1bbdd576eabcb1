// ABOUTME: Intelligence types shared between the engine crate and its callers
// ABOUTME: Contains the BmrFormula identifier enum used for formula dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Algorithm identifiers (BMR formula variants)
pub mod algorithms;
