// ABOUTME: Common benchmark utilities for grading performance tests
// ABOUTME: Re-exports deterministic pose stream generators used by Criterion benches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common benchmark utilities.

pub mod fixtures;
