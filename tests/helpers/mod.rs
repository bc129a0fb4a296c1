// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports synthetic pose generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod synthetic_pose;
