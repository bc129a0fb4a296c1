// ABOUTME: Core types and constants for the readiness grading engine
// ABOUTME: Foundation crate with error handling, pose data contracts, constants and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Readiness Core
//!
//! Foundation crate providing shared types and constants for the readiness
//! grading engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Grading thresholds and score anchors organized by exercise
//! - **models**: Pose data contracts (`JointId`, `Landmark`, `PoseSample`) and `ExerciseType`
//! - **config**: Threshold configuration with environment overrides and validation

/// Unified error handling system with standard error codes
pub mod errors;

/// Grading constants organized by exercise
pub mod constants;

/// Pose data contracts and exercise types
pub mod models;

/// Threshold configuration loaded once per session
pub mod config;
