// ABOUTME: Data model re-exports for pose samples and exercise types
// ABOUTME: Contracts shared between the ingestion boundary and the grading algorithms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise type enumeration
mod exercise;
/// Closed joint enumeration
mod joint;
/// Landmark and pose sample contracts
mod landmark;

pub use exercise::ExerciseType;
pub use joint::JointId;
pub use landmark::{Landmark, PoseSample};
