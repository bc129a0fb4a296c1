// ABOUTME: Visibility gate deciding whether a pose sample is usable for an exercise
// ABOUTME: Also reports which required joints are missing and the mean landmark confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::policy::ExercisePolicy;
use readiness_core::models::{JointId, PoseSample};

/// Whether every required joint is present and strictly above the policy's visibility threshold
#[must_use]
pub fn is_trackable(sample: &PoseSample, policy: &ExercisePolicy) -> bool {
    policy.required_joints().iter().all(|joint| {
        sample
            .get(*joint)
            .is_some_and(|lm| lm.visibility > policy.visibility_threshold())
    })
}

/// Required joints that are absent or not confidently tracked, in policy order
#[must_use]
pub fn missing_joints(sample: &PoseSample, policy: &ExercisePolicy) -> Vec<JointId> {
    policy
        .required_joints()
        .iter()
        .copied()
        .filter(|joint| {
            sample
                .get(*joint)
                .is_none_or(|lm| lm.visibility <= policy.visibility_threshold())
        })
        .collect()
}

/// Mean visibility across every landmark in the sample, `0.0` when empty
#[must_use]
pub fn average_confidence(sample: &PoseSample) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let total: f64 = sample.landmarks.values().map(|lm| lm.visibility).sum();
    total / sample.landmarks.len() as f64
}
