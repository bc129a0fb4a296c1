// ABOUTME: Planar joint geometry - three-point angles, distances and averaged joint heights
// ABOUTME: Pure functions that fail open to a neutral 180 degree angle on degenerate input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Angle and distance calculator
//!
//! All geometry works in the image (x, y) plane; depth is ignored. Missing
//! joints, non-finite coordinates and zero-length limbs yield
//! [`NEUTRAL_ANGLE_DEGREES`], which every exercise policy reads as "arms or
//! hips extended, not yet in position". A dropped landmark can therefore never
//! complete a bend and produce a spurious rep.

use readiness_core::constants::geometry::{MIN_VECTOR_LENGTH, NEUTRAL_ANGLE_DEGREES};
use readiness_core::models::{JointId, Landmark, PoseSample};

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees `[0, 180]`
#[must_use]
pub fn angle_degrees(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    if !(a.is_finite() && b.is_finite() && c.is_finite()) {
        return NEUTRAL_ANGLE_DEGREES;
    }

    let (v1x, v1y) = (a.x - b.x, a.y - b.y);
    let (v2x, v2y) = (c.x - b.x, c.y - b.y);
    if v1x.hypot(v1y) < MIN_VECTOR_LENGTH || v2x.hypot(v2y) < MIN_VECTOR_LENGTH {
        return NEUTRAL_ANGLE_DEGREES;
    }

    let cross = v1x.mul_add(v2y, -(v1y * v2x));
    let dot = v1x.mul_add(v2x, v1y * v2y);
    let degrees = cross.abs().atan2(dot).to_degrees();
    if degrees.is_finite() {
        degrees.clamp(0.0, 180.0)
    } else {
        NEUTRAL_ANGLE_DEGREES
    }
}

/// Angle at joint `b`, or the neutral angle when any joint is missing
#[must_use]
pub fn joint_angle(sample: &PoseSample, a: JointId, b: JointId, c: JointId) -> f64 {
    match (sample.get(a), sample.get(b), sample.get(c)) {
        (Some(a), Some(b), Some(c)) => angle_degrees(a, b, c),
        _ => NEUTRAL_ANGLE_DEGREES,
    }
}

/// Mean of the left-side and right-side angles for the same joint chain
#[must_use]
pub fn bilateral_angle(sample: &PoseSample, left: [JointId; 3], right: [JointId; 3]) -> f64 {
    let left = joint_angle(sample, left[0], left[1], left[2]);
    let right = joint_angle(sample, right[0], right[1], right[2]);
    (left + right) / 2.0
}

/// Euclidean distance using only x and y
#[must_use]
pub fn planar_distance(a: &Landmark, b: &Landmark) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Planar distance between two joints of a sample
#[must_use]
pub fn joint_distance(sample: &PoseSample, a: JointId, b: JointId) -> Option<f64> {
    Some(planar_distance(sample.get(a)?, sample.get(b)?))
}

/// Mean vertical position of the given joints; `None` if any is missing
#[must_use]
pub fn mean_y(sample: &PoseSample, joints: &[JointId]) -> Option<f64> {
    if joints.is_empty() {
        return None;
    }
    let mut total = 0.0;
    for joint in joints {
        total += sample.get(*joint)?.y;
    }
    Some(total / joints.len() as f64)
}
