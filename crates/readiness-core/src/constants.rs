// ABOUTME: Grading constants organized by exercise domain
// ABOUTME: Visibility, angle and ratio thresholds plus run and scoring anchors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Grading constants
//!
//! Every threshold the repetition state machine and scoring engine consult is
//! named here. Coordinates are normalized image coordinates, so y grows
//! downward and ratios are unitless.

/// Landmark confidence gate shared by all landmark-based exercises
pub mod visibility {
    /// Every required joint must be strictly above this visibility
    pub const REQUIRED_VISIBILITY: f64 = 0.6;
}

/// Geometry fallbacks
pub mod geometry {
    /// Angle reported for missing or degenerate input (reads as "not yet in position")
    pub const NEUTRAL_ANGLE_DEGREES: f64 = 180.0;
    /// Vectors shorter than this are treated as zero-length
    pub const MIN_VECTOR_LENGTH: f64 = 1e-9;
}

/// Push-up thresholds
pub mod pushup {
    /// Average elbow angle at or above which arms count as extended
    pub const EXTENDED_ELBOW_ANGLE: f64 = 160.0;
    /// Average elbow angle at or below which arms count as bent
    pub const BENT_ELBOW_ANGLE: f64 = 90.0;
    /// Average shoulder-hip-knee angle at or above which the back counts as straight
    pub const STRAIGHT_BACK_ANGLE: f64 = 165.0;
}

/// Pull-up thresholds
pub mod pullup {
    /// Average elbow angle at or above which the athlete is in a dead hang
    pub const EXTENDED_ELBOW_ANGLE: f64 = 160.0;
    /// Nose must be this far above the average wrist height to clear the bar
    pub const CHIN_OVER_BAR_OFFSET: f64 = 0.05;
    /// Loss of hip-below-shoulder distance that marks a kip
    pub const KIPPING_THRESHOLD: f64 = 0.15;
}

/// Sit-up thresholds
pub mod situp {
    /// Average shoulder-hip-knee angle at or above which the athlete is lying down
    pub const DOWN_HIP_ANGLE: f64 = 160.0;
    /// Average shoulder-hip-knee angle at or below which the athlete is sitting up
    pub const UP_HIP_ANGLE: f64 = 80.0;
    /// Wrist-to-ear distance must stay below this fraction of shoulder width
    pub const HAND_TO_EAR_RATIO: f64 = 0.6;
    /// Ankle rise allowed as a fraction of hip-to-knee distance
    pub const FOOT_LIFT_RATIO: f64 = 0.08;
    /// Below this hip-to-knee distance the foot-lift check is skipped (body too small in frame)
    pub const MIN_HIP_TO_KNEE: f64 = 0.01;
}

/// Run tracking constants
pub mod run {
    /// Meters in one statute mile
    pub const METERS_PER_MILE: f64 = 1609.34;
    /// Default target distance (two miles)
    pub const TWO_MILES_METERS: f64 = 3218.69;
    /// Consecutive fixes at least this far apart are treated as GPS noise
    pub const MAX_FIX_JUMP_METERS: f64 = 100.0;
    /// Mean Earth radius used by the haversine helper
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
}

/// Form-quality deductions applied per fault raised in a rep cycle
pub mod form {
    /// Form score of a cycle with no faults
    pub const PERFECT_FORM_SCORE: u8 = 100;
    /// Deduction for a fault that invalidates the rep outright
    pub const CRITICAL_DEDUCTION: u8 = 20;
    /// Deduction for a fault that degrades the rep
    pub const MODERATE_DEDUCTION: u8 = 10;
}

/// Linear score curve anchors, expressed as (performance, points)
pub mod scoring {
    /// Lowest possible score
    pub const MIN_SCORE: u8 = 0;
    /// Highest possible score
    pub const MAX_SCORE: u8 = 100;

    /// Push-up reps that earn zero points
    pub const PUSHUP_ZERO_REPS: f64 = 10.0;
    /// Push-up reps that earn full points
    pub const PUSHUP_MAX_REPS: f64 = 60.0;
    /// Pull-up reps that earn zero points
    pub const PULLUP_ZERO_REPS: f64 = 0.0;
    /// Pull-up reps that earn full points
    pub const PULLUP_MAX_REPS: f64 = 20.0;
    /// Sit-up reps that earn zero points
    pub const SITUP_ZERO_REPS: f64 = 16.0;
    /// Sit-up reps that earn full points
    pub const SITUP_MAX_REPS: f64 = 78.0;
    /// Run time (seconds) at or below which the score is full
    pub const RUN_MAX_SCORE_SECONDS: f64 = 780.0;
    /// Run time (seconds) at or above which the score is zero
    pub const RUN_ZERO_SCORE_SECONDS: f64 = 1200.0;
}
