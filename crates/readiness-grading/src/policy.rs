// ABOUTME: Per-exercise policies - required joints, thresholds and pure pose predicates
// ABOUTME: Tagged-variant configuration injected into the generic repetition state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise policies
//!
//! A policy is built once at session start and never mutated. The state
//! machine reads the phase meaning from [`PolicyKind`]: push-up "down" means
//! elbows bent, pull-up "down" means a dead hang, sit-up "down" means lying
//! flat.

use crate::geometry::{bilateral_angle, joint_distance, mean_y};
use readiness_core::config::{GradingConfig, PullupThresholds, PushupThresholds, SitupThresholds};
use readiness_core::constants::{form, situp, visibility};
use readiness_core::errors::{AppError, AppResult};
use readiness_core::models::{ExerciseType, JointId, PoseSample};
use serde::{Deserialize, Serialize};
use std::fmt;

const PUSHUP_JOINTS: &[JointId] = &[
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftElbow,
    JointId::RightElbow,
    JointId::LeftWrist,
    JointId::RightWrist,
    JointId::LeftHip,
    JointId::RightHip,
    JointId::LeftKnee,
    JointId::RightKnee,
];

const PULLUP_JOINTS: &[JointId] = &[
    JointId::Nose,
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftElbow,
    JointId::RightElbow,
    JointId::LeftWrist,
    JointId::RightWrist,
    JointId::LeftHip,
    JointId::RightHip,
];

const SITUP_JOINTS: &[JointId] = &[
    JointId::LeftEar,
    JointId::RightEar,
    JointId::LeftShoulder,
    JointId::RightShoulder,
    JointId::LeftWrist,
    JointId::RightWrist,
    JointId::LeftHip,
    JointId::RightHip,
    JointId::LeftKnee,
    JointId::RightKnee,
    JointId::LeftAnkle,
    JointId::RightAnkle,
];

const LEFT_ELBOW: [JointId; 3] = [JointId::LeftShoulder, JointId::LeftElbow, JointId::LeftWrist];
const RIGHT_ELBOW: [JointId; 3] = [
    JointId::RightShoulder,
    JointId::RightElbow,
    JointId::RightWrist,
];
const LEFT_HIP: [JointId; 3] = [JointId::LeftShoulder, JointId::LeftHip, JointId::LeftKnee];
const RIGHT_HIP: [JointId; 3] = [JointId::RightShoulder, JointId::RightHip, JointId::RightKnee];

/// Technique violation that invalidates the current rep cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFault {
    /// Push-up torso sagged or piked
    BackNotStraight,
    /// Pull-up hips swung up toward the shoulders
    Kipping,
    /// Sit-up hands left the back of the head
    HandsNotBehindHead,
    /// Sit-up feet rose off the ground
    FeetOffGround,
}

impl FormFault {
    /// Stable reason code for persistence and UI lookups
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BackNotStraight => "back_not_straight",
            Self::Kipping => "kipping",
            Self::HandsNotBehindHead => "hands_not_behind_head",
            Self::FeetOffGround => "feet_off_ground",
        }
    }

    /// Feedback line shown to the athlete
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::BackNotStraight => "Keep your back straight!",
            Self::Kipping => "Avoid kipping or swinging!",
            Self::HandsNotBehindHead => "Keep hands behind your head!",
            Self::FeetOffGround => "Keep feet on the ground!",
        }
    }

    /// How much the fault costs the rep's form score
    #[must_use]
    pub const fn severity(self) -> FaultSeverity {
        match self {
            Self::BackNotStraight | Self::Kipping | Self::HandsNotBehindHead => {
                FaultSeverity::Critical
            }
            Self::FeetOffGround => FaultSeverity::Moderate,
        }
    }
}

/// Weight of a form fault in the per-rep form score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultSeverity {
    /// Fault that alone invalidates the rep
    Critical,
    /// Noticeable technique breakdown
    Moderate,
}

impl FaultSeverity {
    /// Points deducted from a perfect form score
    #[must_use]
    pub const fn deduction(self) -> u8 {
        match self {
            Self::Critical => form::CRITICAL_DEDUCTION,
            Self::Moderate => form::MODERATE_DEDUCTION,
        }
    }
}

/// Form score of a cycle in which `faults` were raised, each counted once
#[must_use]
pub fn cycle_form_score(faults: &[FormFault]) -> u8 {
    faults.iter().fold(form::PERFECT_FORM_SCORE, |score, fault| {
        score.saturating_sub(fault.severity().deduction())
    })
}

impl fmt::Display for FormFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What the state machine does with a sample that fails the visibility gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityLossRule {
    /// Skip the frame, keep phase and fault tracking
    HoldState,
    /// Return to `Start` and drop fault tracking and calibration
    ResetToStart,
}

/// Exercise-specific thresholds, tagged by exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "exercise", rename_all = "snake_case")]
pub enum PolicyKind {
    /// Push-up
    Pushup(PushupThresholds),
    /// Pull-up
    Pullup(PullupThresholds),
    /// Sit-up
    Situp(SitupThresholds),
}

/// Immutable per-exercise configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePolicy {
    exercise: ExerciseType,
    required_joints: &'static [JointId],
    visibility_threshold: f64,
    kind: PolicyKind,
}

impl ExercisePolicy {
    /// Push-up policy with default thresholds
    #[must_use]
    pub fn pushup() -> Self {
        Self::with_kind(
            PolicyKind::Pushup(PushupThresholds::default()),
            visibility::REQUIRED_VISIBILITY,
        )
    }

    /// Pull-up policy with default thresholds
    #[must_use]
    pub fn pullup() -> Self {
        Self::with_kind(
            PolicyKind::Pullup(PullupThresholds::default()),
            visibility::REQUIRED_VISIBILITY,
        )
    }

    /// Sit-up policy with default thresholds
    #[must_use]
    pub fn situp() -> Self {
        Self::with_kind(
            PolicyKind::Situp(SitupThresholds::default()),
            visibility::REQUIRED_VISIBILITY,
        )
    }

    /// Build a policy from explicit thresholds
    #[must_use]
    pub const fn with_kind(kind: PolicyKind, visibility_threshold: f64) -> Self {
        let (exercise, required_joints) = match kind {
            PolicyKind::Pushup(_) => (ExerciseType::Pushup, PUSHUP_JOINTS),
            PolicyKind::Pullup(_) => (ExerciseType::Pullup, PULLUP_JOINTS),
            PolicyKind::Situp(_) => (ExerciseType::Situp, SITUP_JOINTS),
        };
        Self {
            exercise,
            required_joints,
            visibility_threshold,
            kind,
        }
    }

    /// Build the policy for `exercise` from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the configuration fails validation, or
    /// `INVALID_INPUT` for the run, which has no landmark policy
    pub fn from_config(exercise: ExerciseType, config: &GradingConfig) -> AppResult<Self> {
        config.validate()?;
        let kind = match exercise {
            ExerciseType::Pushup => PolicyKind::Pushup(config.pushup),
            ExerciseType::Pullup => PolicyKind::Pullup(config.pullup),
            ExerciseType::Situp => PolicyKind::Situp(config.situp),
            ExerciseType::Run => {
                return Err(AppError::invalid_input(
                    "run is not a landmark-based exercise",
                ))
            }
        };
        Ok(Self::with_kind(kind, config.visibility_threshold))
    }

    /// Exercise this policy grades
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.exercise
    }

    /// Joints that must be visible for a sample to be evaluated
    #[must_use]
    pub const fn required_joints(&self) -> &'static [JointId] {
        self.required_joints
    }

    /// Visibility every required joint must exceed
    #[must_use]
    pub const fn visibility_threshold(&self) -> f64 {
        self.visibility_threshold
    }

    /// Exercise-specific thresholds
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        self.kind
    }

    /// How untrackable samples are handled
    #[must_use]
    pub const fn visibility_loss_rule(&self) -> VisibilityLossRule {
        match self.kind {
            PolicyKind::Pushup(_) | PolicyKind::Pullup(_) => VisibilityLossRule::HoldState,
            PolicyKind::Situp(_) => VisibilityLossRule::ResetToStart,
        }
    }
}

/// Push-up measurements for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushupPose {
    /// Mean shoulder-elbow-wrist angle
    pub elbow_angle: f64,
    /// Mean shoulder-hip-knee angle
    pub torso_angle: f64,
}

impl PushupPose {
    /// Measure a sample
    #[must_use]
    pub fn measure(sample: &PoseSample) -> Self {
        Self {
            elbow_angle: bilateral_angle(sample, LEFT_ELBOW, RIGHT_ELBOW),
            torso_angle: bilateral_angle(sample, LEFT_HIP, RIGHT_HIP),
        }
    }

    /// Arms locked out
    #[must_use]
    pub fn is_extended(&self, thresholds: &PushupThresholds) -> bool {
        self.elbow_angle >= thresholds.extended_elbow_angle
    }

    /// Bottom of the rep
    #[must_use]
    pub fn is_bent(&self, thresholds: &PushupThresholds) -> bool {
        self.elbow_angle <= thresholds.bent_elbow_angle
    }

    /// Shoulders, hips and knees in line
    #[must_use]
    pub fn is_back_straight(&self, thresholds: &PushupThresholds) -> bool {
        self.torso_angle >= thresholds.straight_back_angle
    }
}

/// Pull-up measurements for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullupPose {
    /// Mean shoulder-elbow-wrist angle
    pub elbow_angle: f64,
    /// Nose height
    pub nose_y: f64,
    /// Mean wrist height
    pub wrist_y: f64,
    /// Mean hip height minus mean shoulder height
    pub relative_hip_y: f64,
}

impl PullupPose {
    /// Measure a sample; `None` when a height joint is missing
    #[must_use]
    pub fn measure(sample: &PoseSample) -> Option<Self> {
        let hip_y = mean_y(sample, &[JointId::LeftHip, JointId::RightHip])?;
        let shoulder_y = mean_y(sample, &[JointId::LeftShoulder, JointId::RightShoulder])?;
        Some(Self {
            elbow_angle: bilateral_angle(sample, LEFT_ELBOW, RIGHT_ELBOW),
            nose_y: sample.get(JointId::Nose)?.y,
            wrist_y: mean_y(sample, &[JointId::LeftWrist, JointId::RightWrist])?,
            relative_hip_y: hip_y - shoulder_y,
        })
    }

    /// Dead hang
    #[must_use]
    pub fn is_extended(&self, thresholds: &PullupThresholds) -> bool {
        self.elbow_angle >= thresholds.extended_elbow_angle
    }

    /// Nose clearly above the hands (smaller y is higher in the frame)
    #[must_use]
    pub fn is_chin_over_bar(&self, thresholds: &PullupThresholds) -> bool {
        self.nose_y < self.wrist_y - thresholds.chin_over_bar_offset
    }

    /// Hips have risen toward the shoulders by more than the threshold since `initial_relative_hip_y`
    #[must_use]
    pub fn is_kipping(&self, initial_relative_hip_y: f64, thresholds: &PullupThresholds) -> bool {
        initial_relative_hip_y - self.relative_hip_y > thresholds.kipping_threshold
    }
}

/// Sit-up measurements for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SitupPose {
    /// Mean shoulder-hip-knee angle
    pub hip_angle: f64,
    /// Left wrist to left ear
    pub left_hand_to_ear: f64,
    /// Right wrist to right ear
    pub right_hand_to_ear: f64,
    /// Shoulder to shoulder
    pub shoulder_width: f64,
    /// Left ankle height
    pub left_ankle_y: f64,
    /// Right ankle height
    pub right_ankle_y: f64,
    /// Mean hip-to-knee distance
    pub hip_to_knee: f64,
}

impl SitupPose {
    /// Measure a sample; `None` when a required joint is missing
    #[must_use]
    pub fn measure(sample: &PoseSample) -> Option<Self> {
        let left_thigh = joint_distance(sample, JointId::LeftHip, JointId::LeftKnee)?;
        let right_thigh = joint_distance(sample, JointId::RightHip, JointId::RightKnee)?;
        Some(Self {
            hip_angle: bilateral_angle(sample, LEFT_HIP, RIGHT_HIP),
            left_hand_to_ear: joint_distance(sample, JointId::LeftWrist, JointId::LeftEar)?,
            right_hand_to_ear: joint_distance(sample, JointId::RightWrist, JointId::RightEar)?,
            shoulder_width: joint_distance(sample, JointId::LeftShoulder, JointId::RightShoulder)?,
            left_ankle_y: sample.get(JointId::LeftAnkle)?.y,
            right_ankle_y: sample.get(JointId::RightAnkle)?.y,
            hip_to_knee: (left_thigh + right_thigh) / 2.0,
        })
    }

    /// Lying flat
    #[must_use]
    pub fn is_down(&self, thresholds: &SitupThresholds) -> bool {
        self.hip_angle >= thresholds.down_hip_angle
    }

    /// Sitting up
    #[must_use]
    pub fn is_up(&self, thresholds: &SitupThresholds) -> bool {
        self.hip_angle <= thresholds.up_hip_angle
    }

    /// Both wrists close to the ears relative to shoulder width
    #[must_use]
    pub fn hands_behind_head(&self, thresholds: &SitupThresholds) -> bool {
        let limit = thresholds.hand_to_ear_ratio * self.shoulder_width;
        self.left_hand_to_ear < limit && self.right_hand_to_ear < limit
    }

    /// Either ankle rose more than the allowed share of thigh length above its reference
    #[must_use]
    pub fn feet_lifted(&self, reference: AnkleReference, thresholds: &SitupThresholds) -> bool {
        if self.hip_to_knee <= situp::MIN_HIP_TO_KNEE {
            return false;
        }
        let limit = thresholds.foot_lift_ratio * self.hip_to_knee;
        reference.left_y - self.left_ankle_y > limit || reference.right_y - self.right_ankle_y > limit
    }

    /// Ankle heights to compare later frames against
    #[must_use]
    pub const fn ankle_reference(&self) -> AnkleReference {
        AnkleReference {
            left_y: self.left_ankle_y,
            right_y: self.right_ankle_y,
        }
    }
}

/// Ankle heights recorded when `Down` was entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnkleReference {
    /// Left ankle height
    pub left_y: f64,
    /// Right ankle height
    pub right_y: f64,
}
