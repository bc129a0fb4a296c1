// ABOUTME: Synthetic pose sample generator for repetition and form-fault testing
// ABOUTME: Builds landmark layouts with exact joint angles, hand placement and hip/ankle offsets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pt_readiness::models::{JointId, Landmark, PoseSample};
use std::time::Duration;

/// Offset applied to every right-side joint so both sides share angles but not positions
const RIGHT_SIDE_OFFSET: f64 = 0.15;

/// One pull-up frame
#[derive(Debug, Clone, Copy)]
pub struct PullupFrame {
    /// Elbow angle in degrees, both arms
    pub elbow_degrees: f64,
    /// How far the nose sits above the mean wrist height (negative = below)
    pub nose_above_wrists: f64,
    /// Mean hip height minus mean shoulder height
    pub relative_hip_y: f64,
}

impl PullupFrame {
    /// Dead hang with hips well below the shoulders
    pub const fn hang() -> Self {
        Self {
            elbow_degrees: 165.0,
            nose_above_wrists: -0.15,
            relative_hip_y: 0.30,
        }
    }

    /// Halfway up
    pub const fn pulling() -> Self {
        Self {
            elbow_degrees: 100.0,
            nose_above_wrists: -0.05,
            relative_hip_y: 0.30,
        }
    }

    /// Chin clearly over the bar
    pub const fn top() -> Self {
        Self {
            elbow_degrees: 60.0,
            nose_above_wrists: 0.10,
            relative_hip_y: 0.30,
        }
    }

    /// Same frame with the hips swung up to `relative_hip_y`
    pub const fn with_hips(self, relative_hip_y: f64) -> Self {
        Self {
            relative_hip_y,
            ..self
        }
    }
}

/// One sit-up frame
#[derive(Debug, Clone, Copy)]
pub struct SitupFrame {
    /// Shoulder-hip-knee angle in degrees
    pub hip_degrees: f64,
    /// Wrists next to the ears
    pub hands_behind_head: bool,
    /// How far both ankles rose above the floor
    pub ankle_lift: f64,
}

impl SitupFrame {
    /// Lying flat, hands on head
    pub const fn down() -> Self {
        Self {
            hip_degrees: 170.0,
            hands_behind_head: true,
            ankle_lift: 0.0,
        }
    }

    /// Halfway up
    pub const fn rising() -> Self {
        Self {
            hip_degrees: 120.0,
            hands_behind_head: true,
            ankle_lift: 0.0,
        }
    }

    /// Sitting up
    pub const fn up() -> Self {
        Self {
            hip_degrees: 70.0,
            hands_behind_head: true,
            ankle_lift: 0.0,
        }
    }

    /// Same frame with the hands thrown forward
    pub const fn hands_forward(self) -> Self {
        Self {
            hands_behind_head: false,
            ..self
        }
    }

    /// Same frame with the feet lifted
    pub const fn feet_lifted(self, ankle_lift: f64) -> Self {
        Self { ankle_lift, ..self }
    }
}

/// Deterministic frame generator, 30 fps by default
#[derive(Debug, Clone)]
pub struct SyntheticPoseBuilder {
    frame: u64,
    frame_interval: Duration,
    visibility: f64,
}

impl Default for SyntheticPoseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticPoseBuilder {
    /// New builder starting at t = 0
    pub const fn new() -> Self {
        Self {
            frame: 0,
            frame_interval: Duration::from_millis(33),
            visibility: 0.95,
        }
    }

    /// Visibility stamped on every landmark of subsequent frames
    pub const fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = visibility;
        self
    }

    /// Change visibility without rebuilding
    pub fn set_visibility(&mut self, visibility: f64) {
        self.visibility = visibility;
    }

    fn next_timestamp(&mut self) -> Duration {
        let ts = self.frame_interval * u32::try_from(self.frame).unwrap();
        self.frame += 1;
        ts
    }

    fn both_sides(&self, left: &[(JointId, f64, f64)], right: &[JointId]) -> Vec<Landmark> {
        let mut landmarks: Vec<Landmark> = left
            .iter()
            .map(|(id, x, y)| Landmark::new(*id, *x, *y, 0.0, self.visibility))
            .collect();
        for ((_, x, y), id) in left.iter().zip(right) {
            landmarks.push(Landmark::new(
                *id,
                x + RIGHT_SIDE_OFFSET,
                *y,
                0.0,
                self.visibility,
            ));
        }
        landmarks
    }

    /// Side-view push-up frame with the given elbow and shoulder-hip-knee angles
    pub fn pushup(&mut self, elbow_degrees: f64, torso_degrees: f64) -> PoseSample {
        let e = elbow_degrees.to_radians();
        let t = torso_degrees.to_radians();
        let (sx, sy) = (0.3, 0.5);
        let (ex, ey) = (0.3, 0.6);
        let (hx, hy) = (0.6, 0.5);
        let left = [
            (JointId::LeftShoulder, sx, sy),
            (JointId::LeftElbow, ex, ey),
            (JointId::LeftWrist, 0.1f64.mul_add(e.sin(), ex), 0.1f64.mul_add(-e.cos(), ey)),
            (JointId::LeftHip, hx, hy),
            (JointId::LeftKnee, 0.2f64.mul_add(-t.cos(), hx), 0.2f64.mul_add(t.sin(), hy)),
        ];
        let right = [
            JointId::RightShoulder,
            JointId::RightElbow,
            JointId::RightWrist,
            JointId::RightHip,
            JointId::RightKnee,
        ];
        let landmarks = self.both_sides(&left, &right);
        PoseSample::new(self.next_timestamp(), landmarks)
    }

    /// Front-view pull-up frame
    pub fn pullup(&mut self, frame: PullupFrame) -> PoseSample {
        let e = frame.elbow_degrees.to_radians();
        let (sx, sy) = (0.4, 0.5);
        let (ex, ey) = (sx, sy - 0.1);
        let (wx, wy) = (0.1f64.mul_add(e.sin(), ex), 0.1f64.mul_add(e.cos(), ey));
        let hip_y = sy + frame.relative_hip_y;
        let left = [
            (JointId::LeftShoulder, sx, sy),
            (JointId::LeftElbow, ex, ey),
            (JointId::LeftWrist, wx, wy),
            (JointId::LeftHip, sx, hip_y),
        ];
        let right = [
            JointId::RightShoulder,
            JointId::RightElbow,
            JointId::RightWrist,
            JointId::RightHip,
        ];
        let mut landmarks = self.both_sides(&left, &right);
        landmarks.push(Landmark::new(
            JointId::Nose,
            sx + RIGHT_SIDE_OFFSET / 2.0,
            wy - frame.nose_above_wrists,
            0.0,
            self.visibility,
        ));
        PoseSample::new(self.next_timestamp(), landmarks)
    }

    /// Three-quarter view sit-up frame
    pub fn situp(&mut self, frame: SitupFrame) -> PoseSample {
        let a = frame.hip_degrees.to_radians();
        let (hx, hy) = (0.5, 0.7);
        let (kx, ky) = (0.7, 0.7);
        let (dx, dy) = (a.cos(), -a.sin());
        let (sx, sy) = (0.25f64.mul_add(dx, hx), 0.25f64.mul_add(dy, hy));
        let (earx, eary) = (0.08f64.mul_add(dx, sx), 0.08f64.mul_add(dy, sy));
        let (wx, wy) = if frame.hands_behind_head {
            (earx, eary + 0.03)
        } else {
            (kx + 0.05, ky)
        };
        let ankle_y = 0.8 - frame.ankle_lift;
        let left = [
            (JointId::LeftEar, earx, eary),
            (JointId::LeftShoulder, sx, sy),
            (JointId::LeftWrist, wx, wy),
            (JointId::LeftHip, hx, hy),
            (JointId::LeftKnee, kx, ky),
            (JointId::LeftAnkle, 0.8, ankle_y),
        ];
        let right = [
            JointId::RightEar,
            JointId::RightShoulder,
            JointId::RightWrist,
            JointId::RightHip,
            JointId::RightKnee,
            JointId::RightAnkle,
        ];
        let landmarks = self.both_sides(&left, &right);
        PoseSample::new(self.next_timestamp(), landmarks)
    }
}
