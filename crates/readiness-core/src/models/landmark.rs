// ABOUTME: Landmark and pose sample data contracts supplied by the external pose source
// ABOUTME: One PoseSample per processed camera frame, keyed by JointId
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::joint::JointId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A single tracked joint for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Which joint this is
    pub id: JointId,
    /// Normalized horizontal position
    pub x: f64,
    /// Normalized vertical position (grows downward)
    pub y: f64,
    /// Relative depth, ignored by the planar geometry
    pub z: f64,
    /// Tracking confidence in `[0, 1]`
    pub visibility: f64,
}

impl Landmark {
    /// Create a landmark, clamping visibility into `[0, 1]`
    #[must_use]
    pub fn new(id: JointId, x: f64, y: f64, z: f64, visibility: f64) -> Self {
        let visibility = if visibility.is_nan() {
            0.0
        } else {
            visibility.clamp(0.0, 1.0)
        };
        Self {
            id,
            x,
            y,
            z,
            visibility,
        }
    }

    /// Whether both planar coordinates are finite
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Full set of landmarks at one timestamp
///
/// `timestamp` is measured from the start of the capture stream, which keeps
/// samples comparable and serializable without a wall clock.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseSample {
    /// Capture time relative to stream start
    pub timestamp: Duration,
    /// Landmarks keyed by joint
    pub landmarks: HashMap<JointId, Landmark>,
}

impl PoseSample {
    /// Build a sample from any collection of landmarks
    #[must_use]
    pub fn new(timestamp: Duration, landmarks: impl IntoIterator<Item = Landmark>) -> Self {
        Self {
            timestamp,
            landmarks: landmarks.into_iter().map(|lm| (lm.id, lm)).collect(),
        }
    }

    /// Build a sample from the pose model's ordered `[x, y, z, visibility]` output
    ///
    /// Entries beyond the 33 known landmarks are ignored.
    #[must_use]
    pub fn from_indexed(timestamp: Duration, points: &[[f64; 4]]) -> Self {
        let landmarks = points.iter().enumerate().filter_map(|(index, point)| {
            JointId::from_index(index)
                .map(|id| Landmark::new(id, point[0], point[1], point[2], point[3]))
        });
        Self::new(timestamp, landmarks)
    }

    /// Landmark for a joint, if present
    #[must_use]
    pub fn get(&self, joint: JointId) -> Option<&Landmark> {
        self.landmarks.get(&joint)
    }

    /// Insert or replace a landmark
    pub fn insert(&mut self, landmark: Landmark) {
        self.landmarks.insert(landmark.id, landmark);
    }

    /// Whether the sample has no landmarks at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
