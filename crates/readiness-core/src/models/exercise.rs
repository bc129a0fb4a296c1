// ABOUTME: Exercise type enumeration for graded events
// ABOUTME: Parsing, display and landmark-vs-run classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Graded exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Push-up, counted from elbow angle with a straight-back requirement
    Pushup,
    /// Pull-up, counted from dead hang to chin over bar
    Pullup,
    /// Sit-up, counted from hip angle with hand and foot checks
    Situp,
    /// Timed run, graded on elapsed time
    Run,
}

impl ExerciseType {
    /// Exercises driven by pose landmarks
    pub const LANDMARK_BASED: [Self; 3] = [Self::Pushup, Self::Pullup, Self::Situp];

    /// Whether this exercise consumes pose samples (as opposed to time/position ticks)
    #[must_use]
    pub const fn is_landmark_based(self) -> bool {
        !matches!(self, Self::Run)
    }

    /// Whether a higher performance value is better (reps) or worse (run time)
    #[must_use]
    pub const fn higher_is_better(self) -> bool {
        self.is_landmark_based()
    }

    /// Stable `snake_case` identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pushup => "pushup",
            Self::Pullup => "pullup",
            Self::Situp => "situp",
            Self::Run => "run",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pushup" | "pushups" => Ok(Self::Pushup),
            "pullup" | "pullups" => Ok(Self::Pullup),
            "situp" | "situps" => Ok(Self::Situp),
            "run" | "running" | "tworun" | "twomilerun" => Ok(Self::Run),
            other => Err(AppError::invalid_input(format!(
                "Unknown exercise type: '{other}'. Valid options: pushup, pullup, situp, run"
            ))),
        }
    }
}
