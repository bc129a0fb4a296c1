// ABOUTME: Per-exercise grading threshold configuration
// ABOUTME: Defaults come from constants; environment variables override; validate() rejects nonsense
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::error::ConfigError;
use crate::constants::{pullup, pushup, run, situp, visibility};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Read an environment variable, falling back to `default` when unset or unparsable
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, "ignoring unparsable grading override");
        default
    })
}

fn check_angle(value: f64, what: &'static str) -> Result<(), ConfigError> {
    if (0.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(what))
    }
}

fn check_positive(value: f64, what: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange(what))
    }
}

/// Push-up thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushupThresholds {
    /// Elbow angle (degrees) at or above which arms are extended
    pub extended_elbow_angle: f64,
    /// Elbow angle (degrees) at or below which arms are bent
    pub bent_elbow_angle: f64,
    /// Shoulder-hip-knee angle (degrees) at or above which the back is straight
    pub straight_back_angle: f64,
}

impl Default for PushupThresholds {
    fn default() -> Self {
        Self {
            extended_elbow_angle: pushup::EXTENDED_ELBOW_ANGLE,
            bent_elbow_angle: pushup::BENT_ELBOW_ANGLE,
            straight_back_angle: pushup::STRAIGHT_BACK_ANGLE,
        }
    }
}

impl PushupThresholds {
    /// Load push-up thresholds from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            extended_elbow_angle: env_or(
                "GRADING_PUSHUP_EXTENDED_ANGLE",
                defaults.extended_elbow_angle,
            ),
            bent_elbow_angle: env_or("GRADING_PUSHUP_BENT_ANGLE", defaults.bent_elbow_angle),
            straight_back_angle: env_or(
                "GRADING_PUSHUP_STRAIGHT_BACK_ANGLE",
                defaults.straight_back_angle,
            ),
        }
    }

    /// Validate angle ranges and ordering
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an angle is outside `[0, 180]` or the bent
    /// angle is not strictly below the extended angle
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_angle(self.extended_elbow_angle, "pushup extended_elbow_angle")?;
        check_angle(self.bent_elbow_angle, "pushup bent_elbow_angle")?;
        check_angle(self.straight_back_angle, "pushup straight_back_angle")?;
        if self.bent_elbow_angle >= self.extended_elbow_angle {
            return Err(ConfigError::InvalidRange(
                "pushup bent_elbow_angle must be below extended_elbow_angle",
            ));
        }
        Ok(())
    }
}

/// Pull-up thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullupThresholds {
    /// Elbow angle (degrees) at or above which the athlete hangs extended
    pub extended_elbow_angle: f64,
    /// Required nose clearance above average wrist height (normalized units)
    pub chin_over_bar_offset: f64,
    /// Loss of hip-below-shoulder distance that counts as a kip (normalized units)
    pub kipping_threshold: f64,
}

impl Default for PullupThresholds {
    fn default() -> Self {
        Self {
            extended_elbow_angle: pullup::EXTENDED_ELBOW_ANGLE,
            chin_over_bar_offset: pullup::CHIN_OVER_BAR_OFFSET,
            kipping_threshold: pullup::KIPPING_THRESHOLD,
        }
    }
}

impl PullupThresholds {
    /// Load pull-up thresholds from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            extended_elbow_angle: env_or(
                "GRADING_PULLUP_EXTENDED_ANGLE",
                defaults.extended_elbow_angle,
            ),
            chin_over_bar_offset: env_or(
                "GRADING_PULLUP_CHIN_OFFSET",
                defaults.chin_over_bar_offset,
            ),
            kipping_threshold: env_or(
                "GRADING_PULLUP_KIPPING_THRESHOLD",
                defaults.kipping_threshold,
            ),
        }
    }

    /// Validate ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the angle is outside `[0, 180]` or an offset is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_angle(self.extended_elbow_angle, "pullup extended_elbow_angle")?;
        check_positive(self.chin_over_bar_offset, "pullup chin_over_bar_offset")?;
        check_positive(self.kipping_threshold, "pullup kipping_threshold")
    }
}

/// Sit-up thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SitupThresholds {
    /// Hip angle (degrees) at or above which the athlete is lying down
    pub down_hip_angle: f64,
    /// Hip angle (degrees) at or below which the athlete is sitting up
    pub up_hip_angle: f64,
    /// Maximum wrist-to-ear distance as a fraction of shoulder width
    pub hand_to_ear_ratio: f64,
    /// Maximum ankle rise as a fraction of hip-to-knee distance
    pub foot_lift_ratio: f64,
}

impl Default for SitupThresholds {
    fn default() -> Self {
        Self {
            down_hip_angle: situp::DOWN_HIP_ANGLE,
            up_hip_angle: situp::UP_HIP_ANGLE,
            hand_to_ear_ratio: situp::HAND_TO_EAR_RATIO,
            foot_lift_ratio: situp::FOOT_LIFT_RATIO,
        }
    }
}

impl SitupThresholds {
    /// Load sit-up thresholds from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            down_hip_angle: env_or("GRADING_SITUP_DOWN_ANGLE", defaults.down_hip_angle),
            up_hip_angle: env_or("GRADING_SITUP_UP_ANGLE", defaults.up_hip_angle),
            hand_to_ear_ratio: env_or("GRADING_SITUP_HAND_TO_EAR_RATIO", defaults.hand_to_ear_ratio),
            foot_lift_ratio: env_or("GRADING_SITUP_FOOT_LIFT_RATIO", defaults.foot_lift_ratio),
        }
    }

    /// Validate angle ranges, ordering and ratios
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an angle is outside `[0, 180]`, the up angle is
    /// not strictly below the down angle, or a ratio is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_angle(self.down_hip_angle, "situp down_hip_angle")?;
        check_angle(self.up_hip_angle, "situp up_hip_angle")?;
        if self.up_hip_angle >= self.down_hip_angle {
            return Err(ConfigError::InvalidRange(
                "situp up_hip_angle must be below down_hip_angle",
            ));
        }
        check_positive(self.hand_to_ear_ratio, "situp hand_to_ear_ratio")?;
        check_positive(self.foot_lift_ratio, "situp foot_lift_ratio")
    }
}

/// Run tracking configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Distance at which the tracker reports the target as reached
    pub target_distance_meters: f64,
    /// Consecutive fixes at least this far apart are discarded
    pub max_fix_jump_meters: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_distance_meters: run::TWO_MILES_METERS,
            max_fix_jump_meters: run::MAX_FIX_JUMP_METERS,
        }
    }
}

impl RunConfig {
    /// Load run configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            target_distance_meters: env_or(
                "GRADING_RUN_TARGET_DISTANCE_METERS",
                defaults.target_distance_meters,
            ),
            max_fix_jump_meters: env_or(
                "GRADING_RUN_MAX_FIX_JUMP_METERS",
                defaults.max_fix_jump_meters,
            ),
        }
    }

    /// Validate distances
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a distance is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive(self.target_distance_meters, "run target_distance_meters")?;
        check_positive(self.max_fix_jump_meters, "run max_fix_jump_meters")
    }
}

/// Shared visibility threshold, read from `GRADING_VISIBILITY_THRESHOLD`
#[must_use]
pub fn visibility_threshold_from_env() -> f64 {
    env_or(
        "GRADING_VISIBILITY_THRESHOLD",
        visibility::REQUIRED_VISIBILITY,
    )
}
