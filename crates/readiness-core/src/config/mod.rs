// ABOUTME: Configuration module for grading thresholds and scoring standard
// ABOUTME: GradingConfig aggregates per-exercise thresholds and is loaded once per session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration validation errors
pub mod error;
/// Per-exercise thresholds
pub mod thresholds;

pub use error::ConfigError;
pub use thresholds::{
    visibility_threshold_from_env, PullupThresholds, PushupThresholds, RunConfig, SitupThresholds,
};

use crate::constants::visibility;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which family of score curves the scoring engine uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStandard {
    /// Canonical linear curves between a zero-point and a full-point anchor
    #[default]
    Linear,
    /// APFT lookup tables (17-21 male bracket) with closest-lower-anchor lookup
    ApftTable,
}

impl fmt::Display for ScoringStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::ApftTable => f.write_str("apft_table"),
        }
    }
}

impl FromStr for ScoringStandard {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "apft" | "apft_table" | "table" => Ok(Self::ApftTable),
            other => Err(ConfigError::Parse(format!(
                "unknown scoring standard '{other}' (expected linear or apft_table)"
            ))),
        }
    }
}

/// Complete grading configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Minimum visibility every required joint must exceed
    pub visibility_threshold: f64,
    /// Push-up thresholds
    pub pushup: PushupThresholds,
    /// Pull-up thresholds
    pub pullup: PullupThresholds,
    /// Sit-up thresholds
    pub situp: SitupThresholds,
    /// Run tracking settings
    pub run: RunConfig,
    /// Score curve family
    pub scoring_standard: ScoringStandard,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: visibility::REQUIRED_VISIBILITY,
            pushup: PushupThresholds::default(),
            pullup: PullupThresholds::default(),
            situp: SitupThresholds::default(),
            run: RunConfig::default(),
            scoring_standard: ScoringStandard::default(),
        }
    }
}

fn scoring_standard_from_env() -> ScoringStandard {
    let Ok(raw) = env::var("GRADING_SCORING_STANDARD") else {
        return ScoringStandard::default();
    };
    raw.parse().unwrap_or_else(|e: ConfigError| {
        warn!(error = %e, "falling back to linear scoring");
        ScoringStandard::default()
    })
}

impl GradingConfig {
    /// Load the full configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults; the result is not
    /// validated, call [`GradingConfig::validate`] before use.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            visibility_threshold: visibility_threshold_from_env(),
            pushup: PushupThresholds::from_env(),
            pullup: PullupThresholds::from_env(),
            situp: SitupThresholds::from_env(),
            run: RunConfig::from_env(),
            scoring_standard: scoring_standard_from_env(),
        }
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ConfigError::ValueOutOfRange("visibility_threshold"));
        }
        self.pushup.validate()?;
        self.pullup.validate()?;
        self.situp.validate()?;
        self.run.validate()
    }
}
