// ABOUTME: Logging configuration and structured logging setup for grading sessions
// ABOUTME: Builds a tracing-subscriber stack from environment variables and logs session lifecycle events
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Structured logging configuration
//!
//! The grading crates only emit `tracing` events. Hosts that want them on
//! stdout call [`init_from_env`] once at startup; hosts with their own
//! subscriber skip it.

use anyhow::{Context, Result};
use readiness_core::config::GradingConfig;
use serde_json::json;
use std::env;
use std::io;
use std::str::FromStr;
use tracing::{info, warn, Subscriber};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default service name reported in startup logs
pub const DEFAULT_SERVICE_NAME: &str = "pt-readiness";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `readiness_grading=debug,info`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread ids and names
    pub include_thread: bool,
    /// Service name stamped on the startup line
    pub service_name: String,
    /// Service version stamped on the startup line
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One `JSON` object per event, for log shipping
    Json,
    /// Human-readable multi-field lines
    #[default]
    Pretty,
    /// Single short line per event, for kiosk consoles
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::default(),
            include_location: false,
            include_thread: false,
            service_name: DEFAULT_SERVICE_NAME.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`, `LOG_INCLUDE_THREAD`,
    /// `SERVICE_NAME` and `SERVICE_VERSION`, defaulting anything unset
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.format),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: env::var("LOG_INCLUDE_THREAD").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
        }
    }

    /// Filter built from `level`, falling back to `info` when the directive does not parse
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    fn output_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread)
            .with_writer(io::stdout);
        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.with_target(true).boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(self.output_layer())
            .try_init()
            .context("global tracing subscriber already installed")?;

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            log.format = ?self.format,
            log.level = %self.level,
            "Readiness grading logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Session lifecycle log lines with consistent field names
pub struct WorkoutLogger;

impl WorkoutLogger {
    /// Log the thresholds a tracker will grade with
    pub fn log_grading_config(config: &GradingConfig) {
        let thresholds = json!({
            "visibility": config.visibility_threshold,
            "pushup": {
                "extended": config.pushup.extended_elbow_angle,
                "bent": config.pushup.bent_elbow_angle,
                "straight_back": config.pushup.straight_back_angle,
            },
            "pullup": {
                "extended": config.pullup.extended_elbow_angle,
                "chin_offset": config.pullup.chin_over_bar_offset,
                "kipping": config.pullup.kipping_threshold,
            },
            "situp": {
                "down": config.situp.down_hip_angle,
                "up": config.situp.up_hip_angle,
                "hand_to_ear": config.situp.hand_to_ear_ratio,
                "foot_lift": config.situp.foot_lift_ratio,
            },
            "run_target_meters": config.run.target_distance_meters,
        });
        info!(
            grading.standard = %config.scoring_standard,
            grading.thresholds = %thresholds,
            "Grading configuration loaded"
        );
    }

    /// Log a session start
    pub fn log_session_started(session_id: &str, exercise: &str) {
        info!(
            session.id = %session_id,
            workout.exercise = %exercise,
            "Workout session started"
        );
    }

    /// Log a session end with its final score
    pub fn log_session_ended(
        session_id: &str,
        exercise: &str,
        performance_value: f64,
        score: u8,
        form_score: u8,
        duration_secs: f64,
    ) {
        info!(
            session.id = %session_id,
            workout.exercise = %exercise,
            workout.performance = performance_value,
            workout.score = score,
            workout.form_score = form_score,
            workout.duration_secs = duration_secs,
            "Workout session ended"
        );
    }

    /// Log a host call that does not fit the session lifecycle
    pub fn log_lifecycle_violation(operation: &str, details: &str) {
        warn!(
            session.operation = %operation,
            session.details = %details,
            "Invalid session state"
        );
    }
}
