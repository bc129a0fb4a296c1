// ABOUTME: Timed run tracker - one-second ticks, pace integration and GPS fix distance
// ABOUTME: Purely additive state; reports the target distance once but never stops itself
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Run session tracker
//!
//! Distance comes from one of two sources. Hosts without positioning report a
//! pace in mph and every [`RunSession::tick`] adds `pace × 1 s`. Hosts with a
//! location feed call [`RunSession::record_fix`]; once a fix has been accepted
//! ticks only advance the clock and distance is the haversine sum of accepted
//! fix-to-fix segments.

use readiness_core::config::RunConfig;
use readiness_core::constants::run::{EARTH_RADIUS_METERS, METERS_PER_MILE, SECONDS_PER_HOUR};
use readiness_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// One position report from the location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    /// Time since the stream started
    pub timestamp: Duration,
    /// Latitude in degrees
    pub latitude_deg: f64,
    /// Longitude in degrees
    pub longitude_deg: f64,
}

impl GeoFix {
    /// Create a fix
    #[must_use]
    pub const fn new(timestamp: Duration, latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            timestamp,
            latitude_deg,
            longitude_deg,
        }
    }
}

/// Great-circle distance between two fixes in meters
#[must_use]
pub fn haversine_meters(a: &GeoFix, b: &GeoFix) -> f64 {
    let lat1 = a.latitude_deg.to_radians();
    let lat2 = b.latitude_deg.to_radians();
    let d_lat = (b.latitude_deg - a.latitude_deg).to_radians();
    let d_lon = (b.longitude_deg - a.longitude_deg).to_radians();

    let h = (lat1.cos() * lat2.cos())
        .mul_add((d_lon / 2.0).sin().powi(2), (d_lat / 2.0).sin().powi(2));
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Why a fix did not contribute distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixRejection {
    /// Timestamp did not move forward
    NonIncreasingTime,
    /// Too far from the previous fix to be real movement
    Jump,
    /// Coordinates were not finite
    InvalidCoordinates,
}

/// Outcome of one run update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// Clock or distance moved
    Progress {
        /// Whole seconds elapsed
        elapsed_seconds: u32,
        /// Distance covered
        distance_meters: f64,
    },
    /// Fix discarded as noise
    FixIgnored {
        /// Reason the fix was dropped
        reason: FixRejection,
    },
    /// Target distance crossed; reported once per session
    TargetReached {
        /// Whole seconds elapsed when crossed
        elapsed_seconds: u32,
        /// Distance covered
        distance_meters: f64,
    },
}

/// Final run numbers handed to the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Whole seconds elapsed
    pub elapsed_seconds: u32,
    /// Distance covered
    pub distance_meters: f64,
    /// Whether the target distance was reached
    pub reached_target: bool,
}

/// Mutable run tracking state
#[derive(Debug, Clone)]
pub struct RunSession {
    config: RunConfig,
    elapsed_seconds: u32,
    distance_meters: f64,
    pace_mph: f64,
    last_sample_time: Option<Duration>,
    last_fix: Option<GeoFix>,
    gps_active: bool,
    target_reported: bool,
    finished: bool,
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}

impl RunSession {
    /// Start a run with the given target and noise filter
    #[must_use]
    pub const fn new(config: RunConfig) -> Self {
        Self {
            config,
            elapsed_seconds: 0,
            distance_meters: 0.0,
            pace_mph: 0.0,
            last_sample_time: None,
            last_fix: None,
            gps_active: false,
            target_reported: false,
            finished: false,
        }
    }

    /// Start a run from a configuration, validating it first
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the run configuration is invalid
    pub fn start(config: RunConfig) -> AppResult<Self> {
        config.validate()?;
        debug!(target_meters = config.target_distance_meters, "run session started");
        Ok(Self::new(config))
    }

    /// Advance the clock by one second
    ///
    /// Without GPS, also integrates the current pace over that second.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if the run has been finished
    pub fn tick(&mut self) -> AppResult<RunEvent> {
        self.ensure_running("tick")?;
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        if !self.gps_active {
            self.distance_meters += mph_to_meters_per_second(self.pace_mph);
        }
        Ok(self.progress_event())
    }

    /// Set the current pace reported by the host
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if finished, or `INVALID_INPUT` for a
    /// negative or non-finite pace
    pub fn record_pace(&mut self, pace_mph: f64) -> AppResult<()> {
        self.ensure_running("record_pace")?;
        if !pace_mph.is_finite() || pace_mph < 0.0 {
            return Err(AppError::invalid_input(format!(
                "pace must be a non-negative number of mph, got {pace_mph}"
            )));
        }
        self.pace_mph = pace_mph;
        Ok(())
    }

    /// Add distance from a position fix
    ///
    /// The first fix only anchors the track. Later fixes with a non-increasing
    /// timestamp or a jump at or beyond the configured limit are ignored.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if the run has been finished
    pub fn record_fix(&mut self, fix: GeoFix) -> AppResult<RunEvent> {
        self.ensure_running("record_fix")?;

        if !(fix.latitude_deg.is_finite() && fix.longitude_deg.is_finite()) {
            return Ok(self.ignore_fix(FixRejection::InvalidCoordinates));
        }

        let Some(previous) = self.last_fix else {
            self.last_fix = Some(fix);
            self.last_sample_time = Some(fix.timestamp);
            self.gps_active = true;
            return Ok(self.progress_event());
        };

        let Some(dt) = fix
            .timestamp
            .checked_sub(previous.timestamp)
            .filter(|dt| !dt.is_zero())
        else {
            return Ok(self.ignore_fix(FixRejection::NonIncreasingTime));
        };

        let segment = haversine_meters(&previous, &fix);
        if segment >= self.config.max_fix_jump_meters {
            return Ok(self.ignore_fix(FixRejection::Jump));
        }

        self.distance_meters += segment;
        self.pace_mph = segment / dt.as_secs_f64() * SECONDS_PER_HOUR / METERS_PER_MILE;
        self.last_fix = Some(fix);
        self.last_sample_time = Some(fix.timestamp);
        Ok(self.progress_event())
    }

    /// Freeze the run
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if the run was already finished
    pub fn finish(&mut self) -> AppResult<RunOutcome> {
        self.ensure_running("finish")?;
        self.finished = true;
        let outcome = RunOutcome {
            elapsed_seconds: self.elapsed_seconds,
            distance_meters: self.distance_meters,
            reached_target: self.reached_target(),
        };
        info!(
            elapsed_seconds = outcome.elapsed_seconds,
            distance_meters = outcome.distance_meters,
            reached_target = outcome.reached_target,
            "run session finished"
        );
        Ok(outcome)
    }

    /// Whole seconds elapsed
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Distance covered in meters
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Most recent pace in mph
    #[must_use]
    pub const fn pace_mph(&self) -> f64 {
        self.pace_mph
    }

    /// Timestamp of the last accepted fix
    #[must_use]
    pub const fn last_sample_time(&self) -> Option<Duration> {
        self.last_sample_time
    }

    /// Target distance in meters
    #[must_use]
    pub const fn target_distance_meters(&self) -> f64 {
        self.config.target_distance_meters
    }

    /// Share of the target covered, in `[0, 1]`
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.distance_meters / self.config.target_distance_meters).clamp(0.0, 1.0)
    }

    /// Whether the target distance has been covered
    #[must_use]
    pub fn reached_target(&self) -> bool {
        self.distance_meters >= self.config.target_distance_meters
    }

    /// Whether `finish` has been called
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Average time per mile so far as `MM:SS`, or `--:--` before any distance
    #[must_use]
    pub fn pace_per_mile(&self) -> String {
        let miles = self.distance_meters / METERS_PER_MILE;
        if miles <= f64::EPSILON {
            return "--:--".to_owned();
        }
        format_clock((f64::from(self.elapsed_seconds) / miles).round())
    }

    fn ensure_running(&self, operation: &str) -> AppResult<()> {
        if self.finished {
            Err(AppError::invalid_session_state(format!(
                "{operation} called on finished run session"
            )))
        } else {
            Ok(())
        }
    }

    fn ignore_fix(&self, reason: FixRejection) -> RunEvent {
        warn!(?reason, elapsed_seconds = self.elapsed_seconds, "GPS fix ignored");
        RunEvent::FixIgnored { reason }
    }

    fn progress_event(&mut self) -> RunEvent {
        if !self.target_reported && self.reached_target() {
            self.target_reported = true;
            info!(
                elapsed_seconds = self.elapsed_seconds,
                distance_meters = self.distance_meters,
                "run target distance reached"
            );
            return RunEvent::TargetReached {
                elapsed_seconds: self.elapsed_seconds,
                distance_meters: self.distance_meters,
            };
        }
        RunEvent::Progress {
            elapsed_seconds: self.elapsed_seconds,
            distance_meters: self.distance_meters,
        }
    }
}

fn mph_to_meters_per_second(mph: f64) -> f64 {
    mph * METERS_PER_MILE / SECONDS_PER_HOUR
}

/// `MM:SS` for a non-negative number of seconds; minutes may exceed 59
#[must_use]
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(secs: u64, lat: f64, lon: f64) -> GeoFix {
        GeoFix::new(Duration::from_secs(secs), lat, lon)
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine_meters(&fix(0, 0.0, 0.0), &fix(1, 1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_tick_integrates_pace_without_gps() {
        let mut run = RunSession::default();
        run.record_pace(7.5).unwrap();
        for _ in 0..60 {
            run.tick().unwrap();
        }
        assert_eq!(run.elapsed_seconds(), 60);
        let expected = 7.5 * METERS_PER_MILE / 60.0;
        assert!((run.distance_meters() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_fix_filters_noise() {
        let mut run = RunSession::default();
        run.record_fix(fix(0, 40.0, -75.0)).unwrap();
        // ~11 m north
        let event = run.record_fix(fix(3, 40.0001, -75.0)).unwrap();
        assert!(matches!(event, RunEvent::Progress { .. }));
        let after_first = run.distance_meters();
        assert!((after_first - 11.1).abs() < 0.2);

        assert_eq!(
            run.record_fix(fix(3, 40.0002, -75.0)).unwrap(),
            RunEvent::FixIgnored {
                reason: FixRejection::NonIncreasingTime
            }
        );
        assert_eq!(
            run.record_fix(fix(4, 40.01, -75.0)).unwrap(),
            RunEvent::FixIgnored {
                reason: FixRejection::Jump
            }
        );
        assert!((run.distance_meters() - after_first).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gps_disables_pace_integration() {
        let mut run = RunSession::default();
        run.record_pace(8.0).unwrap();
        run.record_fix(fix(0, 40.0, -75.0)).unwrap();
        run.tick().unwrap();
        assert!(run.distance_meters().abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_reported_once_and_tracker_keeps_running() {
        let mut run = RunSession::new(RunConfig {
            target_distance_meters: 5.0,
            ..RunConfig::default()
        });
        run.record_pace(10.0).unwrap(); // ~4.47 m/s
        assert!(matches!(run.tick().unwrap(), RunEvent::Progress { .. }));
        assert!(matches!(run.tick().unwrap(), RunEvent::TargetReached { .. }));
        assert!(matches!(run.tick().unwrap(), RunEvent::Progress { .. }));
        assert_eq!(run.elapsed_seconds(), 3);
        assert!((run.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pace_per_mile_and_finish() {
        let mut run = RunSession::default();
        assert_eq!(run.pace_per_mile(), "--:--");
        run.record_pace(7.5).unwrap();
        for _ in 0..480 {
            run.tick().unwrap();
        }
        assert_eq!(run.pace_per_mile(), "08:00");

        let outcome = run.finish().unwrap();
        assert_eq!(outcome.elapsed_seconds, 480);
        assert!(!outcome.reached_target);
        assert!(run.tick().is_err());
        assert!(run.finish().is_err());
    }

    #[test]
    fn test_negative_pace_rejected() {
        let mut run = RunSession::default();
        assert!(run.record_pace(-1.0).is_err());
        assert!(run.record_pace(f64::NAN).is_err());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(930.0), "15:30");
        assert_eq!(format_clock(59.6), "01:00");
        assert_eq!(format_clock(-5.0), "00:00");
    }
}
