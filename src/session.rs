// ABOUTME: Host-facing session control - start, drive and end one workout at a time
// ABOUTME: Hands final counts to the scoring engine and returns a serializable workout summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Session control
//!
//! [`WorkoutTracker`] owns at most one active session. Lifecycle misuse
//! (driving with nothing started, starting twice, ending twice, feeding pose
//! samples to a run) is a host bug and surfaces as `INVALID_SESSION_STATE`.

use crate::logging::WorkoutLogger;
use chrono::{DateTime, Utc};
use readiness_core::config::{GradingConfig, ScoringStandard};
use readiness_core::constants::form::PERFECT_FORM_SCORE;
use readiness_core::errors::{AppError, AppResult};
use readiness_core::models::{ExerciseType, PoseSample};
use readiness_grading::run::{GeoFix, RunEvent, RunSession};
use readiness_grading::scoring::score_with;
use readiness_grading::{ExerciseSession, RepEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final record handed to the persistence/sync layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Session identifier
    pub id: Uuid,
    /// Exercise performed
    pub exercise_type: ExerciseType,
    /// Valid reps, or elapsed seconds for the run
    pub performance_value: f64,
    /// Valid reps (zero for the run)
    pub rep_count: u32,
    /// Reps rejected for form (zero for the run)
    pub rejected_reps: u32,
    /// Mean per-rep form quality, 100 for the run
    pub form_score: u8,
    /// Distance covered, run only
    pub distance_meters: Option<f64>,
    /// Normalized score
    pub score: u8,
    /// Curve family used for `score`
    pub standard: ScoringStandard,
    /// Sample-time span for exercises, elapsed seconds for the run
    pub session_duration_secs: f64,
    /// When `end_session` ran
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug)]
enum ActiveSession {
    Exercise(ExerciseSession),
    Run(RunSession),
}

#[derive(Debug)]
struct ActiveWorkout {
    id: Uuid,
    exercise: ExerciseType,
    session: ActiveSession,
}

/// Single-owner session controller
#[derive(Debug)]
pub struct WorkoutTracker {
    config: GradingConfig,
    active: Option<ActiveWorkout>,
}

impl WorkoutTracker {
    /// Create a tracker with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the configuration fails validation
    pub fn new(config: GradingConfig) -> AppResult<Self> {
        config.validate()?;
        WorkoutLogger::log_grading_config(&config);
        Ok(Self {
            config,
            active: None,
        })
    }

    /// Create a tracker configured from `GRADING_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` if the resulting configuration is invalid
    pub fn from_env() -> AppResult<Self> {
        Self::new(GradingConfig::from_env())
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Begin tracking `exercise`
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if a session is already active
    pub fn start_session(&mut self, exercise: ExerciseType) -> AppResult<Uuid> {
        if let Some(active) = &self.active {
            return Err(lifecycle_error(
                "start_session",
                format!(
                    "{} session {} is still active",
                    active.exercise, active.id
                ),
            ));
        }

        let session = if exercise.is_landmark_based() {
            ActiveSession::Exercise(ExerciseSession::start(exercise, &self.config)?)
        } else {
            ActiveSession::Run(RunSession::start(self.config.run)?)
        };
        let id = Uuid::new_v4();
        WorkoutLogger::log_session_started(&id.to_string(), exercise.as_str());
        self.active = Some(ActiveWorkout {
            id,
            exercise,
            session,
        });
        Ok(id)
    }

    /// Feed one pose sample to the active exercise session
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if no landmark-based session is active
    pub fn advance(&mut self, sample: &PoseSample) -> AppResult<RepEvent> {
        self.exercise_mut("advance")?.advance(sample)
    }

    /// Advance the active run by one second
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if no run is active
    pub fn tick(&mut self) -> AppResult<RunEvent> {
        self.run_mut("tick")?.tick()
    }

    /// Feed a position fix to the active run
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if no run is active
    pub fn record_fix(&mut self, fix: GeoFix) -> AppResult<RunEvent> {
        self.run_mut("record_fix")?.record_fix(fix)
    }

    /// Update the pace of the active run
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if no run is active, or `INVALID_INPUT`
    /// for a negative pace
    pub fn record_pace(&mut self, pace_mph: f64) -> AppResult<()> {
        self.run_mut("record_pace")?.record_pace(pace_mph)
    }

    /// Finish the active session and score it
    ///
    /// A run is scored on elapsed seconds at the moment it ends, whether or
    /// not the target distance was reached.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if no session is active
    pub fn end_session(&mut self) -> AppResult<WorkoutSummary> {
        let Some(mut workout) = self.active.take() else {
            return Err(lifecycle_error("end_session", "no active session"));
        };
        let standard = self.config.scoring_standard;

        let summary = match &mut workout.session {
            ActiveSession::Exercise(session) => {
                let outcome = session.finish()?;
                let performance_value = f64::from(outcome.rep_count);
                WorkoutSummary {
                    id: workout.id,
                    exercise_type: workout.exercise,
                    performance_value,
                    rep_count: outcome.rep_count,
                    rejected_reps: outcome.rejected_reps,
                    form_score: outcome.form_score,
                    distance_meters: None,
                    score: score_with(workout.exercise, performance_value, standard),
                    standard,
                    session_duration_secs: outcome.duration.as_secs_f64(),
                    completed_at: Utc::now(),
                }
            }
            ActiveSession::Run(run) => {
                let outcome = run.finish()?;
                let performance_value = f64::from(outcome.elapsed_seconds);
                let score = score_with(workout.exercise, performance_value, standard);
                WorkoutSummary {
                    id: workout.id,
                    exercise_type: workout.exercise,
                    performance_value,
                    rep_count: 0,
                    rejected_reps: 0,
                    form_score: PERFECT_FORM_SCORE,
                    distance_meters: Some(outcome.distance_meters),
                    score,
                    standard,
                    session_duration_secs: performance_value,
                    completed_at: Utc::now(),
                }
            }
        };

        WorkoutLogger::log_session_ended(
            &summary.id.to_string(),
            summary.exercise_type.as_str(),
            summary.performance_value,
            summary.score,
            summary.form_score,
            summary.session_duration_secs,
        );
        Ok(summary)
    }

    /// Whether a session is running
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Exercise of the running session
    #[must_use]
    pub fn active_exercise(&self) -> Option<ExerciseType> {
        self.active.as_ref().map(|workout| workout.exercise)
    }

    /// Identifier of the running session
    #[must_use]
    pub fn active_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|workout| workout.id)
    }

    /// Running landmark session, for live counters
    #[must_use]
    pub fn exercise_session(&self) -> Option<&ExerciseSession> {
        match self.active.as_ref().map(|workout| &workout.session) {
            Some(ActiveSession::Exercise(session)) => Some(session),
            _ => None,
        }
    }

    /// Running run session, for live distance and pace
    #[must_use]
    pub fn run_session(&self) -> Option<&RunSession> {
        match self.active.as_ref().map(|workout| &workout.session) {
            Some(ActiveSession::Run(run)) => Some(run),
            _ => None,
        }
    }

    fn exercise_mut(&mut self, operation: &str) -> AppResult<&mut ExerciseSession> {
        match self.active.as_mut().map(|workout| &mut workout.session) {
            Some(ActiveSession::Exercise(session)) => Ok(session),
            Some(ActiveSession::Run(_)) => Err(lifecycle_error(
                operation,
                "pose samples cannot drive a run session",
            )),
            None => Err(lifecycle_error(operation, "no active session")),
        }
    }

    fn run_mut(&mut self, operation: &str) -> AppResult<&mut RunSession> {
        match self.active.as_mut().map(|workout| &mut workout.session) {
            Some(ActiveSession::Run(run)) => Ok(run),
            Some(ActiveSession::Exercise(_)) => Err(lifecycle_error(
                operation,
                "run updates cannot drive a landmark session",
            )),
            None => Err(lifecycle_error(operation, "no active session")),
        }
    }
}

fn lifecycle_error(operation: &str, details: impl Into<String>) -> AppError {
    let details = details.into();
    WorkoutLogger::log_lifecycle_violation(operation, &details);
    AppError::invalid_session_state(format!("{operation}: {details}"))
}
