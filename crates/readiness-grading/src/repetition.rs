// ABOUTME: Generic Start/Down/Up repetition state machine driven by an injected exercise policy
// ABOUTME: Tracks form faults for the whole rep cycle and emits one RepEvent per pose sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Repetition state machine
//!
//! One [`ExerciseSession`] per tracked set. The owner feeds samples in arrival
//! order through [`ExerciseSession::advance`], which runs each sample to
//! completion and reports what happened as a [`RepEvent`]. Faults raised at any
//! point of a rep cycle stay active until the next `Down` entry, so a kip or a
//! lifted foot during the concentric phase still voids the rep even when the
//! final frame looks clean.

use crate::policy::{
    cycle_form_score, AnkleReference, ExercisePolicy, FormFault, PolicyKind, PullupPose,
    PushupPose, SitupPose, VisibilityLossRule,
};
use crate::visibility::is_trackable;
use readiness_core::config::{GradingConfig, PullupThresholds, PushupThresholds, SitupThresholds};
use readiness_core::constants::form;
use readiness_core::errors::{AppError, AppResult};
use readiness_core::models::{ExerciseType, PoseSample};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Phase of a repetition; the policy decides what each phase looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepState {
    /// Not yet in the starting position
    #[default]
    Start,
    /// Contracted or lowered phase
    Down,
    /// Extended or raised phase
    Up,
}

impl fmt::Display for RepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Down => f.write_str("down"),
            Self::Up => f.write_str("up"),
        }
    }
}

/// Outcome of feeding one sample to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepEvent {
    /// Sample evaluated, nothing changed
    NoChange,
    /// Sample failed the visibility gate
    Untracked,
    /// Moved between phases without completing a rep
    PhaseChanged {
        /// Previous phase
        from: RepState,
        /// New phase
        to: RepState,
    },
    /// A valid rep completed
    RepCounted {
        /// Total after this rep
        rep_count: u32,
    },
    /// A rep cycle completed but failed a form check
    RepRejected {
        /// First fault raised during the cycle
        fault: FormFault,
    },
}

impl RepEvent {
    /// Whether the UI has anything to show for this event
    #[must_use]
    pub const fn is_noteworthy(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Reference positions captured when `Down` is entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationRef {
    /// Pull-up hip height below shoulders at the dead hang
    Pullup {
        /// Mean hip y minus mean shoulder y
        relative_hip_y: f64,
    },
    /// Sit-up ankle heights while lying flat
    Situp(AnkleReference),
}

/// Final counts handed to the scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseOutcome {
    /// Exercise graded
    pub exercise: ExerciseType,
    /// Valid reps
    pub rep_count: u32,
    /// Completed cycles that failed a form check
    pub rejected_reps: u32,
    /// Time between the first and last sample
    pub duration: Duration,
    /// Most recent fault observed
    pub last_fault: Option<FormFault>,
    /// Mean form score of completed or voided cycles, 100 when none
    pub form_score: u8,
}

/// Mutable tracking state for one landmark-based exercise set
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    policy: ExercisePolicy,
    state: RepState,
    rep_count: u32,
    rejected_reps: u32,
    active_fault: Option<FormFault>,
    cycle_faults: Vec<FormFault>,
    form_scores: Vec<u8>,
    last_fault: Option<FormFault>,
    calibration: Option<CalibrationRef>,
    first_timestamp: Option<Duration>,
    last_timestamp: Option<Duration>,
    finished: bool,
}

impl ExerciseSession {
    /// Start tracking with the given policy
    #[must_use]
    pub const fn new(policy: ExercisePolicy) -> Self {
        Self {
            policy,
            state: RepState::Start,
            rep_count: 0,
            rejected_reps: 0,
            active_fault: None,
            cycle_faults: Vec::new(),
            form_scores: Vec::new(),
            last_fault: None,
            calibration: None,
            first_timestamp: None,
            last_timestamp: None,
            finished: false,
        }
    }

    /// Start tracking `exercise` with thresholds from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or `exercise` is the run
    pub fn start(exercise: ExerciseType, config: &GradingConfig) -> AppResult<Self> {
        let session = Self::new(ExercisePolicy::from_config(exercise, config)?);
        debug!(exercise = %exercise, "exercise session started");
        Ok(session)
    }

    /// Evaluate one sample
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if the session has been finished
    pub fn advance(&mut self, sample: &PoseSample) -> AppResult<RepEvent> {
        if self.finished {
            return Err(AppError::invalid_session_state(format!(
                "advance called on finished {} session",
                self.policy.exercise()
            )));
        }

        self.first_timestamp.get_or_insert(sample.timestamp);
        self.last_timestamp = Some(sample.timestamp);

        if !is_trackable(sample, &self.policy) {
            return Ok(self.lose_visibility());
        }

        let event = match self.policy.kind() {
            PolicyKind::Pushup(t) => self.step_pushup(PushupPose::measure(sample), &t),
            PolicyKind::Pullup(t) => match PullupPose::measure(sample) {
                Some(pose) => self.step_pullup(pose, &t),
                None => self.lose_visibility(),
            },
            PolicyKind::Situp(t) => match SitupPose::measure(sample) {
                Some(pose) => self.step_situp(pose, &t),
                None => self.lose_visibility(),
            },
        };
        Ok(event)
    }

    /// Freeze the session and return its counts
    ///
    /// # Errors
    ///
    /// Returns `INVALID_SESSION_STATE` if the session was already finished
    pub fn finish(&mut self) -> AppResult<ExerciseOutcome> {
        if self.finished {
            return Err(AppError::invalid_session_state(format!(
                "{} session already finished",
                self.policy.exercise()
            )));
        }
        self.finished = true;
        let outcome = self.outcome();
        info!(
            exercise = %outcome.exercise,
            rep_count = outcome.rep_count,
            rejected_reps = outcome.rejected_reps,
            form_score = outcome.form_score,
            duration_ms = u64::try_from(outcome.duration.as_millis()).unwrap_or(u64::MAX),
            "exercise session finished"
        );
        Ok(outcome)
    }

    /// Counts so far, without finishing
    #[must_use]
    pub fn outcome(&self) -> ExerciseOutcome {
        ExerciseOutcome {
            exercise: self.policy.exercise(),
            rep_count: self.rep_count,
            rejected_reps: self.rejected_reps,
            duration: self.duration(),
            last_fault: self.last_fault,
            form_score: self.form_score(),
        }
    }

    /// Policy driving this session
    #[must_use]
    pub const fn policy(&self) -> &ExercisePolicy {
        &self.policy
    }

    /// Exercise being tracked
    #[must_use]
    pub const fn exercise(&self) -> ExerciseType {
        self.policy.exercise()
    }

    /// Current phase
    #[must_use]
    pub const fn state(&self) -> RepState {
        self.state
    }

    /// Valid reps so far
    #[must_use]
    pub const fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Rejected reps so far
    #[must_use]
    pub const fn rejected_reps(&self) -> u32 {
        self.rejected_reps
    }

    /// Whether the current rep cycle has a fault
    #[must_use]
    pub const fn form_fault_active(&self) -> bool {
        self.active_fault.is_some()
    }

    /// Fault voiding the current rep cycle, if any
    #[must_use]
    pub const fn active_fault(&self) -> Option<FormFault> {
        self.active_fault
    }

    /// Most recent fault seen in any cycle
    #[must_use]
    pub const fn last_fault(&self) -> Option<FormFault> {
        self.last_fault
    }

    /// Mean form score over closed cycles, rounded; 100 before any cycle closes
    #[must_use]
    pub fn form_score(&self) -> u8 {
        if self.form_scores.is_empty() {
            return form::PERFECT_FORM_SCORE;
        }
        let count = self.form_scores.len() as u32;
        let total: u32 = self.form_scores.iter().map(|&score| u32::from(score)).sum();
        u8::try_from((total * 2 + count) / (count * 2)).unwrap_or(form::PERFECT_FORM_SCORE)
    }

    /// Form score of each closed cycle, in order
    #[must_use]
    pub fn cycle_form_scores(&self) -> &[u8] {
        &self.form_scores
    }

    /// Reference captured at the last `Down` entry
    #[must_use]
    pub const fn calibration(&self) -> Option<CalibrationRef> {
        self.calibration
    }

    /// Time between the first and latest sample
    #[must_use]
    pub fn duration(&self) -> Duration {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => Duration::ZERO,
        }
    }

    /// Whether `finish` has been called
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    fn lose_visibility(&mut self) -> RepEvent {
        if self.policy.visibility_loss_rule() == VisibilityLossRule::ResetToStart
            && (self.state != RepState::Start || self.active_fault.is_some())
        {
            debug!(
                exercise = %self.policy.exercise(),
                from = %self.state,
                "visibility lost, resetting to start"
            );
            self.state = RepState::Start;
            self.open_cycle();
            self.calibration = None;
        }
        RepEvent::Untracked
    }

    fn transition(&mut self, to: RepState) -> RepEvent {
        let from = self.state;
        self.state = to;
        debug!(exercise = %self.policy.exercise(), %from, %to, "phase changed");
        RepEvent::PhaseChanged { from, to }
    }

    fn raise_fault(&mut self, fault: FormFault) {
        if self.active_fault.is_none() {
            debug!(exercise = %self.policy.exercise(), fault = fault.code(), "form fault");
            self.active_fault = Some(fault);
        }
        if !self.cycle_faults.contains(&fault) {
            self.cycle_faults.push(fault);
        }
        self.last_fault = Some(fault);
    }

    fn open_cycle(&mut self) {
        self.active_fault = None;
        self.cycle_faults.clear();
    }

    fn close_cycle(&mut self, faults: &[FormFault]) {
        let score = cycle_form_score(faults);
        debug!(exercise = %self.policy.exercise(), form_score = score, "cycle closed");
        self.form_scores.push(score);
    }

    fn count_rep(&mut self, to: RepState) -> RepEvent {
        let faults = mem::take(&mut self.cycle_faults);
        self.close_cycle(&faults);
        self.state = to;
        self.rep_count += 1;
        info!(
            exercise = %self.policy.exercise(),
            rep_count = self.rep_count,
            "rep counted"
        );
        RepEvent::RepCounted {
            rep_count: self.rep_count,
        }
    }

    fn reject_rep(&mut self, to: RepState, fault: FormFault) -> RepEvent {
        let faults = mem::take(&mut self.cycle_faults);
        self.close_cycle(&faults);
        self.state = to;
        self.rejected_reps += 1;
        warn!(
            exercise = %self.policy.exercise(),
            fault = fault.code(),
            rejected_reps = self.rejected_reps,
            "rep rejected"
        );
        RepEvent::RepRejected { fault }
    }

    fn step_pushup(&mut self, pose: PushupPose, t: &PushupThresholds) -> RepEvent {
        if !pose.is_back_straight(t) {
            self.last_fault = Some(FormFault::BackNotStraight);
            return if self.state == RepState::Start {
                RepEvent::NoChange
            } else {
                self.close_cycle(&[FormFault::BackNotStraight]);
                self.transition(RepState::Start)
            };
        }

        match self.state {
            RepState::Start if pose.is_extended(t) => self.transition(RepState::Up),
            RepState::Up if pose.is_bent(t) => self.transition(RepState::Down),
            RepState::Down if pose.is_extended(t) => self.count_rep(RepState::Up),
            _ => RepEvent::NoChange,
        }
    }

    fn enter_pullup_down(&mut self, pose: PullupPose) {
        self.open_cycle();
        self.calibration = Some(CalibrationRef::Pullup {
            relative_hip_y: pose.relative_hip_y,
        });
    }

    fn step_pullup(&mut self, pose: PullupPose, t: &PullupThresholds) -> RepEvent {
        match self.state {
            RepState::Start => {
                if pose.is_extended(t) {
                    self.enter_pullup_down(pose);
                    self.transition(RepState::Down)
                } else {
                    RepEvent::NoChange
                }
            }
            RepState::Down => {
                if let Some(CalibrationRef::Pullup { relative_hip_y }) = self.calibration {
                    if pose.is_kipping(relative_hip_y, t) {
                        self.raise_fault(FormFault::Kipping);
                    }
                }
                if !pose.is_chin_over_bar(t) {
                    return RepEvent::NoChange;
                }
                match self.active_fault {
                    Some(fault) => self.reject_rep(RepState::Up, fault),
                    None => self.transition(RepState::Up),
                }
            }
            RepState::Up => {
                if !pose.is_extended(t) {
                    return RepEvent::NoChange;
                }
                let event = if self.active_fault.is_none() {
                    self.count_rep(RepState::Down)
                } else {
                    self.transition(RepState::Down)
                };
                self.enter_pullup_down(pose);
                event
            }
        }
    }

    fn enter_situp_down(&mut self, pose: &SitupPose, t: &SitupThresholds) {
        self.open_cycle();
        self.calibration = Some(CalibrationRef::Situp(pose.ankle_reference()));
        if !pose.hands_behind_head(t) {
            self.raise_fault(FormFault::HandsNotBehindHead);
        }
    }

    fn step_situp(&mut self, pose: SitupPose, t: &SitupThresholds) -> RepEvent {
        if self.state != RepState::Start {
            if !pose.hands_behind_head(t) {
                self.raise_fault(FormFault::HandsNotBehindHead);
            }
            if let Some(CalibrationRef::Situp(reference)) = self.calibration {
                if pose.feet_lifted(reference, t) {
                    self.raise_fault(FormFault::FeetOffGround);
                }
            }
        }

        match self.state {
            RepState::Start | RepState::Up if pose.is_down(t) => {
                self.enter_situp_down(&pose, t);
                self.transition(RepState::Down)
            }
            RepState::Down if pose.is_up(t) => match self.active_fault {
                Some(fault) => self.reject_rep(RepState::Up, fault),
                None => self.count_rep(RepState::Up),
            },
            _ => RepEvent::NoChange,
        }
    }
}
