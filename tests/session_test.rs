// ABOUTME: Integration tests for the host-facing workout tracker
// ABOUTME: Full exercise flow, serialized summaries, lifecycle misuse and environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;
mod helpers;

use helpers::synthetic_pose::{PullupFrame, SitupFrame, SyntheticPoseBuilder};
use pt_readiness::config::ScoringStandard;
use pt_readiness::errors::ErrorCode;
use pt_readiness::models::ExerciseType;
use pt_readiness::repetition::RepEvent;
use pt_readiness::session::{WorkoutSummary, WorkoutTracker};
use serial_test::serial;
use std::env;

#[test]
fn test_pushup_session_end_to_end() {
    let mut tracker = common::default_tracker();
    let mut poses = SyntheticPoseBuilder::new();
    let id = tracker.start_session(ExerciseType::Pushup).unwrap();
    assert_eq!(tracker.active_id(), Some(id));

    tracker.advance(&poses.pushup(175.0, 175.0)).unwrap();
    for _ in 0..35 {
        tracker.advance(&poses.pushup(85.0, 175.0)).unwrap();
        tracker.advance(&poses.pushup(175.0, 175.0)).unwrap();
    }
    assert_eq!(tracker.exercise_session().unwrap().rep_count(), 35);

    let summary = tracker.end_session().unwrap();
    assert!(!tracker.is_active());
    assert_eq!(summary.id, id);
    assert_eq!(summary.rep_count, 35);
    assert!((summary.performance_value - 35.0).abs() < f64::EPSILON);
    assert_eq!(summary.score, 50);
    assert_eq!(summary.form_score, 100);
    assert_eq!(summary.standard, ScoringStandard::Linear);
    assert!(summary.distance_meters.is_none());
    // 71 frames at 33 ms
    assert!((summary.session_duration_secs - 2.31).abs() < 1e-9);
}

#[test]
fn test_summary_serializes_for_sync() {
    let mut tracker = common::default_tracker();
    let mut poses = SyntheticPoseBuilder::new();
    tracker.start_session(ExerciseType::Pullup).unwrap();
    tracker.advance(&poses.pullup(PullupFrame::hang())).unwrap();
    tracker.advance(&poses.pullup(PullupFrame::top())).unwrap();
    tracker.advance(&poses.pullup(PullupFrame::hang())).unwrap();

    let summary = tracker.end_session().unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["exercise_type"], "pullup");
    assert_eq!(json["rep_count"], 1);
    assert_eq!(json["standard"], "linear");
    assert_eq!(json["score"], 5);
    assert_eq!(json["form_score"], 100);

    let parsed: WorkoutSummary = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, summary);
}

#[test]
fn test_faulted_reps_lower_form_score() {
    let mut tracker = common::default_tracker();
    let mut poses = SyntheticPoseBuilder::new();
    tracker.start_session(ExerciseType::Situp).unwrap();

    tracker.advance(&poses.situp(SitupFrame::down())).unwrap();
    tracker
        .advance(&poses.situp(SitupFrame::up().hands_forward()))
        .unwrap();
    tracker.advance(&poses.situp(SitupFrame::down())).unwrap();
    tracker.advance(&poses.situp(SitupFrame::up())).unwrap();

    let summary = tracker.end_session().unwrap();
    assert_eq!(summary.rep_count, 1);
    assert_eq!(summary.rejected_reps, 1);
    assert_eq!(summary.form_score, 90);
}

#[test]
fn test_sessions_run_back_to_back() {
    let mut tracker = common::default_tracker();
    let mut poses = SyntheticPoseBuilder::new();

    let first = tracker.start_session(ExerciseType::Pushup).unwrap();
    tracker.end_session().unwrap();
    let second = tracker.start_session(ExerciseType::Pullup).unwrap();
    assert_ne!(first, second);
    assert_eq!(tracker.active_exercise(), Some(ExerciseType::Pullup));
    assert!(tracker.run_session().is_none());

    let event = tracker.advance(&poses.pullup(PullupFrame::hang())).unwrap();
    assert!(matches!(event, RepEvent::PhaseChanged { .. }));
}

#[test]
fn test_run_updates_rejected_for_exercise() {
    let mut tracker = common::default_tracker();
    tracker.start_session(ExerciseType::Situp).unwrap();
    assert_eq!(
        tracker.tick().unwrap_err().code,
        ErrorCode::InvalidSessionState
    );
    assert_eq!(
        tracker.record_pace(6.0).unwrap_err().code,
        ErrorCode::InvalidSessionState
    );
    assert!(tracker.is_active());
}

#[test]
#[serial]
fn test_tracker_from_env() {
    env::set_var("GRADING_SCORING_STANDARD", "apft");
    env::set_var("GRADING_PUSHUP_BENT_ANGLE", "100");
    let tracker = WorkoutTracker::from_env();
    env::remove_var("GRADING_SCORING_STANDARD");
    env::remove_var("GRADING_PUSHUP_BENT_ANGLE");

    let tracker = tracker.unwrap();
    assert_eq!(tracker.config().scoring_standard, ScoringStandard::ApftTable);
    assert!((tracker.config().pushup.bent_elbow_angle - 100.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_invalid_env_config_rejected() {
    env::set_var("GRADING_SITUP_UP_ANGLE", "170");
    let result = WorkoutTracker::from_env();
    env::remove_var("GRADING_SITUP_UP_ANGLE");

    assert_eq!(result.unwrap_err().code, ErrorCode::ConfigInvalid);
}
