// ABOUTME: Integration tests for the scoring engine across every exercise and standard
// ABOUTME: Checks bounds, monotonicity, anchor values and custom curve validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pt_readiness::config::ScoringStandard;
use pt_readiness::errors::ErrorCode;
use pt_readiness::models::ExerciseType;
use pt_readiness::scoring::{format_score_display, score, score_with, Interpolation, ScoreCurve};

const STANDARDS: [ScoringStandard; 2] = [ScoringStandard::Linear, ScoringStandard::ApftTable];
const ALL: [ExerciseType; 4] = [
    ExerciseType::Pushup,
    ExerciseType::Pullup,
    ExerciseType::Situp,
    ExerciseType::Run,
];

#[test]
fn test_scores_are_monotonic() {
    for standard in STANDARDS {
        for exercise in ALL {
            let mut previous: Option<u8> = None;
            for step in 0..=2400 {
                let value = f64::from(step) * 0.5;
                let points = score_with(exercise, value, standard);
                if let Some(prev) = previous {
                    if exercise.higher_is_better() {
                        assert!(points >= prev, "{exercise} {standard} dropped at {value}");
                    } else {
                        assert!(points <= prev, "{exercise} {standard} rose at {value}");
                    }
                }
                previous = Some(points);
            }
        }
    }
}

#[test]
fn test_total_over_hostile_input() {
    for standard in STANDARDS {
        for exercise in ALL {
            for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -5.0, 1e12] {
                assert!(score_with(exercise, value, standard) <= 100);
            }
            assert_eq!(score_with(exercise, f64::NAN, standard), 0);
        }
    }
}

#[test]
fn test_canonical_anchor_points() {
    assert_eq!(score(ExerciseType::Pushup, 10.0), 0);
    assert_eq!(score(ExerciseType::Pushup, 35.0), 50);
    assert_eq!(score(ExerciseType::Pushup, 60.0), 100);
    assert_eq!(score(ExerciseType::Pushup, 75.0), 100);
    assert_eq!(score(ExerciseType::Pullup, 10.0), 50);
    assert_eq!(score(ExerciseType::Situp, 47.0), 50);
    assert_eq!(score(ExerciseType::Run, 780.0), 100);
    assert_eq!(score(ExerciseType::Run, 1200.0), 0);
    assert_eq!(score(ExerciseType::Run, 1500.0), 0);
}

#[test]
fn test_display_strings() {
    let points = score(ExerciseType::Pushup, 48.0);
    assert_eq!(points, 76);
    assert_eq!(format_score_display(48, points), "48 reps → 76 points");
}

#[test]
fn test_custom_curve() {
    let curve = ScoreCurve::new(
        vec![(40.0, 100.0), (0.0, 0.0), (20.0, 70.0)],
        Interpolation::Linear,
    )
    .unwrap();
    assert_eq!(curve.anchors().first(), Some(&(0.0, 0.0)));
    assert_eq!(curve.evaluate(10.0), 35);
    assert_eq!(curve.evaluate(30.0), 85);

    let not_monotonic = ScoreCurve::new(
        vec![(0.0, 0.0), (10.0, 80.0), (20.0, 60.0)],
        Interpolation::Linear,
    );
    assert_eq!(not_monotonic.unwrap_err().code, ErrorCode::InvalidInput);
    assert!(ScoreCurve::new(vec![(0.0, 0.0)], Interpolation::Linear).is_err());
    assert!(ScoreCurve::new(vec![(0.0, 0.0), (5.0, 120.0)], Interpolation::Linear).is_err());
}
