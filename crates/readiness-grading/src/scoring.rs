// ABOUTME: Scoring engine converting final performance into a 0-100 readiness score
// ABOUTME: Per-exercise monotonic curves - canonical linear anchors plus APFT step tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Scoring Engine
//!
//! A [`ScoreCurve`] is an ordered list of `(performance, points)` anchors.
//! Repetition curves rise with performance; the run curve falls with elapsed
//! time. Every result is clamped to `[0, 100]`, so the engine is total over
//! all `f64` input including negatives, infinities and `NaN`.
//!
//! [`ScoringStandard::Linear`] is canonical. [`ScoringStandard::ApftTable`]
//! reproduces the APFT 17-21 male tables with closest-lower-anchor lookup.

use readiness_core::config::ScoringStandard;
use readiness_core::constants::scoring::{
    MAX_SCORE, MIN_SCORE, PULLUP_MAX_REPS, PULLUP_ZERO_REPS, PUSHUP_MAX_REPS, PUSHUP_ZERO_REPS,
    RUN_MAX_SCORE_SECONDS, RUN_ZERO_SCORE_SECONDS, SITUP_MAX_REPS, SITUP_ZERO_REPS,
};
use readiness_core::errors::{AppError, AppResult};
use readiness_core::models::ExerciseType;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How values between anchors are scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight line between neighbouring anchors
    Linear,
    /// Points of the closest anchor at or below the value
    Step,
}

/// Monotonic mapping from raw performance to points
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCurve {
    anchors: Cow<'static, [(f64, f64)]>,
    interpolation: Interpolation,
}

const LINEAR_PUSHUP: &[(f64, f64)] = &[(PUSHUP_ZERO_REPS, 0.0), (PUSHUP_MAX_REPS, 100.0)];
const LINEAR_PULLUP: &[(f64, f64)] = &[(PULLUP_ZERO_REPS, 0.0), (PULLUP_MAX_REPS, 100.0)];
const LINEAR_SITUP: &[(f64, f64)] = &[(SITUP_ZERO_REPS, 0.0), (SITUP_MAX_REPS, 100.0)];
const LINEAR_RUN: &[(f64, f64)] = &[
    (RUN_MAX_SCORE_SECONDS, 100.0),
    (RUN_ZERO_SCORE_SECONDS, 0.0),
];

#[rustfmt::skip]
const APFT_PUSHUP: &[(f64, f64)] = &[
    (0.0, 0.0), (1.0, 1.0), (2.0, 3.0), (3.0, 4.0), (4.0, 6.0),
    (5.0, 7.0), (6.0, 9.0), (7.0, 10.0), (8.0, 12.0), (9.0, 13.0),
    (10.0, 15.0), (11.0, 16.0), (12.0, 18.0), (13.0, 19.0), (14.0, 21.0),
    (15.0, 22.0), (16.0, 24.0), (17.0, 25.0), (18.0, 26.0), (19.0, 28.0),
    (20.0, 29.0), (21.0, 31.0), (22.0, 32.0), (23.0, 34.0), (24.0, 35.0),
    (25.0, 37.0), (26.0, 38.0), (27.0, 40.0), (28.0, 41.0), (29.0, 43.0),
    (30.0, 44.0), (31.0, 46.0), (32.0, 47.0), (33.0, 48.0), (34.0, 50.0),
    (35.0, 51.0), (36.0, 53.0), (37.0, 54.0), (38.0, 56.0), (39.0, 57.0),
    (40.0, 59.0), (41.0, 60.0), (42.0, 62.0), (43.0, 63.0), (44.0, 65.0),
    (45.0, 66.0), (46.0, 68.0), (47.0, 69.0), (48.0, 71.0), (49.0, 72.0),
    (50.0, 74.0), (51.0, 75.0), (52.0, 76.0), (53.0, 78.0), (54.0, 79.0),
    (55.0, 81.0), (56.0, 82.0), (57.0, 84.0), (58.0, 85.0), (59.0, 87.0),
    (60.0, 88.0), (61.0, 90.0), (62.0, 91.0), (63.0, 93.0), (64.0, 94.0),
    (65.0, 96.0), (66.0, 97.0), (67.0, 99.0), (68.0, 100.0),
];

#[rustfmt::skip]
const APFT_SITUP: &[(f64, f64)] = &[
    (0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0),
    (5.0, 5.0), (6.0, 6.0), (7.0, 7.0), (8.0, 8.0), (9.0, 9.0),
    (10.0, 10.0), (11.0, 11.0), (12.0, 12.0), (13.0, 13.0), (14.0, 14.0),
    (15.0, 15.0), (16.0, 16.0), (17.0, 17.0), (18.0, 18.0), (19.0, 19.0),
    (20.0, 20.0), (21.0, 21.0), (22.0, 22.0), (23.0, 23.0), (24.0, 24.0),
    (25.0, 25.0), (26.0, 26.0), (27.0, 27.0), (28.0, 28.0), (29.0, 29.0),
    (30.0, 30.0), (31.0, 31.0), (32.0, 32.0), (33.0, 33.0), (34.0, 34.0),
    (35.0, 35.0), (36.0, 36.0), (37.0, 37.0), (38.0, 38.0), (39.0, 39.0),
    (40.0, 40.0), (41.0, 41.0), (42.0, 42.0), (43.0, 43.0), (44.0, 44.0),
    (45.0, 45.0), (46.0, 46.0), (47.0, 47.0), (48.0, 48.0), (49.0, 49.0),
    (50.0, 50.0), (51.0, 52.0), (52.0, 58.0), (53.0, 60.0), (54.0, 62.0),
    (55.0, 64.0), (56.0, 66.0), (57.0, 68.0), (58.0, 70.0), (59.0, 72.0),
    (60.0, 74.0), (61.0, 76.0), (62.0, 78.0), (63.0, 80.0), (64.0, 82.0),
    (65.0, 84.0), (66.0, 86.0), (67.0, 88.0), (68.0, 90.0), (69.0, 91.0),
    (70.0, 92.0), (71.0, 93.0), (72.0, 94.0), (73.0, 95.0), (74.0, 96.0),
    (75.0, 97.0), (76.0, 98.0), (77.0, 99.0), (78.0, 100.0),
];

#[rustfmt::skip]
const APFT_PULLUP: &[(f64, f64)] = &[
    (0.0, 0.0), (1.0, 4.0), (2.0, 8.0), (3.0, 12.0), (4.0, 16.0),
    (5.0, 20.0), (6.0, 24.0), (7.0, 28.0), (8.0, 32.0), (9.0, 36.0),
    (10.0, 40.0), (11.0, 44.0), (12.0, 48.0), (13.0, 52.0), (14.0, 56.0),
    (15.0, 60.0), (16.0, 64.0), (17.0, 68.0), (18.0, 72.0), (19.0, 76.0),
    (20.0, 80.0), (21.0, 84.0), (22.0, 88.0), (23.0, 92.0), (24.0, 96.0),
    (25.0, 100.0),
];

#[rustfmt::skip]
const APFT_RUN: &[(f64, f64)] = &[
    (660.0, 100.0), (666.0, 99.0), (672.0, 98.0), (678.0, 96.0),
    (684.0, 95.0), (690.0, 94.0), (696.0, 93.0), (702.0, 92.0),
    (708.0, 91.0), (714.0, 89.0), (720.0, 88.0), (726.0, 87.0),
    (732.0, 86.0), (738.0, 85.0), (744.0, 84.0), (750.0, 82.0),
    (756.0, 81.0), (762.0, 80.0), (768.0, 79.0), (774.0, 78.0),
    (780.0, 76.0), (786.0, 75.0), (792.0, 74.0), (798.0, 73.0),
    (804.0, 72.0), (810.0, 71.0), (816.0, 69.0), (822.0, 68.0),
    (828.0, 67.0), (834.0, 66.0), (840.0, 64.0), (846.0, 63.0),
    (852.0, 62.0), (858.0, 61.0), (864.0, 60.0), (870.0, 59.0),
    (876.0, 57.0), (882.0, 56.0), (888.0, 55.0), (894.0, 54.0),
    (900.0, 53.0), (906.0, 51.0), (912.0, 50.0), (918.0, 49.0),
    (924.0, 48.0), (930.0, 47.0), (936.0, 45.0), (942.0, 44.0),
    (948.0, 43.0), (954.0, 42.0), (960.0, 41.0), (966.0, 39.0),
    (972.0, 38.0), (978.0, 37.0), (984.0, 36.0), (990.0, 35.0),
    (996.0, 33.0), (1002.0, 32.0), (1008.0, 31.0), (1014.0, 30.0),
    (1020.0, 29.0), (1026.0, 28.0), (1032.0, 27.0), (1038.0, 26.0),
    (1044.0, 24.0), (1050.0, 23.0), (1056.0, 22.0), (1062.0, 21.0),
    (1068.0, 20.0), (1074.0, 19.0), (1080.0, 18.0), (1086.0, 16.0),
    (1092.0, 15.0), (1098.0, 14.0), (1104.0, 13.0), (1110.0, 12.0),
    (1116.0, 11.0), (1122.0, 10.0), (1128.0, 9.0), (1134.0, 8.0),
    (1140.0, 6.0), (1146.0, 5.0), (1152.0, 4.0), (1158.0, 3.0),
    (1164.0, 2.0), (1170.0, 0.0),
];

impl ScoreCurve {
    /// Build a custom curve
    ///
    /// Anchors are sorted by performance. Points must stay within `[0, 100]`
    /// and move in one direction only.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if the table is empty, a linear table has fewer
    /// than two anchors, a value is not finite, two anchors share a
    /// performance value, or points are not monotonic; `VALUE_OUT_OF_RANGE`
    /// if points fall outside `[0, 100]`
    pub fn new(mut anchors: Vec<(f64, f64)>, interpolation: Interpolation) -> AppResult<Self> {
        let minimum = match interpolation {
            Interpolation::Linear => 2,
            Interpolation::Step => 1,
        };
        if anchors.len() < minimum {
            return Err(AppError::invalid_input(format!(
                "{interpolation:?} score curve needs at least {minimum} anchors"
            )));
        }
        if anchors
            .iter()
            .any(|(performance, points)| !performance.is_finite() || !points.is_finite())
        {
            return Err(AppError::invalid_input("score curve anchors must be finite"));
        }
        if anchors
            .iter()
            .any(|(_, points)| !(f64::from(MIN_SCORE)..=f64::from(MAX_SCORE)).contains(points))
        {
            return Err(AppError::out_of_range(
                "score curve points must lie within [0, 100]",
            ));
        }

        anchors.sort_by(|a, b| a.0.total_cmp(&b.0));
        if anchors.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(AppError::invalid_input(
                "score curve anchors must have distinct performance values",
            ));
        }
        let rising = anchors.windows(2).all(|w| w[0].1 <= w[1].1);
        let falling = anchors.windows(2).all(|w| w[0].1 >= w[1].1);
        if !(rising || falling) {
            return Err(AppError::invalid_input("score curve points must be monotonic"));
        }

        Ok(Self {
            anchors: Cow::Owned(anchors),
            interpolation,
        })
    }

    const fn builtin(anchors: &'static [(f64, f64)], interpolation: Interpolation) -> Self {
        Self {
            anchors: Cow::Borrowed(anchors),
            interpolation,
        }
    }

    /// Built-in curve for an exercise under a standard
    #[must_use]
    pub const fn for_exercise(exercise: ExerciseType, standard: ScoringStandard) -> Self {
        match standard {
            ScoringStandard::Linear => {
                let anchors = match exercise {
                    ExerciseType::Pushup => LINEAR_PUSHUP,
                    ExerciseType::Pullup => LINEAR_PULLUP,
                    ExerciseType::Situp => LINEAR_SITUP,
                    ExerciseType::Run => LINEAR_RUN,
                };
                Self::builtin(anchors, Interpolation::Linear)
            }
            ScoringStandard::ApftTable => {
                let anchors = match exercise {
                    ExerciseType::Pushup => APFT_PUSHUP,
                    ExerciseType::Pullup => APFT_PULLUP,
                    ExerciseType::Situp => APFT_SITUP,
                    ExerciseType::Run => APFT_RUN,
                };
                Self::builtin(anchors, Interpolation::Step)
            }
        }
    }

    /// Anchors in ascending performance order
    #[must_use]
    pub fn anchors(&self) -> &[(f64, f64)] {
        &self.anchors
    }

    /// Interpolation mode
    #[must_use]
    pub const fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Score a performance value
    ///
    /// Values outside the table take the nearest end anchor's points; `NaN`
    /// scores zero.
    #[must_use]
    pub fn evaluate(&self, performance: f64) -> u8 {
        if performance.is_nan() {
            return MIN_SCORE;
        }
        let anchors = self.anchors();
        let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (anchors.first(), anchors.last())
        else {
            return MIN_SCORE;
        };
        if performance <= first_x {
            return to_points(first_y);
        }
        if performance >= last_x {
            return to_points(last_y);
        }

        // first anchor is <= performance, so the index is at least 1
        let upper = anchors.partition_point(|(x, _)| *x <= performance);
        let (x0, y0) = anchors[upper - 1];
        match self.interpolation {
            Interpolation::Step => to_points(y0),
            Interpolation::Linear => {
                let (x1, y1) = anchors[upper];
                to_points((performance - x0) * (y1 - y0) / (x1 - x0) + y0)
            }
        }
    }
}

fn to_points(raw: f64) -> u8 {
    raw.round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Score with the canonical linear curves
#[must_use]
pub fn score(exercise: ExerciseType, performance: f64) -> u8 {
    score_with(exercise, performance, ScoringStandard::Linear)
}

/// Score with the curves of a chosen standard
#[must_use]
pub fn score_with(exercise: ExerciseType, performance: f64, standard: ScoringStandard) -> u8 {
    ScoreCurve::for_exercise(exercise, standard).evaluate(performance)
}

/// `"48 reps → 68 points"`
#[must_use]
pub fn format_score_display(reps: u32, score: u8) -> String {
    format!("{reps} reps → {score} points")
}

/// `"15:30 → 66 points"`
#[must_use]
pub fn format_run_score_display(elapsed_seconds: u32, score: u8) -> String {
    format!(
        "{}:{:02} → {score} points",
        elapsed_seconds / 60,
        elapsed_seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_pushup_formula() {
        assert_eq!(score(ExerciseType::Pushup, 60.0), 100);
        assert_eq!(score(ExerciseType::Pushup, 75.0), 100);
        assert_eq!(score(ExerciseType::Pushup, 35.0), 50);
        assert_eq!(score(ExerciseType::Pushup, 10.0), 0);
        assert_eq!(score(ExerciseType::Pushup, 0.0), 0);
        assert_eq!(score(ExerciseType::Pushup, -4.0), 0);
    }

    #[test]
    fn test_linear_pullup_and_situp() {
        assert_eq!(score(ExerciseType::Pullup, 7.0), 35);
        assert_eq!(score(ExerciseType::Pullup, 20.0), 100);
        // (47 - 16) * 100 / 62 = 50
        assert_eq!(score(ExerciseType::Situp, 47.0), 50);
        // (40 - 16) * 100 / 62 = 38.7
        assert_eq!(score(ExerciseType::Situp, 40.0), 39);
        assert_eq!(score(ExerciseType::Situp, 78.0), 100);
    }

    #[test]
    fn test_run_scoring_scenario() {
        assert_eq!(score(ExerciseType::Run, 780.0), 100);
        assert_eq!(score(ExerciseType::Run, 990.0), 50);
        assert_eq!(score(ExerciseType::Run, 1200.0), 0);
        assert_eq!(score(ExerciseType::Run, 600.0), 100);
        assert_eq!(score(ExerciseType::Run, 5000.0), 0);
    }

    #[test]
    fn test_scores_are_total() {
        for exercise in [
            ExerciseType::Pushup,
            ExerciseType::Pullup,
            ExerciseType::Situp,
            ExerciseType::Run,
        ] {
            for standard in [ScoringStandard::Linear, ScoringStandard::ApftTable] {
                for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1e300, 1e300] {
                    assert!(score_with(exercise, value, standard) <= 100);
                }
                assert_eq!(score_with(exercise, f64::NAN, standard), 0);
            }
        }
    }

    #[test]
    fn test_apft_tables() {
        let apft = ScoringStandard::ApftTable;
        assert_eq!(score_with(ExerciseType::Pushup, 48.0, apft), 71);
        assert_eq!(score_with(ExerciseType::Pushup, 48.9, apft), 71);
        assert_eq!(score_with(ExerciseType::Pushup, 80.0, apft), 100);
        assert_eq!(score_with(ExerciseType::Situp, 52.0, apft), 58);
        assert_eq!(score_with(ExerciseType::Pullup, 13.0, apft), 52);
        assert_eq!(score_with(ExerciseType::Run, 930.0, apft), 47);
        // closest lower time
        assert_eq!(score_with(ExerciseType::Run, 933.0, apft), 47);
        assert_eq!(score_with(ExerciseType::Run, 600.0, apft), 100);
        assert_eq!(score_with(ExerciseType::Run, 1300.0, apft), 0);
    }

    #[test]
    fn test_builtin_curves_are_valid() {
        for exercise in [
            ExerciseType::Pushup,
            ExerciseType::Pullup,
            ExerciseType::Situp,
            ExerciseType::Run,
        ] {
            for standard in [ScoringStandard::Linear, ScoringStandard::ApftTable] {
                let curve = ScoreCurve::for_exercise(exercise, standard);
                let rebuilt = ScoreCurve::new(curve.anchors().to_vec(), curve.interpolation());
                assert!(rebuilt.is_ok(), "{exercise} {standard}");
            }
        }
    }

    #[test]
    fn test_custom_curve_validation() {
        assert!(ScoreCurve::new(vec![(0.0, 0.0)], Interpolation::Linear).is_err());
        assert!(ScoreCurve::new(vec![(0.0, 0.0), (10.0, 120.0)], Interpolation::Linear).is_err());
        assert!(ScoreCurve::new(
            vec![(0.0, 0.0), (5.0, 80.0), (10.0, 40.0)],
            Interpolation::Linear
        )
        .is_err());
        assert!(ScoreCurve::new(vec![(5.0, 0.0), (5.0, 10.0)], Interpolation::Step).is_err());

        let curve =
            ScoreCurve::new(vec![(20.0, 100.0), (0.0, 0.0)], Interpolation::Linear).unwrap();
        assert_eq!(curve.anchors()[0], (0.0, 0.0));
        assert_eq!(curve.evaluate(5.0), 25);
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(format_score_display(48, 68), "48 reps → 68 points");
        assert_eq!(format_run_score_display(930, 66), "15:30 → 66 points");
        assert_eq!(format_run_score_display(545, 100), "9:05 → 100 points");
    }
}
