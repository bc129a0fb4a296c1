// ABOUTME: Grading algorithms - geometry, visibility gate, policies, rep state machine, run tracker, scoring
// ABOUTME: Pure, synchronous and single-owner; consumes pose samples and GPS fixes, emits events and scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Readiness Grading
//!
//! Data flow for landmark exercises:
//!
//! ```text
//! PoseSample -> visibility gate -> geometry -> policy predicates -> ExerciseSession -> RepEvent
//!                                                                        |
//!                                                          finish() -> scoring -> 0..=100
//! ```
//!
//! The run takes a parallel path through [`run::RunSession`]. Nothing in this
//! crate spawns threads or holds external resources; a session is driven by
//! exactly one owner, one sample at a time.

/// Angle and distance calculator
pub mod geometry;
/// Per-exercise thresholds and predicates
pub mod policy;
/// Generic repetition state machine
pub mod repetition;
/// Timed run tracker
pub mod run;
/// Score curves
pub mod scoring;
/// Visibility gate
pub mod visibility;

pub use policy::{ExercisePolicy, FaultSeverity, FormFault, PolicyKind, VisibilityLossRule};
pub use repetition::{ExerciseOutcome, ExerciseSession, RepEvent, RepState};
pub use run::{GeoFix, RunEvent, RunOutcome, RunSession};
pub use scoring::{score, score_with, ScoreCurve};
