// ABOUTME: Main library entry point for the readiness grading engine
// ABOUTME: Session control, keep-latest sample ingestion, logging setup and re-exports of the grading crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # PT Readiness
//!
//! Counts push-ups, pull-ups and sit-ups from a body-landmark stream, grades a
//! timed two-mile run from a clock and position stream, and converts the
//! result into a 0-100 readiness score.
//!
//! ## Architecture
//!
//! - **`readiness-core`**: errors, constants, configuration and pose data contracts
//! - **`readiness-grading`**: geometry, visibility gate, exercise policies,
//!   repetition state machine, run tracker and scoring engine
//! - **this crate**: [`session::WorkoutTracker`], [`ingest`] and [`logging`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pt_readiness::errors::AppResult;
//! use pt_readiness::models::{ExerciseType, PoseSample};
//! use pt_readiness::session::WorkoutTracker;
//!
//! fn grade(frames: &[PoseSample]) -> AppResult<u8> {
//!     let mut tracker = WorkoutTracker::from_env()?;
//!     tracker.start_session(ExerciseType::Pushup)?;
//!     for frame in frames {
//!         tracker.advance(frame)?;
//!     }
//!     Ok(tracker.end_session()?.score)
//! }
//! ```

/// Keep-latest sample feed and async tracking loop
pub mod ingest;

/// Structured logging setup
pub mod logging;

/// Host-facing session control
pub mod session;

pub use readiness_core::{config, constants, errors, models};
pub use readiness_grading::{geometry, policy, repetition, run, scoring, visibility};

pub use session::{WorkoutSummary, WorkoutTracker};
