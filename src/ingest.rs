// ABOUTME: Keep-latest pose sample feed between a capture worker and the grading loop
// ABOUTME: Drops out-of-order samples at the boundary and drives an exercise session asynchronously
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Sample ingestion boundary
//!
//! The capture/pose pipeline runs on its own task and pushes samples through a
//! [`SampleSender`]. The channel holds one slot: if the grading loop falls
//! behind, older frames are overwritten and only the newest is graded.
//! Samples whose timestamp does not strictly increase never reach the core.

use readiness_core::errors::AppResult;
use readiness_core::models::PoseSample;
use readiness_grading::{ExerciseOutcome, ExerciseSession, RepEvent};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Producer half of the sample feed
#[derive(Debug)]
pub struct SampleSender {
    tx: watch::Sender<Option<PoseSample>>,
    last_timestamp: Option<Duration>,
}

/// Consumer half of the sample feed
#[derive(Debug)]
pub struct SampleReceiver {
    rx: watch::Receiver<Option<PoseSample>>,
}

/// Create a connected size-1 keep-latest feed
#[must_use]
pub fn sample_feed() -> (SampleSender, SampleReceiver) {
    let (tx, rx) = watch::channel(None);
    (
        SampleSender {
            tx,
            last_timestamp: None,
        },
        SampleReceiver { rx },
    )
}

impl SampleSender {
    /// Publish a sample, replacing any sample not yet consumed
    ///
    /// Returns `false` when the sample was dropped because its timestamp does
    /// not move forward, or when the receiver is gone.
    pub fn send(&mut self, sample: PoseSample) -> bool {
        if let Some(last) = self.last_timestamp {
            if sample.timestamp <= last {
                warn!(
                    timestamp_ms = u64::try_from(sample.timestamp.as_millis()).unwrap_or(u64::MAX),
                    last_ms = u64::try_from(last.as_millis()).unwrap_or(u64::MAX),
                    "dropping out-of-order pose sample"
                );
                return false;
            }
        }
        let timestamp = sample.timestamp;
        if self.tx.send(Some(sample)).is_err() {
            debug!("sample receiver closed");
            return false;
        }
        self.last_timestamp = Some(timestamp);
        true
    }

    /// Whether the grading side has hung up
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl SampleReceiver {
    /// Wait for the newest unseen sample; `None` once the sender is dropped and drained
    pub async fn recv(&mut self) -> Option<PoseSample> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(sample) = self.rx.borrow_and_update().clone() {
                return Some(sample);
            }
        }
    }
}

/// Drive `session` from the feed until the sender closes, then finish it
///
/// Every event other than `NoChange` is forwarded on `events`. A dropped
/// event receiver does not stop grading.
///
/// # Errors
///
/// Returns `INVALID_SESSION_STATE` if `session` was already finished
pub async fn track_exercise(
    mut receiver: SampleReceiver,
    mut session: ExerciseSession,
    events: mpsc::Sender<RepEvent>,
) -> AppResult<ExerciseOutcome> {
    while let Some(sample) = receiver.recv().await {
        let event = session.advance(&sample)?;
        if event.is_noteworthy() && events.send(event).await.is_err() {
            debug!("rep event receiver closed, continuing without feedback");
        }
    }
    session.finish()
}
