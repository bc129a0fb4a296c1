// ABOUTME: Benchmark fixtures producing full 33-landmark pose model output
// ABOUTME: Deterministic push-up streams sized for per-frame and per-session measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic pose streams in the pose model's indexed layout.

use pt_readiness::models::PoseSample;
use std::f64::consts::TAU;
use std::time::Duration;

/// Stream lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum StreamLength {
    /// Ten seconds of capture at 30 fps
    Short,
    /// Two minutes of capture at 30 fps, one full push-up event
    Event,
}

impl StreamLength {
    #[must_use]
    pub const fn frames(self) -> usize {
        match self {
            Self::Short => 300,
            Self::Event => 3600,
        }
    }
}

const FRAME_INTERVAL: Duration = Duration::from_millis(33);
const FRAMES_PER_REP: usize = 40;

/// Elbow angle over one rep: extended, down to 80 degrees, back up
fn elbow_at(frame: usize) -> f64 {
    let phase = (frame % FRAMES_PER_REP) as f64 / FRAMES_PER_REP as f64;
    let depth = (phase * TAU).cos().mul_add(-0.5, 0.5);
    depth.mul_add(-95.0, 175.0)
}

/// One frame of model output with a straight body and the given elbow angle
#[must_use]
pub fn pushup_frame(index: usize, elbow_degrees: f64) -> PoseSample {
    let mut points = [[0.5, 0.5, 0.0, 0.2]; 33];
    let e = elbow_degrees.to_radians();
    for (offset, shoulder, elbow, wrist, hip, knee) in
        [(0.0, 11, 13, 15, 23, 25), (0.02, 12, 14, 16, 24, 26)]
    {
        points[shoulder] = [0.3 + offset, 0.5, 0.0, 0.97];
        points[elbow] = [0.3 + offset, 0.6, 0.0, 0.96];
        points[wrist] = [
            0.1f64.mul_add(e.sin(), 0.3 + offset),
            0.1f64.mul_add(-e.cos(), 0.6),
            0.0,
            0.95,
        ];
        points[hip] = [0.6 + offset, 0.5, 0.0, 0.93];
        points[knee] = [0.8 + offset, 0.5, 0.0, 0.9];
    }
    PoseSample::from_indexed(FRAME_INTERVAL * index as u32, &points)
}

/// Continuous push-up stream
#[must_use]
pub fn pushup_stream(length: StreamLength) -> Vec<PoseSample> {
    (0..length.frames())
        .map(|index| pushup_frame(index, elbow_at(index)))
        .collect()
}
