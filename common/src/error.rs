// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::{position::GeoPoint, recording::RecordingState};
use thiserror::Error;

/// Errors reported by the track recorder.
///
/// All of them are local to a single call and leave the recording session
/// untouched, so the caller can drop the offending fix or keep the finish
/// action disabled and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecorderError {
    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(GeoPoint),
    #[error("operation '{operation}' not allowed in state {state}")]
    InvalidState {
        operation: &'static str,
        state: RecordingState,
    },
    #[error("run has no distance, pace is undefined")]
    DegenerateRun,
    #[error("stop time lies {0} ms before the start time")]
    InvalidTimestamp(i64),
}
