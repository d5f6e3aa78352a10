// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::serde::duration;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a run recording.
///
/// `Idle` means no recording exists yet. A recording is `Recording` from
/// its start until it gets stopped, after which it is `Finished` for good.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Finished,
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordingState::Idle => "Idle",
            RecordingState::Recording => "Recording",
            RecordingState::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// The result of a finished run.
///
/// # Fields
///
/// - `distance` – Total distance of the run in miles.
/// - `elapsed` – Time between start and stop of the recording.
/// - `pace` – Minutes per mile.
///
/// # Example
///
/// ```rust
/// use common::recording::RecordingSummary;
/// use chrono::Duration;
///
/// let summary = RecordingSummary {
///     distance: 3.1,
///     elapsed: Duration::minutes(31),
///     pace: 10.0,
/// };
/// assert_eq!(summary.elapsed_seconds(), 1860.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordingSummary {
    pub distance: f64,
    #[serde(with = "duration")]
    pub elapsed: Duration,
    pub pace: f64,
}

impl RecordingSummary {
    /// Returns the elapsed time in seconds with millisecond resolution.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.num_milliseconds() as f64 / 1000.0
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(summary: &RecordingSummary) -> serde_json::Result<String> {
        serde_json::to_string(summary)
    }
}

impl fmt::Display for RecordingSummary {
    /// Renders the summary the way it is shown once a run is finished,
    /// e.g. `3.10 mi in 00:31:00, pace 10:00 min/mi`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.elapsed.num_seconds();
        let pace_seconds = (self.pace * 60.0).round() as i64;
        write!(
            f,
            "{:.2} mi in {:02}:{:02}:{:02}, pace {}:{:02} min/mi",
            self.distance,
            total / 3600,
            (total % 3600) / 60,
            total % 60,
            pace_seconds / 60,
            pace_seconds % 60
        )
    }
}
