// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use crate::distance::{calculate_distance, pace_minutes_per_mile};
use chrono::{DateTime, Utc};
use common::{
    error::RecorderError,
    geojson::Feature,
    position::GeoPoint,
    recording::{RecordingState, RecordingSummary},
};
use tracing::{debug, info};

/// One run capture from the start of the recording until it is stopped.
///
/// The session owns the recorded path and the distance accumulated along
/// it. The distance is advanced once per appended fix using the previous
/// last point, it is never recomputed over the whole path.
///
/// Every operation either succeeds or fails without touching the session.
///
/// # Example
///
/// ```rust
/// use algorithm::RecordingSession;
/// use chrono::{Duration, Utc};
/// use common::position::GeoPoint;
///
/// let start = Utc::now();
/// let mut session = RecordingSession::start(GeoPoint::new(80.2093, 13.0570), start).unwrap();
/// session.add_fix(GeoPoint::new(80.2103, 13.0580)).unwrap();
/// let summary = session.stop(start + Duration::seconds(30)).unwrap();
/// assert_eq!(summary.elapsed_seconds(), 30.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSession {
    path: Vec<GeoPoint>,
    start_timestamp: DateTime<Utc>,
    end_timestamp: Option<DateTime<Utc>>,
    total_distance: f64,
    state: RecordingState,
}

impl RecordingSession {
    /// Starts a new recording at `initial_fix`.
    ///
    /// The path starts with the given point, the distance with zero.
    ///
    /// # Errors
    /// [`RecorderError::InvalidCoordinate`] if the point isn't finite.
    pub fn start(initial_fix: GeoPoint, now: DateTime<Utc>) -> Result<Self, RecorderError> {
        ensure_finite(&initial_fix)?;
        info!(
            "Recording started at lon: {}, lat: {}",
            initial_fix.longitude, initial_fix.latitude
        );
        Ok(RecordingSession {
            path: vec![initial_fix],
            start_timestamp: now,
            end_timestamp: None,
            total_distance: 0.0,
            state: RecordingState::Recording,
        })
    }

    /// Appends a fix to the path and adds the distance from the previous
    /// last point to the total.
    ///
    /// # Errors
    /// - [`RecorderError::InvalidCoordinate`] if the point isn't finite.
    /// - [`RecorderError::InvalidState`] if the session is not recording.
    pub fn add_fix(&mut self, fix: GeoPoint) -> Result<(), RecorderError> {
        ensure_finite(&fix)?;
        self.ensure_recording("add_fix")?;
        let segment = self
            .path
            .last()
            .map_or(0.0, |last| calculate_distance(last, &fix));
        self.path.push(fix);
        self.total_distance += segment;
        debug!(
            "Fix {} added, segment {:.4} mi, total {:.4} mi",
            self.path.len(),
            segment,
            self.total_distance
        );
        Ok(())
    }

    /// Finishes the recording and derives the run summary.
    ///
    /// # Errors
    /// - [`RecorderError::InvalidState`] if the session is not recording.
    /// - [`RecorderError::InvalidTimestamp`] if `now` lies before the start.
    /// - [`RecorderError::DegenerateRun`] if no distance was covered. The
    ///   session keeps recording in that case.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Result<RecordingSummary, RecorderError> {
        self.ensure_recording("stop")?;
        let elapsed = now - self.start_timestamp;
        let pace = pace_minutes_per_mile(elapsed, self.total_distance)?;
        self.end_timestamp = Some(now);
        self.state = RecordingState::Finished;
        let summary = RecordingSummary {
            distance: self.total_distance,
            elapsed,
            pace,
        };
        info!("Recording finished: {}", summary);
        Ok(summary)
    }

    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    pub fn start_timestamp(&self) -> DateTime<Utc> {
        self.start_timestamp
    }

    pub fn end_timestamp(&self) -> Option<DateTime<Utc>> {
        self.end_timestamp
    }

    /// Distance covered so far in miles.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Most recent point of the path.
    pub fn last_point(&self) -> Option<&GeoPoint> {
        self.path.last()
    }

    /// The recorded path as GeoJSON `LineString` for the path overlay.
    pub fn to_feature(&self) -> Feature {
        Feature::line_string(&self.path)
    }

    fn ensure_recording(&self, operation: &'static str) -> Result<(), RecorderError> {
        if self.state != RecordingState::Recording {
            return Err(RecorderError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }
}

fn ensure_finite(point: &GeoPoint) -> Result<(), RecorderError> {
    if !point.is_finite() {
        return Err(RecorderError::InvalidCoordinate(*point));
    }
    Ok(())
}
