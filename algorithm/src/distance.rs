// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::Duration;
use common::{error::RecorderError, position::GeoPoint};

/// Mean diameter of the earth in kilometers.
pub const EARTH_DIAMETER_KM: f64 = 12742.0;

/// Conversion factor from kilometers to miles.
pub const MILES_PER_KM: f64 = 0.621371;

/// Calculates the great-circle distance in miles between two geographic positions.
///
/// Uses the haversine formula on a spherical earth. The result is always
/// non-negative, symmetric in its arguments and exactly `0.0` for identical
/// points.
///
/// # Parameters
/// - `a`: Reference to the first geographic position.
/// - `b`: Reference to the second geographic position.
///
/// # Returns
/// The distance between `a` and `b` in miles as a `f64`.
///
/// # Notes
/// - The function expects longitude and latitude values in **degrees**.
/// - Non-finite input yields a non-finite result, callers validate first.
pub fn calculate_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let p = std::f64::consts::PI / 180.0;
    let a_term = 0.5 - ((b.latitude - a.latitude) * p).cos() / 2.0
        + (a.latitude * p).cos()
            * (b.latitude * p).cos()
            * (1.0 - ((b.longitude - a.longitude) * p).cos())
            / 2.0;
    // Rounding can push the term a hair below zero for identical points.
    let a_term = a_term.clamp(0.0, 1.0);
    EARTH_DIAMETER_KM * a_term.sqrt().asin() * MILES_PER_KM
}

/// Sums the distances between consecutive points of a path.
///
/// Returns `0.0` for paths with less than two points.
pub fn path_distance(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| calculate_distance(&pair[0], &pair[1]))
        .sum()
}

/// Computes the pace in minutes per mile.
///
/// # Errors
/// - [`RecorderError::DegenerateRun`] if `distance` is zero, pace is undefined then.
/// - [`RecorderError::InvalidTimestamp`] if `elapsed` is negative. The
///   reported gap is rounded up to whole milliseconds, so it is never `0`.
pub fn pace_minutes_per_mile(elapsed: Duration, distance: f64) -> Result<f64, RecorderError> {
    if elapsed < Duration::zero() {
        let behind = -elapsed;
        return Err(RecorderError::InvalidTimestamp(
            (behind - Duration::nanoseconds(1)).num_milliseconds() + 1,
        ));
    }
    if distance <= 0.0 {
        return Err(RecorderError::DegenerateRun);
    }
    let elapsed_seconds = elapsed.num_milliseconds() as f64 / 1000.0;
    Ok((elapsed_seconds / 60.0) / distance)
}
