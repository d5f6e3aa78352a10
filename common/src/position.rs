// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with longitude and latitude.
///
/// The `GeoPoint` struct is used to store a point on Earth in decimal
/// degrees. Longitude comes first, matching the `[lng, lat]` order used by
/// map libraries and GeoJSON.
///
/// # Fields
///
/// - `longitude` – The longitude in decimal degrees (positive for east, negative for west).
/// - `latitude` – The latitude in decimal degrees (positive for north, negative for south).
///
/// # Example
///
/// ```rust
/// use common::position::GeoPoint;
///
/// let point = GeoPoint::new(80.2093, 13.0570);
/// assert_eq!(point.coordinates(), [80.2093, 13.0570]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a new [`GeoPoint`] from longitude and latitude in decimal degrees.
    ///
    /// No range or finiteness check is done here. Whoever consumes the
    /// point decides whether it is usable, see [`GeoPoint::is_finite`].
    pub fn new(longitude: f64, latitude: f64) -> Self {
        GeoPoint {
            longitude,
            latitude,
        }
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Returns the point as a `[longitude, latitude]` pair.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(coordinates: [f64; 2]) -> Self {
        GeoPoint::new(coordinates[0], coordinates[1])
    }
}

/// A single position sample reported by a location sensor.
///
/// The timestamp is the moment the sample was taken in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub point: GeoPoint,
    pub timestamp: DateTime<Utc>,
}

impl Fix {
    /// Creates a new [`Fix`] for the given point and sample time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use common::position::{Fix, GeoPoint};
    ///
    /// let fix = Fix::new(GeoPoint::new(80.2093, 13.0570), chrono::Utc::now());
    /// assert_eq!(fix.point.latitude, 13.0570);
    /// ```
    pub fn new(point: GeoPoint, timestamp: DateTime<Utc>) -> Self {
        Fix { point, timestamp }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
