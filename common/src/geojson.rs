// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Minimal GeoJSON model used to hand the live location and the recorded
//! path to a map renderer.

use crate::position::GeoPoint;
use serde::{Deserialize, Serialize};

/// A GeoJSON geometry. Coordinates are `[longitude, latitude]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

/// A GeoJSON `Feature` with optional free-form properties.
///
/// # Example
///
/// ```rust
/// use common::{geojson::Feature, position::GeoPoint};
///
/// let feature = Feature::point(&GeoPoint::new(80.2093, 13.0570));
/// let json = serde_json::to_string(&feature).unwrap();
/// assert!(json.contains(r#""type":"Feature""#));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

impl Feature {
    /// Creates a `Point` feature for a single location, e.g. the live marker.
    pub fn point(point: &GeoPoint) -> Self {
        Feature {
            geometry: Geometry::Point {
                coordinates: point.coordinates(),
            },
            properties: None,
        }
    }

    /// Creates a `LineString` feature following the given path in order.
    pub fn line_string(path: &[GeoPoint]) -> Self {
        Feature {
            geometry: Geometry::LineString {
                coordinates: path.iter().map(GeoPoint::coordinates).collect(),
            },
            properties: None,
        }
    }

    /// Attaches properties to the feature, replacing any existing ones.
    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { features }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(collection: &FeatureCollection) -> serde_json::Result<String> {
        serde_json::to_string(collection)
    }
}
