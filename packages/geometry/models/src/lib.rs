#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic value types for roof outlines.
//!
//! A roof outline is an ordered list of [`GeoPoint`] vertices traced on a
//! map. The list is implicitly closed: the last vertex connects back to the
//! first, whether or not the caller repeats the first vertex at the end.

use serde::{Deserialize, Serialize};

/// A single polygon vertex in degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point from a latitude/longitude pair.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Length and label anchor for one polygon edge `P[i] -> P[(i + 1) % n]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMeasurement {
    /// Index of the edge's starting vertex.
    pub index: usize,
    /// Edge length in meters.
    pub length_m: f64,
    /// Point where the dimension label is drawn.
    pub midpoint: GeoPoint,
}

/// Every measurement the roof scanner shows for a traced outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonMeasurement {
    /// Gross footprint area in square meters.
    pub area_m2: f64,
    /// Sum of all edge lengths in meters, including sub-meter edges.
    pub perimeter_m: f64,
    /// One length per vertex, in vertex order.
    pub edge_lengths_m: Vec<f64>,
    /// Edges long enough to carry an on-map dimension label.
    pub labels: Vec<EdgeMeasurement>,
}

impl PolygonMeasurement {
    /// Measurement of an outline that has no area (fewer than three usable
    /// vertices).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            area_m2: 0.0,
            perimeter_m: 0.0,
            edge_lengths_m: Vec::new(),
            labels: Vec::new(),
        }
    }
}
