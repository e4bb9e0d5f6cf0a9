#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Footprint measurement for traced roof outlines.
//!
//! Area uses a local planar projection centred on the outline: degrees are
//! scaled to meters with a fixed meters-per-degree factor for latitude and
//! the same factor times `cos(latitude)` for longitude, and the shoelace
//! formula runs on the projected ring. Edge lengths use the haversine
//! great-circle distance.
//!
//! The planar projection is accurate for building-scale outlines (tens to a
//! few hundred meters). Outlines wider than [`PLANAR_APPROXIMATION_LIMIT_M`]
//! are still measured but log a warning, since the flat-earth error grows
//! with extent.
//!
//! Nothing here fails: fewer than three vertices, or any non-finite
//! coordinate, measures as zero.

pub mod format;
pub mod geojson_input;

use geo::{Area, BoundingRect, Coord, Distance, Haversine, LineString, Point, Polygon};
pub use solar_scan_geometry_models::{EdgeMeasurement, GeoPoint, PolygonMeasurement};

/// Meters spanned by one degree of latitude.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Edges shorter than this are treated as closing-segment duplicates and
/// get no on-map dimension label. They still count toward the perimeter.
pub const MIN_LABELED_EDGE_M: f64 = 1.0;

/// Widest outline (in meters, either axis) the planar projection is
/// trusted for before a warning is logged.
pub const PLANAR_APPROXIMATION_LIMIT_M: f64 = 2_000.0;

/// Area of the outline in square meters.
///
/// Returns `0.0` for fewer than three vertices or any non-finite
/// coordinate. The result does not depend on winding order or on which
/// vertex the list starts at.
#[must_use]
pub fn polygon_area(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    if !points.iter().all(GeoPoint::is_finite) {
        log::warn!(
            "Outline with {} vertices has non-finite coordinates; area treated as 0",
            points.len()
        );
        return 0.0;
    }

    let projected = project_local(points);

    if let Some(rect) = projected.bounding_rect() {
        let extent = rect.width().max(rect.height());
        if extent > PLANAR_APPROXIMATION_LIMIT_M {
            log::warn!(
                "Outline spans {extent:.0} m, beyond the {PLANAR_APPROXIMATION_LIMIT_M:.0} m \
                 planar approximation limit; area may be inaccurate"
            );
        }
    }

    let area = projected.unsigned_area();
    if area.is_finite() { area } else { 0.0 }
}

/// Projects the outline onto a local meter grid centred on its mean
/// latitude/longitude.
#[allow(clippy::cast_precision_loss)]
fn project_local(points: &[GeoPoint]) -> Polygon<f64> {
    let n = points.len() as f64;
    let origin_lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let origin_lon = points.iter().map(|p| p.lon).sum::<f64>() / n;

    let meters_per_deg_lon = METERS_PER_DEGREE_LAT * origin_lat.to_radians().cos();

    let ring: LineString<f64> = points
        .iter()
        .map(|p| Coord {
            x: (p.lon - origin_lon) * meters_per_deg_lon,
            y: (p.lat - origin_lat) * METERS_PER_DEGREE_LAT,
        })
        .collect();

    Polygon::new(ring, vec![])
}

/// Great-circle distance between two vertices in meters.
///
/// Non-finite endpoints measure as `0.0`.
#[must_use]
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return 0.0;
    }
    Haversine.distance(Point::new(a.lon, a.lat), Point::new(b.lon, b.lat))
}

/// Length of every edge `P[i] -> P[(i + 1) % n]` in meters.
///
/// The returned list has one entry per vertex. Outlines with fewer than
/// three vertices, or with any non-finite coordinate, have no edges.
#[must_use]
pub fn calculate_edge_lengths(points: &[GeoPoint]) -> Vec<f64> {
    if points.len() < 3 || !points.iter().all(GeoPoint::is_finite) {
        return Vec::new();
    }

    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| distance_m(*a, *b))
        .collect()
}

/// Sum of [`calculate_edge_lengths`].
#[must_use]
pub fn calculate_perimeter(points: &[GeoPoint]) -> f64 {
    calculate_edge_lengths(points).iter().sum()
}

/// Arithmetic mean of two vertices, used to anchor an edge's label.
#[must_use]
pub fn edge_midpoint(a: GeoPoint, b: GeoPoint) -> GeoPoint {
    GeoPoint::new(f64::midpoint(a.lat, b.lat), f64::midpoint(a.lon, b.lon))
}

/// Edges that get an on-map dimension label.
///
/// Skips edges shorter than [`MIN_LABELED_EDGE_M`], which are usually the
/// duplicate closing vertex of an explicitly closed ring.
#[must_use]
pub fn edge_labels(points: &[GeoPoint]) -> Vec<EdgeMeasurement> {
    calculate_edge_lengths(points)
        .into_iter()
        .enumerate()
        .filter(|(_, length_m)| *length_m >= MIN_LABELED_EDGE_M)
        .map(|(index, length_m)| EdgeMeasurement {
            index,
            length_m,
            midpoint: edge_midpoint(points[index], points[(index + 1) % points.len()]),
        })
        .collect()
}

/// Area, perimeter, edge lengths and labels for an outline in one pass.
#[must_use]
pub fn measure_polygon(points: &[GeoPoint]) -> PolygonMeasurement {
    if points.len() < 3 {
        return PolygonMeasurement::empty();
    }
    if !points.iter().all(GeoPoint::is_finite) {
        log::warn!(
            "Outline with {} vertices has non-finite coordinates; measured as empty",
            points.len()
        );
        return PolygonMeasurement::empty();
    }

    let edge_lengths_m = calculate_edge_lengths(points);
    let perimeter_m = edge_lengths_m.iter().sum();
    let area_m2 = polygon_area(points);
    let labels = edge_labels(points);

    log::debug!(
        "Measured outline: {} vertices, {area_m2:.1} m², perimeter {perimeter_m:.1} m, {} labeled edges",
        points.len(),
        labels.len()
    );

    PolygonMeasurement {
        area_m2,
        perimeter_m,
        edge_lengths_m,
        labels,
    }
}

/// Builds an axis-aligned rectangle of the given size (meters) with its
/// south-west corner at `origin`, wound counter-clockwise.
///
/// Handy for tests and for turning a known footprint size into an outline.
#[must_use]
pub fn rectangle(origin: GeoPoint, width_m: f64, height_m: f64) -> Vec<GeoPoint> {
    let dlat = height_m / METERS_PER_DEGREE_LAT;
    let dlon = width_m / (METERS_PER_DEGREE_LAT * origin.lat.to_radians().cos());

    vec![
        origin,
        GeoPoint::new(origin.lat, origin.lon + dlon),
        GeoPoint::new(origin.lat + dlat, origin.lon + dlon),
        GeoPoint::new(origin.lat + dlat, origin.lon),
    ]
}
