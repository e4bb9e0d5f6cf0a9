//! Reads roof outlines drawn on the map from `GeoJSON`.
//!
//! The map layer exports outlines as a `Polygon` geometry, usually wrapped
//! in a `Feature`. Only the exterior ring is used; holes (courtyards,
//! skylights) are ignored because usable area is already discounted by
//! the region's usable-area fraction.

use geojson::GeoJson;
use solar_scan_geometry_models::GeoPoint;

/// Errors from [`polygon_from_geojson`].
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// The text is not valid `GeoJSON`.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The geometry is not a polygon.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    /// A feature was found but carries no geometry.
    #[error("Feature has no geometry")]
    MissingGeometry,

    /// A feature collection without any features.
    #[error("FeatureCollection contains no features")]
    EmptyCollection,
}

/// Parses the exterior ring of the first polygon in a `GeoJSON` document.
///
/// Accepts a bare `Polygon` or `MultiPolygon` geometry, a `Feature`, or a
/// `FeatureCollection` (first feature wins). The explicit closing vertex
/// of the `GeoJSON` ring is kept, so it shows up as a zero-length edge.
///
/// # Errors
///
/// Returns an error if the text does not parse or does not describe a
/// polygon.
pub fn polygon_from_geojson(text: &str) -> Result<Vec<GeoPoint>, GeometryError> {
    let geometry = match text.parse::<GeoJson>()? {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature.geometry.ok_or(GeometryError::MissingGeometry)?,
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .next()
            .ok_or(GeometryError::EmptyCollection)?
            .geometry
            .ok_or(GeometryError::MissingGeometry)?,
    };

    let geo_geom: geo::Geometry<f64> = geometry.try_into()?;

    let polygon = match geo_geom {
        geo::Geometry::Polygon(polygon) => polygon,
        geo::Geometry::MultiPolygon(multi) => multi
            .0
            .into_iter()
            .next()
            .ok_or_else(|| GeometryError::UnsupportedGeometry("empty MultiPolygon".to_string()))?,
        other => {
            return Err(GeometryError::UnsupportedGeometry(
                geometry_name(&other).to_string(),
            ));
        }
    };

    let points: Vec<GeoPoint> = polygon
        .exterior()
        .coords()
        .map(|coord| GeoPoint::new(coord.y, coord.x))
        .collect();

    log::debug!("Parsed outline with {} vertices from GeoJSON", points.len());

    Ok(points)
}

const fn geometry_name(geometry: &geo::Geometry<f64>) -> &'static str {
    match geometry {
        geo::Geometry::Point(_) => "Point",
        geo::Geometry::LineString(_) => "LineString",
        geo::Geometry::MultiPoint(_) => "MultiPoint",
        geo::Geometry::MultiLineString(_) => "MultiLineString",
        geo::Geometry::GeometryCollection(_) => "GeometryCollection",
        _ => "Geometry",
    }
}
