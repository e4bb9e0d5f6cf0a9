//! Human-readable distance and area strings for dimension labels.
//!
//! Values scale to the larger unit once they get unwieldy. Output is for
//! display only; calculations always work on raw meters.

/// Distances at or above this many meters are shown in kilometers.
const KILOMETER_THRESHOLD_M: f64 = 1_000.0;

/// Areas at or above this many square meters are shown in hectares.
const HECTARE_THRESHOLD_M2: f64 = 10_000.0;

/// Formats a distance, e.g. `"31.6 m"` or `"1.25 km"`.
///
/// Non-finite values render as `"0.0 m"`.
#[must_use]
pub fn format_distance(meters: f64) -> String {
    let meters = if meters.is_finite() { meters } else { 0.0 };

    if meters.abs() >= KILOMETER_THRESHOLD_M {
        format!("{:.2} km", meters / 1_000.0)
    } else {
        format!("{meters:.1} m")
    }
}

/// Formats an area, e.g. `"998.6 m²"` or `"1.20 ha"`.
///
/// Non-finite values render as `"0.0 m²"`.
#[must_use]
pub fn format_area(square_meters: f64) -> String {
    let square_meters = if square_meters.is_finite() {
        square_meters
    } else {
        0.0
    };

    if square_meters.abs() >= HECTARE_THRESHOLD_M2 {
        format!("{:.2} ha", square_meters / 10_000.0)
    } else {
        format!("{square_meters:.1} m²")
    }
}
