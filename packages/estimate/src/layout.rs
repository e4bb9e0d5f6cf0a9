//! Panel layout estimation from a gross roof area.

use solar_scan_estimate_models::{PanelLayout, RegionConfig};

/// Estimates how many panels fit on a roof and what they produce.
///
/// `usable = area * usable_area_fraction`, panels are counted as whole
/// units of the configured panel footprint, and first-year yield is
/// `kWp * yield_factor * performance_ratio`.
///
/// Zero, negative or non-finite areas yield an empty layout.
#[must_use]
pub fn estimate_panel_layout(roof_area_m2: f64, config: &RegionConfig) -> PanelLayout {
    if !roof_area_m2.is_finite() || roof_area_m2 <= 0.0 {
        return PanelLayout::empty();
    }

    let usable_area_m2 = (roof_area_m2 * config.usable_area_fraction).max(0.0);
    let panel_count = whole_panels(usable_area_m2, config.panel_area_m2());
    let system_kwp = (f64::from(panel_count) * config.panel_wattage_w / 1_000.0).max(0.0);
    let annual_kwh =
        (system_kwp * config.yield_factor_kwh_per_kwp * config.performance_ratio).max(0.0);

    log::debug!(
        "Layout for {roof_area_m2:.1} m² roof: {usable_area_m2:.1} m² usable, \
         {panel_count} panels, {system_kwp:.2} kWp, {annual_kwh:.0} kWh/yr"
    );

    PanelLayout {
        usable_area_m2,
        panel_count,
        system_kwp,
        annual_kwh,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn whole_panels(usable_area_m2: f64, panel_area_m2: f64) -> u32 {
    if !panel_area_m2.is_finite() || panel_area_m2 <= 0.0 {
        return 0;
    }

    let count = (usable_area_m2 / panel_area_m2).floor();
    if !count.is_finite() || count <= 0.0 {
        0
    } else if count >= u32::MAX as f64 {
        u32::MAX
    } else {
        count as u32
    }
}
