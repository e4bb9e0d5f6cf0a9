#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Solar potential and financial estimation for a roof.
//!
//! The pipeline runs outline → [`solar_scan_geometry::measure_polygon`] →
//! [`layout::estimate_panel_layout`] → [`summary::summarize`] and
//! [`cash_flow::build_cash_flow_table`]. Every step is a pure function of
//! its inputs and the [`RegionConfig`] passed in; nothing is cached and
//! nothing is global, so estimates can be computed from any thread.

pub mod cash_flow;
pub mod financing;
pub mod grade;
pub mod layout;
pub mod summary;

pub use cash_flow::{
    build_cash_flow_table, payback_year, project_savings, project_savings_25yr, savings_in_year,
};
pub use financing::{amortized_loan, compare_financing};
pub use grade::{get_grade_from_score, grade_for_score, score_color};
pub use layout::estimate_panel_layout;
pub use summary::{
    approximate_lcoe, approximate_npv, estimate_annual_savings, estimate_investment, roi_pct,
    summarize,
};

use solar_scan_estimate_models::{RegionConfig, RoofEstimate};
use solar_scan_geometry::{GeoPoint, measure_polygon};

/// Full estimate for a traced roof outline.
///
/// Degenerate outlines measure as zero area and produce an empty layout;
/// the projection then only holds the (zero) investment.
#[must_use]
pub fn estimate_roof(points: &[GeoPoint], config: &RegionConfig) -> RoofEstimate {
    let measurement = measure_polygon(points);
    let mut estimate = estimate_area(measurement.area_m2, config);
    estimate.measurement = Some(measurement);
    estimate
}

/// Full estimate for a roof whose gross area is already known.
#[must_use]
pub fn estimate_area(roof_area_m2: f64, config: &RegionConfig) -> RoofEstimate {
    let roof_area_m2 = if roof_area_m2.is_finite() {
        roof_area_m2.max(0.0)
    } else {
        0.0
    };

    let layout = estimate_panel_layout(roof_area_m2, config);
    let investment = estimate_investment(layout.system_kwp, config);
    let annual_savings = estimate_annual_savings(layout.annual_kwh, config);
    let cash_flow = build_cash_flow_table(
        layout.annual_kwh,
        annual_savings,
        investment,
        layout.system_kwp,
        config,
    );
    let summary = summarize(
        investment,
        annual_savings,
        layout.annual_kwh,
        &cash_flow,
        config,
    );

    log::debug!(
        "Estimate ({}): {} panels, investment {investment:.0} {}, payback {:?}",
        config.id,
        layout.panel_count,
        config.currency,
        summary.payback_year
    );

    RoofEstimate {
        region_id: config.id.clone(),
        measurement: None,
        roof_area_m2,
        layout,
        summary,
        cash_flow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar_scan_geometry::rectangle;

    fn panama() -> RegionConfig {
        solar_scan_regions::region("panama").unwrap()
    }

    fn thousand_square_meter_roof() -> Vec<GeoPoint> {
        rectangle(GeoPoint::new(8.9824, -79.5199), 31.6, 31.6)
    }

    #[test]
    fn square_roof_end_to_end() {
        let config = panama();
        let estimate = estimate_roof(&thousand_square_meter_roof(), &config);

        let measurement = estimate.measurement.as_ref().unwrap();
        assert!((measurement.area_m2 - 998.56).abs() < 0.5);
        assert_eq!(measurement.labels.len(), 4);

        let layout = estimate.layout;
        assert!((layout.usable_area_m2 - 700.0).abs() < 2.0);
        assert_eq!(layout.panel_count, 411);
        assert!((layout.system_kwp - 184.95).abs() < 1e-9);
        assert!((layout.annual_kwh - 277_425.0).abs() < 1e-6);

        assert!((estimate.summary.investment - 184.95 * 1_000.0 * 0.65).abs() < 1e-6);

        let payback = estimate.summary.payback_year.unwrap();
        assert!(
            (5..=7).contains(&payback),
            "payback in year {payback}, expected 5-7"
        );
    }

    #[test]
    fn area_and_outline_estimates_agree() {
        let config = panama();
        let outline = thousand_square_meter_roof();
        let from_outline = estimate_roof(&outline, &config);
        let from_area = estimate_area(from_outline.roof_area_m2, &config);

        assert_eq!(from_outline.layout, from_area.layout);
        assert_eq!(from_outline.summary, from_area.summary);
        assert_eq!(from_outline.cash_flow, from_area.cash_flow);
        assert!(from_area.measurement.is_none());
    }

    #[test]
    fn degenerate_outline_produces_empty_estimate() {
        let config = panama();
        let estimate = estimate_roof(&[GeoPoint::new(8.98, -79.52)], &config);

        assert_eq!(estimate.layout.panel_count, 0);
        assert!(estimate.summary.investment.abs() < f64::EPSILON);
        assert!(estimate.summary.roi_pct.abs() < f64::EPSILON);
        assert!(estimate.summary.approximate_lcoe.abs() < f64::EPSILON);
        assert_eq!(estimate.cash_flow.len(), config.project_years as usize + 1);
    }

    #[test]
    fn region_overrides_flow_through() {
        let base = panama();
        let pricier = RegionConfig {
            cost_per_watt: base.cost_per_watt * 2.0,
            ..base.clone()
        };

        let cheap = estimate_area(1_000.0, &base);
        let expensive = estimate_area(1_000.0, &pricier);

        assert!((expensive.summary.investment - 2.0 * cheap.summary.investment).abs() < 1e-6);
        assert!(expensive.summary.payback_year >= cheap.summary.payback_year);
        assert_eq!(expensive.region_id, "panama");
    }

    #[test]
    fn estimates_are_deterministic_across_threads() {
        let config = panama();
        let outline = thousand_square_meter_roof();
        let first = estimate_roof(&outline, &config);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| estimate_roof(&outline, &config)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), first);
            }
        });
    }
}
