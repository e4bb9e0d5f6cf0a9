//! Summary-card figures: investment, savings, ROI and the quick NPV/LCOE
//! approximations.
//!
//! The NPV and LCOE here are flat-haircut shortcuts, not discounted cash
//! flow. A rigorous DCF belongs in a separately named figure.

use solar_scan_estimate_models::{CashFlowRow, FinancialSummary, RegionConfig};

use crate::cash_flow::{finite_or_zero, payback_year, project_savings_25yr};

/// Share of cumulative savings kept by [`approximate_npv`]. Stands in for
/// discounting at roughly 8% over 25 years.
pub const NPV_SAVINGS_FACTOR: f64 = 0.85;

/// Years of output assumed by [`approximate_lcoe`].
pub const LCOE_LIFETIME_YEARS: f64 = 25.0;

/// Share of nominal lifetime output kept by [`approximate_lcoe`]. Stands in
/// for cumulative degradation losses.
pub const LCOE_OUTPUT_FACTOR: f64 = 0.88;

/// Installed cost: `kWp * 1000 * cost_per_watt`.
#[must_use]
pub fn estimate_investment(system_kwp: f64, config: &RegionConfig) -> f64 {
    if !system_kwp.is_finite() || system_kwp <= 0.0 {
        return 0.0;
    }
    system_kwp * 1_000.0 * config.cost_per_watt
}

/// First-year avoided electricity cost: `kWh * electricity_rate_per_kwh`.
#[must_use]
pub fn estimate_annual_savings(annual_kwh: f64, config: &RegionConfig) -> f64 {
    if !annual_kwh.is_finite() || annual_kwh <= 0.0 {
        return 0.0;
    }
    annual_kwh * config.electricity_rate_per_kwh
}

/// Return over the horizon in percent; `0` when there is no investment.
#[must_use]
pub fn roi_pct(cumulative_savings: f64, investment: f64) -> f64 {
    if investment > 0.0 {
        (cumulative_savings - investment) / investment * 100.0
    } else {
        0.0
    }
}

/// Cumulative savings with a flat [`NPV_SAVINGS_FACTOR`] haircut, minus the
/// investment.
///
/// This is an approximation, not a discounted-cash-flow NPV.
#[must_use]
pub fn approximate_npv(cumulative_savings: f64, investment: f64) -> f64 {
    cumulative_savings * NPV_SAVINGS_FACTOR - investment
}

/// Investment divided by [`LCOE_LIFETIME_YEARS`] of first-year output with a
/// flat [`LCOE_OUTPUT_FACTOR`] loss allowance; `0` without production.
///
/// This is an approximation: no discounting and no O&M.
#[must_use]
pub fn approximate_lcoe(investment: f64, annual_kwh: f64) -> f64 {
    if annual_kwh > 0.0 {
        investment / (annual_kwh * LCOE_LIFETIME_YEARS * LCOE_OUTPUT_FACTOR)
    } else {
        0.0
    }
}

/// Gathers the summary-card figures for a projected system.
///
/// Non-finite inputs are treated as zero.
#[must_use]
pub fn summarize(
    investment: f64,
    annual_savings: f64,
    annual_kwh: f64,
    cash_flow: &[CashFlowRow],
    config: &RegionConfig,
) -> FinancialSummary {
    let investment = finite_or_zero(investment);
    let annual_savings = finite_or_zero(annual_savings);
    let annual_kwh = finite_or_zero(annual_kwh);
    let cumulative_savings = project_savings_25yr(annual_savings, config);

    FinancialSummary {
        investment,
        annual_savings,
        cumulative_savings,
        roi_pct: roi_pct(cumulative_savings, investment),
        approximate_npv: approximate_npv(cumulative_savings, investment),
        approximate_lcoe: approximate_lcoe(investment, annual_kwh),
        payback_year: payback_year(cash_flow),
        co2_avoided_kg_per_year: annual_kwh.max(0.0) * config.co2_kg_per_kwh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cash_flow::build_cash_flow_table;

    fn panama() -> RegionConfig {
        solar_scan_regions::region("panama").unwrap()
    }

    #[test]
    fn investment_and_savings_scale_with_config() {
        let config = panama();
        assert!((estimate_investment(184.95, &config) - 120_217.5).abs() < 1e-6);
        assert!((estimate_annual_savings(277_425.0, &config) - 23_581.125).abs() < 1e-6);
        assert!(estimate_investment(-3.0, &config).abs() < f64::EPSILON);
        assert!(estimate_annual_savings(f64::NAN, &config).abs() < f64::EPSILON);
    }

    #[test]
    fn roi_without_investment_is_zero() {
        assert!(roi_pct(50_000.0, 0.0).abs() < f64::EPSILON);
        assert!((roi_pct(150_000.0, 100_000.0) - 50.0).abs() < 1e-9);
        assert!((roi_pct(50_000.0, 100_000.0) + 50.0).abs() < 1e-9);
    }

    #[test]
    fn npv_is_a_flat_haircut() {
        assert!((approximate_npv(200_000.0, 100_000.0) - 70_000.0).abs() < 1e-9);
        assert!((approximate_npv(0.0, 10.0) + 10.0).abs() < 1e-12);
    }

    #[test]
    fn lcoe_uses_lifetime_factor() {
        // 22,000 / (1,000 * 25 * 0.88) = 1.0
        assert!((approximate_lcoe(22_000.0, 1_000.0) - 1.0).abs() < 1e-12);
        assert!(approximate_lcoe(22_000.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_inputs_summarize_to_zero() {
        let config = panama();
        let rows = build_cash_flow_table(f64::NAN, f64::NAN, f64::NAN, f64::NAN, &config);
        let summary = summarize(f64::NAN, f64::NAN, f64::INFINITY, &rows, &config);

        assert!(summary.investment.abs() < f64::EPSILON);
        assert!(summary.cumulative_savings.abs() < f64::EPSILON);
        assert!(summary.roi_pct.abs() < f64::EPSILON);
        assert!(summary.approximate_npv.abs() < f64::EPSILON);
        assert!(summary.approximate_lcoe.abs() < f64::EPSILON);
        assert!(summary.co2_avoided_kg_per_year.abs() < f64::EPSILON);
    }

    #[test]
    fn summary_ties_the_figures_together() {
        let config = panama();
        let investment = 120_217.5;
        let annual_savings = 23_581.125;
        let annual_kwh = 277_425.0;
        let rows =
            build_cash_flow_table(annual_kwh, annual_savings, investment, 184.95, &config);

        let summary = summarize(investment, annual_savings, annual_kwh, &rows, &config);

        let cumulative = project_savings_25yr(annual_savings, &config);
        assert!((summary.cumulative_savings - cumulative).abs() < f64::EPSILON);
        assert!((summary.roi_pct - roi_pct(cumulative, investment)).abs() < f64::EPSILON);
        assert!((summary.approximate_npv - (cumulative * 0.85 - investment)).abs() < 1e-6);
        assert_eq!(summary.payback_year, payback_year(&rows));
        assert!((summary.co2_avoided_kg_per_year - annual_kwh * config.co2_kg_per_kwh).abs() < 1e-6);
    }
}
