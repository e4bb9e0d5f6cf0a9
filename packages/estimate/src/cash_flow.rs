//! Year-by-year cash-flow projection.
//!
//! Year `y` (from 1) scales first-year production by panel degradation
//! `(1 - d)^(y-1)`, scales first-year savings by the same degradation and by
//! electricity price inflation `(1 + i)^(y-1)`, and charges O&M of
//! `o_and_m_per_kwp * kWp * (1 + o)^(y-1)`.
//!
//! All values stay unrounded. The running `cumulative` is summed from
//! unrounded net cash flows; round with [`CashFlowRow::rounded`] only when
//! presenting.

use solar_scan_estimate_models::{CashFlowRow, MAX_PROJECT_YEARS, RegionConfig};

/// Savings for a single project year (1-based) after degradation and
/// price inflation.
#[must_use]
pub fn savings_in_year(
    annual_savings: f64,
    degradation_rate: f64,
    inflation_rate: f64,
    year: u32,
) -> f64 {
    let elapsed = f64::from(year.saturating_sub(1));
    annual_savings * (1.0 - degradation_rate).powf(elapsed) * (1.0 + inflation_rate).powf(elapsed)
}

/// Degraded, inflated savings summed over years `1..=years`.
///
/// Non-finite inputs are treated as zero. `years` is capped at
/// [`MAX_PROJECT_YEARS`].
#[must_use]
pub fn project_savings(
    annual_savings: f64,
    degradation_rate: f64,
    inflation_rate: f64,
    years: u32,
) -> f64 {
    let annual_savings = finite_or_zero(annual_savings);
    let degradation_rate = finite_or_zero(degradation_rate);
    let inflation_rate = finite_or_zero(inflation_rate);

    (1..=years.min(MAX_PROJECT_YEARS))
        .map(|year| savings_in_year(annual_savings, degradation_rate, inflation_rate, year))
        .sum()
}

/// [`project_savings`] with the region's degradation, inflation and
/// horizon.
#[must_use]
pub fn project_savings_25yr(annual_savings: f64, config: &RegionConfig) -> f64 {
    project_savings(
        annual_savings,
        config.degradation_rate,
        config.inflation_rate,
        config.project_years,
    )
}

/// Builds the projection table: year 0 (the investment) through
/// `config.project_years`, capped at [`MAX_PROJECT_YEARS`].
///
/// Non-finite inputs are treated as zero.
#[must_use]
pub fn build_cash_flow_table(
    annual_kwh: f64,
    annual_savings: f64,
    investment: f64,
    system_kwp: f64,
    config: &RegionConfig,
) -> Vec<CashFlowRow> {
    let annual_kwh = finite_or_zero(annual_kwh);
    let annual_savings = finite_or_zero(annual_savings);
    let investment = finite_or_zero(investment);
    let system_kwp = finite_or_zero(system_kwp);

    let years = config.project_years.min(MAX_PROJECT_YEARS);
    let first_year_o_and_m = config.o_and_m_per_kwp * system_kwp;

    let mut rows = Vec::with_capacity(years as usize + 1);
    rows.push(CashFlowRow {
        year: 0,
        production_kwh: 0.0,
        savings: 0.0,
        o_and_m: 0.0,
        net_cash_flow: -investment,
        cumulative: -investment,
    });

    let mut cumulative = -investment;

    for year in 1..=years {
        let elapsed = f64::from(year - 1);
        let production_kwh = annual_kwh * (1.0 - config.degradation_rate).powf(elapsed);
        let savings = savings_in_year(
            annual_savings,
            config.degradation_rate,
            config.inflation_rate,
            year,
        );
        let o_and_m = first_year_o_and_m * (1.0 + config.o_and_m_inflation).powf(elapsed);
        let net_cash_flow = savings - o_and_m;
        cumulative += net_cash_flow;

        rows.push(CashFlowRow {
            year,
            production_kwh,
            savings,
            o_and_m,
            net_cash_flow,
            cumulative,
        });
    }

    log::debug!(
        "Projected {years} years: investment {investment:.0}, final cumulative {cumulative:.0}"
    );

    rows
}

/// First year (1 or later) whose cumulative position is non-negative.
///
/// `None` means the investment is not recovered within the horizon.
#[must_use]
pub fn payback_year(rows: &[CashFlowRow]) -> Option<u32> {
    rows.iter()
        .find(|row| row.year >= 1 && row.cumulative >= 0.0)
        .map(|row| row.year)
}

pub(crate) const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panama() -> RegionConfig {
        solar_scan_regions::region("panama").unwrap()
    }

    fn flat() -> RegionConfig {
        RegionConfig {
            degradation_rate: 0.0,
            inflation_rate: 0.0,
            o_and_m_per_kwp: 0.0,
            o_and_m_inflation: 0.0,
            ..panama()
        }
    }

    #[test]
    fn year_zero_is_the_investment() {
        let rows = build_cash_flow_table(277_425.0, 23_581.0, 120_217.5, 184.95, &panama());
        let first = rows[0];
        assert_eq!(first.year, 0);
        assert!((first.net_cash_flow + 120_217.5).abs() < f64::EPSILON);
        assert!((first.cumulative + 120_217.5).abs() < f64::EPSILON);
        assert!(first.savings.abs() < f64::EPSILON);
    }

    #[test]
    fn table_covers_the_horizon() {
        let rows = build_cash_flow_table(10_000.0, 1_500.0, 8_000.0, 6.0, &panama());
        assert_eq!(rows.len(), 26);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.year as usize, i);
        }
    }

    #[test]
    fn cumulative_is_investment_plus_summed_net_flows() {
        let rows = build_cash_flow_table(277_425.0, 23_581.125, 120_217.5, 184.95, &panama());
        let summed: f64 = rows[1..].iter().map(|row| row.net_cash_flow).sum();
        let last = rows.last().unwrap();
        assert!(
            (last.cumulative - (-120_217.5 + summed)).abs() < 1e-6,
            "cumulative {} vs recomputed {}",
            last.cumulative,
            -120_217.5 + summed
        );

        let mut running = 0.0;
        for row in &rows {
            running += row.net_cash_flow;
            assert!((row.cumulative - running).abs() < 1e-6);
        }
    }

    #[test]
    fn payback_with_flat_savings() {
        let rows = build_cash_flow_table(0.0, 20_000.0, 100_000.0, 0.0, &flat());

        // -100k, -80k, -60k, -40k, -20k, 0 -> recovered in year 5.
        let expected = [-100_000.0, -80_000.0, -60_000.0, -40_000.0, -20_000.0, 0.0];
        for (row, expected) in rows.iter().zip(expected) {
            assert!((row.cumulative - expected).abs() < 1e-9);
        }
        assert_eq!(payback_year(&rows), Some(5));
    }

    #[test]
    fn payback_beyond_horizon_is_none() {
        let rows = build_cash_flow_table(0.0, 1_000.0, 100_000.0, 0.0, &flat());
        assert_eq!(payback_year(&rows), None);
        assert_eq!(payback_year(&[]), None);
    }

    #[test]
    fn zero_investment_does_not_pay_back_in_year_zero() {
        let rows = build_cash_flow_table(0.0, 100.0, 0.0, 0.0, &flat());
        assert_eq!(payback_year(&rows), Some(1));
    }

    #[test]
    fn degradation_and_inflation_compound() {
        let config = panama();
        let rows = build_cash_flow_table(1_000.0, 100.0, 0.0, 10.0, &config);

        let year3 = rows[3];
        assert!((year3.production_kwh - 1_000.0 * 0.995_f64.powi(2)).abs() < 1e-9);
        assert!((year3.savings - 100.0 * 0.995_f64.powi(2) * 1.03_f64.powi(2)).abs() < 1e-9);
        assert!((year3.o_and_m - config.o_and_m_per_kwp * 10.0 * 1.02_f64.powi(2)).abs() < 1e-9);
        assert!((year3.net_cash_flow - (year3.savings - year3.o_and_m)).abs() < 1e-12);
    }

    #[test]
    fn production_declines_every_year() {
        let rows = build_cash_flow_table(50_000.0, 5_000.0, 0.0, 30.0, &panama());
        for pair in rows[1..].windows(2) {
            assert!(pair[1].production_kwh < pair[0].production_kwh);
        }
    }

    #[test]
    fn table_savings_match_projection() {
        let config = panama();
        let rows = build_cash_flow_table(0.0, 12_345.0, 0.0, 0.0, &config);
        let table_total: f64 = rows.iter().map(|row| row.savings).sum();
        assert!((table_total - project_savings_25yr(12_345.0, &config)).abs() < 1e-6);
    }

    #[test]
    fn projected_savings_without_growth_is_linear() {
        assert!((project_savings(1_000.0, 0.0, 0.0, 25) - 25_000.0).abs() < 1e-9);
        assert!(project_savings(1_000.0, 0.005, 0.03, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn unvalidated_horizon_is_capped() {
        let config = RegionConfig {
            project_years: u32::MAX,
            ..flat()
        };
        let rows = build_cash_flow_table(1_000.0, 100.0, 0.0, 1.0, &config);
        assert_eq!(rows.len(), MAX_PROJECT_YEARS as usize + 1);
        assert_eq!(rows.last().unwrap().year, MAX_PROJECT_YEARS);

        let capped = project_savings_25yr(100.0, &config);
        assert!((capped - 100.0 * f64::from(MAX_PROJECT_YEARS)).abs() < 1e-6);
    }

    #[test]
    fn non_finite_savings_project_to_zero() {
        let config = panama();
        for savings in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(project_savings_25yr(savings, &config).abs() < f64::EPSILON);
        }
        assert!(project_savings(1_000.0, f64::NAN, f64::NAN, 10).is_finite());
        assert!((project_savings(1_000.0, f64::NAN, f64::NAN, 10) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_inputs_become_zero() {
        let rows = build_cash_flow_table(f64::NAN, f64::INFINITY, f64::NAN, f64::NAN, &panama());
        assert!(rows.iter().all(|row| row.cumulative.abs() < f64::EPSILON));
    }

    #[test]
    fn projection_is_deterministic() {
        let config = panama();
        let first = build_cash_flow_table(277_425.0, 23_581.125, 120_217.5, 184.95, &config);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        build_cash_flow_table(277_425.0, 23_581.125, 120_217.5, 184.95, &config)
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), first);
            }
        });
    }
}
