#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Value types for roof-based solar estimates.
//!
//! Everything here is a plain value recomputed on demand: the regional
//! assumption set that drives the estimate, the panel layout derived from
//! a roof area, the suitability grade, the yearly cash-flow rows and the
//! financing scenarios. None of them carry identity or mutation history.

use serde::{Deserialize, Serialize};
use solar_scan_geometry_models::PolygonMeasurement;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Longest projection horizon, in years, a region may ask for.
pub const MAX_PROJECT_YEARS: u32 = 100;

/// The complete set of regional solar and financial assumptions.
///
/// Every field is required when deserializing; a region file that omits
/// one is rejected instead of silently falling back to another market's
/// numbers. Field names stay snake_case to match the region TOML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Unique region identifier (e.g. `"panama"`).
    pub id: String,
    /// Human-readable region name.
    pub name: String,
    /// ISO 4217 currency code all monetary fields are expressed in.
    pub currency: String,
    /// Rated output of one panel in watts.
    pub panel_wattage_w: f64,
    /// Panel length in meters.
    pub panel_length_m: f64,
    /// Panel width in meters.
    pub panel_width_m: f64,
    /// Fraction of gross roof area left after setbacks and obstructions.
    pub usable_area_fraction: f64,
    /// System derate covering inverter, wiring, soiling and thermal losses.
    pub performance_ratio: f64,
    /// Annual specific yield before derate, in kWh per installed kWp.
    pub yield_factor_kwh_per_kwp: f64,
    /// Avoided electricity cost per kWh.
    pub electricity_rate_per_kwh: f64,
    /// Installed cost per watt peak.
    pub cost_per_watt: f64,
    /// Yearly panel output loss (0.005 = 0.5% per year).
    pub degradation_rate: f64,
    /// Yearly electricity price escalation.
    pub inflation_rate: f64,
    /// First-year operations and maintenance cost per kWp.
    pub o_and_m_per_kwp: f64,
    /// Yearly O&M cost escalation.
    pub o_and_m_inflation: f64,
    /// Grid emission factor in kg CO2 per kWh displaced.
    pub co2_kg_per_kwh: f64,
    /// Projection horizon in years, at most [`MAX_PROJECT_YEARS`].
    pub project_years: u32,
}

impl RegionConfig {
    /// Footprint of a single panel in square meters.
    #[must_use]
    pub fn panel_area_m2(&self) -> f64 {
        self.panel_length_m * self.panel_width_m
    }

    /// Checks that every assumption is a usable number.
    ///
    /// # Errors
    ///
    /// Returns the first field that is non-finite, negative, outside its
    /// allowed range, or zero where a positive value is required.
    pub fn validate(&self) -> Result<(), InvalidRegionConfigError> {
        let non_negative = [
            ("panel_wattage_w", self.panel_wattage_w),
            ("yield_factor_kwh_per_kwp", self.yield_factor_kwh_per_kwp),
            ("electricity_rate_per_kwh", self.electricity_rate_per_kwh),
            ("cost_per_watt", self.cost_per_watt),
            ("inflation_rate", self.inflation_rate),
            ("o_and_m_per_kwp", self.o_and_m_per_kwp),
            ("o_and_m_inflation", self.o_and_m_inflation),
            ("co2_kg_per_kwh", self.co2_kg_per_kwh),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidRegionConfigError::new(
                    field,
                    format!("must be a finite, non-negative number (got {value})"),
                ));
            }
        }

        let fractions = [
            ("usable_area_fraction", self.usable_area_fraction),
            ("performance_ratio", self.performance_ratio),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidRegionConfigError::new(
                    field,
                    format!("must be between 0 and 1 (got {value})"),
                ));
            }
        }

        if !(0.0..1.0).contains(&self.degradation_rate) {
            return Err(InvalidRegionConfigError::new(
                "degradation_rate",
                format!("must be at least 0 and below 1 (got {})", self.degradation_rate),
            ));
        }

        let positive = [
            ("panel_length_m", self.panel_length_m),
            ("panel_width_m", self.panel_width_m),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidRegionConfigError::new(
                    field,
                    format!("must be greater than 0 (got {value})"),
                ));
            }
        }

        if self.project_years == 0 || self.project_years > MAX_PROJECT_YEARS {
            return Err(InvalidRegionConfigError::new(
                "project_years",
                format!(
                    "must be between 1 and {MAX_PROJECT_YEARS} (got {})",
                    self.project_years
                ),
            ));
        }

        Ok(())
    }
}

/// Error returned by [`RegionConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRegionConfigError {
    /// Name of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub reason: String,
}

impl InvalidRegionConfigError {
    const fn new(field: &'static str, reason: String) -> Self {
        Self { field, reason }
    }
}

impl std::fmt::Display for InvalidRegionConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid region config field `{}`: {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidRegionConfigError {}

/// Panel count and output derived from a roof area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
    /// Roof area left for panels, in square meters.
    pub usable_area_m2: f64,
    /// Whole panels that fit in the usable area.
    pub panel_count: u32,
    /// Installed capacity in kWp.
    pub system_kwp: f64,
    /// First-year energy yield in kWh.
    pub annual_kwh: f64,
}

impl PanelLayout {
    /// A layout with no panels.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            usable_area_m2: 0.0,
            panel_count: 0,
            system_kwp: 0.0,
            annual_kwh: 0.0,
        }
    }
}

/// Letter grade for a 0-100 suitability score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum Grade {
    /// Score of 75 and above.
    A,
    /// Score of 55 up to 75.
    B,
    /// Score of 35 up to 55.
    C,
    /// Anything below 35.
    D,
}

impl Grade {
    /// Lowest score that earns this grade (`None` for the open-ended
    /// bottom bucket).
    #[must_use]
    pub const fn min_score(self) -> Option<f64> {
        match self {
            Self::A => Some(75.0),
            Self::B => Some(55.0),
            Self::C => Some(35.0),
            Self::D => None,
        }
    }

    /// Short description shown next to the letter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Excellent",
            Self::B => "Good",
            Self::C => "Moderate",
            Self::D => "Limited",
        }
    }

    /// Color used when rendering this grade.
    #[must_use]
    pub const fn color(self) -> ScoreColor {
        match self {
            Self::A => ScoreColor::Cyan,
            Self::B => ScoreColor::Green,
            Self::C => ScoreColor::Amber,
            Self::D => ScoreColor::Red,
        }
    }
}

/// Dashboard color bucket for a score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoreColor {
    /// Top bucket.
    Cyan,
    /// Second bucket.
    Green,
    /// Third bucket.
    Amber,
    /// Bottom bucket.
    Red,
}

impl ScoreColor {
    /// Hex value used by the dashboard theme.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Cyan => "#06b6d4",
            Self::Green => "#22c55e",
            Self::Amber => "#f59e0b",
            Self::Red => "#ef4444",
        }
    }
}

/// A suitability score's grade with its display label and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuitabilityGrade {
    /// Letter grade.
    pub grade: Grade,
    /// Short description (e.g. "Excellent").
    pub label: String,
    /// Display color bucket.
    pub color: ScoreColor,
}

impl From<Grade> for SuitabilityGrade {
    fn from(grade: Grade) -> Self {
        Self {
            grade,
            label: grade.label().to_string(),
            color: grade.color(),
        }
    }
}

/// One year of the projection. Monetary values are unrounded.
///
/// Year 0 holds the up-front investment; production, savings and O&M are
/// zero there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRow {
    /// Project year, starting at 0.
    pub year: u32,
    /// Energy produced in kWh after degradation.
    pub production_kwh: f64,
    /// Electricity cost avoided this year.
    pub savings: f64,
    /// Operations and maintenance cost this year.
    pub o_and_m: f64,
    /// `savings - o_and_m`, or `-investment` in year 0.
    pub net_cash_flow: f64,
    /// Running total of `net_cash_flow` through this year.
    pub cumulative: f64,
}

impl CashFlowRow {
    /// The row rounded to whole kWh and whole currency units for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded(&self) -> RoundedCashFlowRow {
        RoundedCashFlowRow {
            year: self.year,
            production_kwh: self.production_kwh.round() as i64,
            savings: self.savings.round() as i64,
            o_and_m: self.o_and_m.round() as i64,
            net_cash_flow: self.net_cash_flow.round() as i64,
            cumulative: self.cumulative.round() as i64,
        }
    }
}

/// A [`CashFlowRow`] rounded for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedCashFlowRow {
    /// Project year, starting at 0.
    pub year: u32,
    /// Energy produced in whole kWh.
    pub production_kwh: i64,
    /// Savings in whole currency units.
    pub savings: i64,
    /// O&M cost in whole currency units.
    pub o_and_m: i64,
    /// Net cash flow in whole currency units.
    pub net_cash_flow: i64,
    /// Cumulative position in whole currency units.
    pub cumulative: i64,
}

/// Headline numbers for the summary cards.
///
/// `approximate_npv` and `approximate_lcoe` are coarse flat-haircut
/// estimates, not discounted-cash-flow results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    /// Up-front installed cost.
    pub investment: f64,
    /// First-year avoided electricity cost.
    pub annual_savings: f64,
    /// Degraded, inflated savings summed over the projection horizon.
    pub cumulative_savings: f64,
    /// Return on investment over the horizon, in percent.
    pub roi_pct: f64,
    /// Cumulative savings with a flat 15% haircut, minus investment.
    pub approximate_npv: f64,
    /// Investment over 25 years of output with a flat 12% loss allowance.
    pub approximate_lcoe: f64,
    /// First year whose cumulative position is non-negative, if any.
    pub payback_year: Option<u32>,
    /// Yearly CO2 emissions displaced, in kg.
    pub co2_avoided_kg_per_year: f64,
}

/// Fixed-rate loan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Share of the investment financed, in percent (0-100).
    pub loan_percent: f64,
    /// Nominal annual interest rate in percent.
    pub interest_rate_pct: f64,
    /// Repayment term in years.
    pub term_years: u32,
}

/// Result of amortizing a principal over a fixed term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizedLoan {
    /// Constant monthly installment.
    pub monthly_payment: f64,
    /// Interest paid over the full term.
    pub total_interest: f64,
    /// Principal plus interest.
    pub total_cost_with_interest: f64,
}

/// Cost and 25-year outcome of one way of paying for the system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingScenario {
    /// Amount borrowed.
    pub loan_amount: f64,
    /// Amount paid up front.
    pub down_payment: f64,
    /// Monthly loan installment (zero for cash).
    pub monthly_payment: f64,
    /// Interest paid over the loan term.
    pub total_interest: f64,
    /// Everything paid for the system: down payment plus all installments.
    pub total_cost_with_interest: f64,
    /// Projected savings over the horizon minus `total_cost_with_interest`.
    pub net_savings_25yr: f64,
}

/// Cash purchase next to a loan-financed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingComparison {
    /// Paying the full investment up front.
    pub cash: FinancingScenario,
    /// Financing part of the investment.
    pub loan: FinancingScenario,
}

/// Full roof estimate: geometry, layout, summary and projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofEstimate {
    /// Region the assumptions came from.
    pub region_id: String,
    /// Outline measurement, when the estimate started from a polygon.
    pub measurement: Option<PolygonMeasurement>,
    /// Gross roof area in square meters.
    pub roof_area_m2: f64,
    /// Panel layout for the roof.
    pub layout: PanelLayout,
    /// Summary card figures.
    pub summary: FinancialSummary,
    /// Year-by-year projection, year 0 through the horizon.
    pub cash_flow: Vec<CashFlowRow>,
}
