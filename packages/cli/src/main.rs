#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line roof scanner.
//!
//! Every subcommand prints pretty JSON on stdout; logs go to stderr and are
//! controlled with `RUST_LOG`. Regional assumptions come from a built-in
//! region (`--region`, default `panama`) or a complete TOML file
//! (`--config`).

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use solar_scan_estimate_models::{CashFlowRow, LoanTerms, RegionConfig, RoofEstimate};
use solar_scan_geometry::{GeoPoint, PolygonMeasurement};
use solar_scan_geometry::format::{format_area, format_distance};
use solar_scan_lead::LeadEnrichment;

#[derive(Parser)]
#[command(name = "solar_scan", about = "Roof solar potential and lead scoring tool")]
struct Cli {
    /// Built-in region whose assumptions to use
    #[arg(long, global = true, default_value = "panama", conflicts_with = "config")]
    region: String,

    /// Complete region definition to load instead of a built-in region
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in regions and their assumptions
    Regions,
    /// Measure a roof outline: area, perimeter and edge labels
    Measure(OutlineArgs),
    /// Estimate the panel layout for a roof area
    Layout {
        /// Gross roof area in square meters
        #[arg(long)]
        area: f64,
    },
    /// Full estimate for an outline or a known roof area
    Scan(RoofArgs),
    /// Year-by-year cash flow for an outline or a known roof area
    CashFlow {
        #[command(flatten)]
        roof: RoofArgs,

        /// Round money values to whole units
        #[arg(long)]
        rounded: bool,
    },
    /// Compare paying cash with financing part of the investment
    Financing {
        #[command(flatten)]
        roof: RoofArgs,

        #[command(flatten)]
        loan: LoanArgs,
    },
    /// Amortize a loan with monthly installments
    Loan {
        /// Amount borrowed
        #[arg(long)]
        principal: f64,

        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,

        /// Term in years
        #[arg(long)]
        term: u32,
    },
    /// Grade a 0-100 suitability score
    Grade {
        /// Suitability score
        #[arg(allow_hyphen_values = true)]
        score: f64,
    },
    /// Composite lead score from suitability and enrichment
    LeadScore {
        /// Roof suitability score, 0-100
        #[arg(long, allow_hyphen_values = true)]
        suitability: f64,

        /// JSON file holding the enrichment record
        #[arg(long)]
        enrichment: Option<PathBuf>,
    },
}

#[derive(Args)]
struct OutlineArgs {
    /// `GeoJSON` file holding the roof polygon
    #[arg(long, conflicts_with = "points")]
    geojson: Option<PathBuf>,

    /// Outline vertex as `LAT,LON` (repeat for each vertex)
    #[arg(
        long = "point",
        value_name = "LAT,LON",
        value_parser = parse_point,
        allow_hyphen_values = true
    )]
    points: Vec<GeoPoint>,
}

#[derive(Args)]
struct RoofArgs {
    #[command(flatten)]
    outline: OutlineArgs,

    /// Gross roof area in square meters, instead of an outline
    #[arg(long, conflicts_with_all = ["geojson", "points"])]
    area: Option<f64>,
}

#[derive(Args)]
struct LoanArgs {
    /// Share of the investment financed, in percent
    #[arg(long, default_value_t = 80.0)]
    loan_percent: f64,

    /// Annual interest rate in percent
    #[arg(long, default_value_t = 8.0)]
    rate: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 10)]
    term: u32,
}

impl From<&LoanArgs> for LoanTerms {
    fn from(args: &LoanArgs) -> Self {
        Self {
            loan_percent: args.loan_percent,
            interest_rate_pct: args.rate,
            term_years: args.term,
        }
    }
}

/// A polygon measurement with human-readable area and perimeter.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MeasureOutput {
    #[serde(flatten)]
    measurement: PolygonMeasurement,
    area_display: String,
    perimeter_display: String,
}

fn parse_point(value: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{lon}': {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

fn load_config(cli: &Cli) -> Result<RegionConfig, solar_scan_regions::RegionError> {
    match &cli.config {
        Some(path) => solar_scan_regions::load_region_file(path),
        None => solar_scan_regions::region(&cli.region),
    }
}

fn read_outline(args: &OutlineArgs) -> Result<Vec<GeoPoint>, Box<dyn std::error::Error>> {
    if let Some(path) = &args.geojson {
        let text = std::fs::read_to_string(path)?;
        let points = solar_scan_geometry::geojson_input::polygon_from_geojson(&text)?;
        log::info!("Read {} vertices from {}", points.len(), path.display());
        return Ok(points);
    }

    if args.points.len() < 3 {
        return Err("an outline needs --geojson or at least three --point vertices".into());
    }

    Ok(args.points.clone())
}

fn estimate(
    roof: &RoofArgs,
    config: &RegionConfig,
) -> Result<RoofEstimate, Box<dyn std::error::Error>> {
    match roof.area {
        Some(area) => Ok(solar_scan_estimate::estimate_area(area, config)),
        None => Ok(solar_scan_estimate::estimate_roof(
            &read_outline(&roof.outline)?,
            config,
        )),
    }
}

fn read_enrichment(path: &Path) -> Result<LeadEnrichment, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Regions => print_json(&solar_scan_regions::all_regions())?,
        Commands::Measure(outline) => {
            let measurement = solar_scan_geometry::measure_polygon(&read_outline(outline)?);
            print_json(&MeasureOutput {
                area_display: format_area(measurement.area_m2),
                perimeter_display: format_distance(measurement.perimeter_m),
                measurement,
            })?;
        }
        Commands::Layout { area } => {
            let config = load_config(&cli)?;
            print_json(&solar_scan_estimate::estimate_panel_layout(*area, &config))?;
        }
        Commands::Scan(roof) => {
            let config = load_config(&cli)?;
            print_json(&estimate(roof, &config)?)?;
        }
        Commands::CashFlow { roof, rounded } => {
            let config = load_config(&cli)?;
            let rows = estimate(roof, &config)?.cash_flow;
            if *rounded {
                let rows: Vec<_> = rows.iter().map(CashFlowRow::rounded).collect();
                print_json(&rows)?;
            } else {
                print_json(&rows)?;
            }
        }
        Commands::Financing { roof, loan } => {
            let config = load_config(&cli)?;
            let summary = estimate(roof, &config)?.summary;
            print_json(&solar_scan_estimate::compare_financing(
                summary.investment,
                summary.annual_savings,
                &LoanTerms::from(loan),
                &config,
            ))?;
        }
        Commands::Loan {
            principal,
            rate,
            term,
        } => print_json(&solar_scan_estimate::amortized_loan(*principal, *rate, *term))?,
        Commands::Grade { score } => {
            print_json(&solar_scan_estimate::get_grade_from_score(*score))?;
        }
        Commands::LeadScore {
            suitability,
            enrichment,
        } => {
            let enrichment = enrichment.as_deref().map(read_enrichment).transpose()?;
            print_json(&solar_scan_lead::score_lead(
                *suitability,
                enrichment.as_ref(),
            ))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_points() {
        let point = parse_point("8.9824, -79.5199").unwrap();
        assert!((point.lat - 8.9824).abs() < f64::EPSILON);
        assert!((point.lon + 79.5199).abs() < f64::EPSILON);

        assert!(parse_point("8.9824").is_err());
        assert!(parse_point("north,west").is_err());
    }

    #[test]
    fn outline_points_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "solar_scan",
            "measure",
            "--point",
            "-8.0,-79.0",
            "--point",
            "-8.0,-78.999",
            "--point",
            "-7.999,-78.999",
        ])
        .unwrap();

        let Commands::Measure(outline) = cli.command else {
            panic!("expected measure command");
        };
        assert_eq!(outline.points.len(), 3);
        assert!((outline.points[0].lat + 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn area_and_outline_are_exclusive() {
        let result = Cli::try_parse_from([
            "solar_scan",
            "scan",
            "--area",
            "1000",
            "--point",
            "8.0,-79.0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn region_and_config_are_exclusive() {
        let result = Cli::try_parse_from([
            "solar_scan",
            "--region",
            "panama",
            "--config",
            "custom.toml",
            "regions",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn too_few_points_is_an_error() {
        let outline = OutlineArgs {
            geojson: None,
            points: vec![GeoPoint::new(8.0, -79.0), GeoPoint::new(8.0, -79.001)],
        };
        assert!(read_outline(&outline).is_err());
    }

    #[test]
    fn loan_defaults() {
        let cli = Cli::try_parse_from(["solar_scan", "financing", "--area", "500"]).unwrap();
        let Commands::Financing { loan, .. } = cli.command else {
            panic!("expected financing command");
        };
        let terms = LoanTerms::from(&loan);
        assert!((terms.loan_percent - 80.0).abs() < f64::EPSILON);
        assert!((terms.interest_rate_pct - 8.0).abs() < f64::EPSILON);
        assert_eq!(terms.term_years, 10);
    }
}
