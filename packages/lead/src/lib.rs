#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Composite lead scoring.
//!
//! A lead's score blends how suitable the roof is (70%) with how complete
//! the business enrichment is (30%). The blend is not renormalized: a lead
//! with a perfect roof and no enrichment tops out at 70.

pub use solar_scan_lead_models::{LeadEnrichment, LeadScore};

use solar_scan_estimate::get_grade_from_score;

/// Points for a non-blank business name.
pub const W_BUSINESS_NAME: u32 = 30;
/// Points for a non-blank phone number.
pub const W_PHONE: u32 = 25;
/// Points for a non-blank website.
pub const W_WEBSITE: u32 = 20;
/// Points for a rating of at least [`MIN_GOOD_RATING`].
pub const W_RATING: u32 = 15;
/// Points for a non-blank address.
pub const W_ADDRESS: u32 = 10;

const _: () = assert!(
    W_BUSINESS_NAME + W_PHONE + W_WEBSITE + W_RATING + W_ADDRESS == 100,
    "enrichment weights must sum to exactly 100"
);

/// Lowest rating that earns [`W_RATING`].
pub const MIN_GOOD_RATING: f64 = 4.0;

/// Share of the composite taken by the suitability score.
pub const SUITABILITY_WEIGHT: f64 = 0.7;

/// Share of the composite taken by the enrichment score.
pub const ENRICHMENT_WEIGHT: f64 = 0.3;

fn is_present(field: Option<&str>) -> bool {
    field.is_some_and(|value| !value.trim().is_empty())
}

/// Completeness points for an enrichment record, 0-100.
///
/// `None` (no lookup result) scores 0, the same as a record with every
/// field missing.
#[must_use]
pub fn enrichment_score(enrichment: Option<&LeadEnrichment>) -> u32 {
    let Some(enrichment) = enrichment else {
        return 0;
    };

    let mut score = 0;
    if is_present(enrichment.business_name.as_deref()) {
        score += W_BUSINESS_NAME;
    }
    if is_present(enrichment.phone.as_deref()) {
        score += W_PHONE;
    }
    if is_present(enrichment.website.as_deref()) {
        score += W_WEBSITE;
    }
    if enrichment.rating.is_some_and(|rating| rating >= MIN_GOOD_RATING) {
        score += W_RATING;
    }
    if is_present(enrichment.address.as_deref()) {
        score += W_ADDRESS;
    }

    score.min(100)
}

/// Clamps a suitability score into `0..=100`. `NaN` becomes 0.
fn clamp_suitability(suitability_score: f64) -> f64 {
    if suitability_score.is_nan() {
        0.0
    } else {
        suitability_score.clamp(0.0, 100.0)
    }
}

/// Composite lead score, 0-100.
///
/// `round(0.7 * suitability + 0.3 * enrichment)`, with the suitability
/// score clamped into `0..=100` first.
#[must_use]
pub fn calculate_lead_score(suitability_score: f64, enrichment: Option<&LeadEnrichment>) -> u32 {
    composite(
        clamp_suitability(suitability_score),
        enrichment_score(enrichment),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn composite(suitability: f64, enrichment: u32) -> u32 {
    let blended = suitability.mul_add(
        SUITABILITY_WEIGHT,
        f64::from(enrichment) * ENRICHMENT_WEIGHT,
    );
    // Both inputs are within 0..=100, so the rounded blend is too.
    blended.round().clamp(0.0, 100.0) as u32
}

/// Composite lead score together with its inputs and the suitability
/// grade.
#[must_use]
pub fn score_lead(suitability_score: f64, enrichment: Option<&LeadEnrichment>) -> LeadScore {
    let suitability = clamp_suitability(suitability_score);
    let enrichment_points = enrichment_score(enrichment);
    let score = composite(suitability, enrichment_points);

    log::debug!(
        "Lead score {score}: suitability {suitability:.1}, enrichment {enrichment_points}"
    );

    LeadScore {
        score,
        suitability_score: suitability,
        enrichment_score: enrichment_points,
        grade: get_grade_from_score(suitability),
    }
}
