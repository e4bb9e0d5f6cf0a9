#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lead enrichment and scoring types.
//!
//! A [`LeadEnrichment`] is what an external business lookup returned for a
//! building's occupant. Every field is optional; `None` means the lookup
//! did not find it.

use serde::{Deserialize, Serialize};
use solar_scan_estimate_models::SuitabilityGrade;

/// Business details found for a lead by an external lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadEnrichment {
    /// Registered or listed business name.
    #[serde(default)]
    pub business_name: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Business website URL.
    #[serde(default)]
    pub website: Option<String>,
    /// Average review rating, nominally 0-5.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Composite lead score with the parts it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadScore {
    /// Weighted composite, 0-100.
    pub score: u32,
    /// Roof suitability score used as input, clamped to 0-100.
    pub suitability_score: f64,
    /// Enrichment completeness points, 0-100.
    pub enrichment_score: u32,
    /// Grade of the suitability score.
    pub grade: SuitabilityGrade,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_deserialize_as_none() {
        let enrichment: LeadEnrichment =
            serde_json::from_str(r#"{"businessName": "Ferretería Central", "rating": null}"#)
                .unwrap();
        assert_eq!(enrichment.business_name.as_deref(), Some("Ferretería Central"));
        assert!(enrichment.rating.is_none());
        assert!(enrichment.phone.is_none());
        assert!(enrichment.address.is_none());
    }
}
