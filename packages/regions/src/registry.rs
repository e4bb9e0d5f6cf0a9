//! Compile-time registry of regional assumption sets.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a market means adding a TOML file in `regions/` and an entry
//! here.

use solar_scan_estimate_models::RegionConfig;

use crate::parse_region_toml;

/// Number of registered regions. Enforced by a test.
#[cfg(test)]
const EXPECTED_REGION_COUNT: usize = 1;

/// Embedded TOML region definitions.
const REGION_TOMLS: &[(&str, &str)] = &[("panama", include_str!("../regions/panama.toml"))];

/// Returns all registered regions.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse or validate. Since these
/// are compile-time constants, a failure is a development error caught by
/// the tests below.
#[must_use]
pub fn all_regions() -> Vec<RegionConfig> {
    REGION_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_region_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse region '{name}': {e}"))
        })
        .collect()
}

/// Ids of all registered regions, in registry order.
#[must_use]
pub fn region_ids() -> Vec<&'static str> {
    REGION_TOMLS.iter().map(|(name, _)| *name).collect()
}
