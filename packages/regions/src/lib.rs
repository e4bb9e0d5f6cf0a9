#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Regional assumption sets for solar estimates.
//!
//! Built-in regions are TOML files baked into the binary (see
//! [`registry`]). Callers can also load a complete assumption set from
//! their own TOML file with [`load_region_file`]; every field must be
//! present, so a file never silently inherits another market's numbers.

pub mod registry;

use std::path::{Path, PathBuf};

pub use registry::{all_regions, region_ids};
pub use solar_scan_estimate_models::{InvalidRegionConfigError, RegionConfig};

/// Errors from loading region assumptions.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// The region file could not be read.
    #[error("Failed to read region file {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML is malformed or a field is missing.
    #[error("Region TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// No built-in region has this id.
    #[error("Unknown region '{id}' (available: {available})")]
    UnknownRegion {
        /// Requested id.
        id: String,
        /// Comma-separated built-in ids.
        available: String,
    },

    /// A field holds an unusable value.
    #[error(transparent)]
    InvalidConfig(#[from] InvalidRegionConfigError),
}

/// Parses and validates a region from TOML text.
///
/// # Errors
///
/// Returns [`RegionError::Parse`] if the text is malformed or missing a
/// field, or [`RegionError::InvalidConfig`] if a value is out of range.
pub fn parse_region_toml(toml_str: &str) -> Result<RegionConfig, RegionError> {
    let config: RegionConfig = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Looks up a built-in region by id (case-insensitive).
///
/// # Errors
///
/// Returns [`RegionError::UnknownRegion`] if no built-in region matches.
pub fn region(id: &str) -> Result<RegionConfig, RegionError> {
    all_regions()
        .into_iter()
        .find(|region| region.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| RegionError::UnknownRegion {
            id: id.to_string(),
            available: region_ids().join(", "),
        })
}

/// Loads a complete region definition from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, is missing
/// a field, or holds an out-of-range value.
pub fn load_region_file(path: impl AsRef<Path>) -> Result<RegionConfig, RegionError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| RegionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_region_toml(&content)?;
    log::info!(
        "Loaded region '{}' ({}) from {}",
        config.id,
        config.name,
        path.display()
    );

    Ok(config)
}
