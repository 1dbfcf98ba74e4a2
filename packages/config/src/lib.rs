#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Territory configuration for the territory map toolchain.
//!
//! A [`TerritoryConfig`] describes the rep and team whose home bases anchor
//! travel estimates, the map viewport, and optional overrides for the engine's
//! rate and weight tables. Configs are read from TOML or JSON; every field has
//! a default so a missing file is equivalent to an empty one.

pub mod parameters;

use std::path::Path;

use serde::{Deserialize, Serialize};
use territory_map_facility_models::Coordinates;

pub use parameters::{
    CertificationPoints, CommercialWeights, EpidemiologyRates, InfrastructureWeights,
};

/// Errors that can occur while loading a territory config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format: {path}")]
    UnsupportedFormat {
        /// Offending path.
        path: String,
    },
}

/// An additional team member with their own home base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Display name.
    pub name: String,
    /// Role (e.g. "CAS", "RSM").
    #[serde(default)]
    pub role: String,
    /// Home base latitude.
    pub lat: f64,
    /// Home base longitude.
    pub lng: f64,
}

/// A resolved home base the travel resolver measures from.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamBase {
    /// Team member name.
    pub name: String,
    /// Team member role.
    pub role: String,
    /// Base location.
    pub location: Coordinates,
}

/// Run configuration for one territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConfig {
    /// Primary rep name.
    pub rep_name: String,
    /// Primary rep role.
    pub rep_role: String,
    /// City the primary rep is based in.
    pub rep_base_city: String,
    /// Primary base latitude.
    pub rep_base_lat: f64,
    /// Primary base longitude.
    pub rep_base_lng: f64,
    /// Territory display name.
    pub territory_name: String,
    /// Map centre latitude; `(0, 0)` requests auto-centering.
    pub map_center_lat: f64,
    /// Map centre longitude.
    pub map_center_lng: f64,
    /// Initial map zoom level.
    pub map_zoom: u8,
    /// Additional team members, in priority order.
    pub team_members: Vec<TeamMember>,
    /// Epidemiology rate overrides.
    pub epidemiology: EpidemiologyRates,
    /// Commercial scoring weight overrides.
    pub commercial_weights: CommercialWeights,
    /// Infrastructure scoring weight overrides.
    pub infrastructure_weights: InfrastructureWeights,
}

impl Default for TerritoryConfig {
    fn default() -> Self {
        Self {
            rep_name: "Territory Rep".to_string(),
            rep_role: "CAS".to_string(),
            rep_base_city: String::new(),
            rep_base_lat: 0.0,
            rep_base_lng: 0.0,
            territory_name: "Territory".to_string(),
            map_center_lat: 33.0,
            map_center_lng: -83.0,
            map_zoom: 7,
            team_members: Vec::new(),
            epidemiology: EpidemiologyRates::default(),
            commercial_weights: CommercialWeights::default(),
            infrastructure_weights: InfrastructureWeights::default(),
        }
    }
}

impl TerritoryConfig {
    /// Loads a config from a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or has an
    /// unsupported extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("toml") => parse_config_toml(&std::fs::read_to_string(path)?)?,
            Some("json") => parse_config_json(&std::fs::read_to_string(path)?)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.display().to_string(),
                });
            }
        };

        log::info!(
            "Loaded config for {} ({} team member(s))",
            config.territory_name,
            config.team_members.len()
        );

        Ok(config)
    }

    /// Loads a config from `path`, or returns the defaults when no path is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a path is given and loading it fails.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Applies command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(mut self, rep_name: Option<String>, territory: Option<String>) -> Self {
        if let Some(rep_name) = rep_name {
            self.rep_name = rep_name;
        }
        if let Some(territory) = territory {
            self.territory_name = territory;
        }
        self
    }

    /// The primary base followed by every team member's base, in order.
    #[must_use]
    pub fn team_bases(&self) -> Vec<TeamBase> {
        std::iter::once(TeamBase {
            name: self.rep_name.clone(),
            role: self.rep_role.clone(),
            location: Coordinates::new(self.rep_base_lat, self.rep_base_lng),
        })
        .chain(self.team_members.iter().map(|member| TeamBase {
            name: member.name.clone(),
            role: member.role.clone(),
            location: Coordinates::new(member.lat, member.lng),
        }))
        .collect()
    }

    /// Whether the map centre should be derived from the facility set.
    #[must_use]
    pub fn wants_auto_center(&self) -> bool {
        self.map_center_lat == 0.0 && self.map_center_lng == 0.0
    }
}

/// Parses a [`TerritoryConfig`] from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or a field has the wrong type.
pub fn parse_config_toml(toml_str: &str) -> Result<TerritoryConfig, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

/// Parses a [`TerritoryConfig`] from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a field has the wrong type.
pub fn parse_config_json(json_str: &str) -> Result<TerritoryConfig, ConfigError> {
    Ok(serde_json::from_str(json_str)?)
}
