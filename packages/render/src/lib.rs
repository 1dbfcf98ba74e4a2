#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output formats for territory reports.
//!
//! Every format is built from the allow-listed [`view::FacilityView`], never
//! from the engine's internal record.

pub mod geojson;
pub mod html;
pub mod view;

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use territory_map_config::TerritoryConfig;
use territory_map_engine::TerritoryReport;

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// I/O error writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTML template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A run-time Jinja template failed to parse or render.
    #[error("Custom template error: {0}")]
    CustomTemplate(#[from] minijinja::Error),
}

/// Supported output formats.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Single-file HTML page with map and table
    #[default]
    Html,
    /// Config, summary, and allow-listed facilities
    Json,
    /// `FeatureCollection` of located facilities
    Geojson,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Geojson => "geojson",
        }
    }

    /// Default output file name for this format.
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("territory-map.{}", self.extension())
    }
}

/// Renders a report in the requested format.
///
/// # Errors
///
/// Returns [`RenderError`] if serialization or template rendering fails.
pub fn render(
    report: &TerritoryReport,
    config: &TerritoryConfig,
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Html => html::render_html(report, config),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &view::ReportDocument::new(report, config),
        )?),
        OutputFormat::Geojson => Ok(serde_json::to_string_pretty(
            &geojson::feature_collection(&report.facilities),
        )?),
    }
}

/// Renders a report and writes it to `path`.
///
/// # Errors
///
/// Returns [`RenderError`] if rendering fails or the file cannot be written.
pub fn write_report(
    report: &TerritoryReport,
    config: &TerritoryConfig,
    format: OutputFormat,
    path: &Path,
) -> Result<(), RenderError> {
    let output = render(report, config, format)?;
    std::fs::write(path, output)?;
    log::info!(
        "Wrote {} facilities as {format} to {}",
        report.facilities.len(),
        path.display()
    );
    Ok(())
}

/// Renders a report as HTML through the Jinja template at `template_path`
/// and writes it to `path`.
///
/// # Errors
///
/// Returns [`RenderError`] if the template cannot be read or rendered, or the
/// output cannot be written.
pub fn write_custom_html(
    report: &TerritoryReport,
    config: &TerritoryConfig,
    template_path: &Path,
    path: &Path,
) -> Result<(), RenderError> {
    let source = std::fs::read_to_string(template_path)?;
    let output = html::render_custom_html(report, config, &source)?;
    std::fs::write(path, output)?;
    log::info!(
        "Wrote {} facilities through {} to {}",
        report.facilities.len(),
        template_path.display(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use territory_map_engine::Engine;
    use territory_map_facility_models::{
        Certification, Coordinates, FacilityProfile, RevenueFigures, ScoringMode,
    };

    use super::*;

    fn report(mode: ScoringMode) -> (TerritoryReport, TerritoryConfig) {
        let config = TerritoryConfig {
            rep_name: "Andrew Payne".to_string(),
            territory_name: "North Florida".to_string(),
            rep_base_lat: 30.3322,
            rep_base_lng: -81.6557,
            ..TerritoryConfig::default()
        };
        let profiles = vec![
            FacilityProfile {
                name: "Mayo Clinic Hospital in Florida".to_string(),
                city: "Jacksonville".to_string(),
                state: "FL".to_string(),
                location: Coordinates::new(30.2642, -81.4399),
                beds: 304,
                strokes_per_year: 700,
                certification: Certification::Comprehensive,
                comment: "Prefers </script> in notes".to_string(),
                revenue: RevenueFigures {
                    prior_period: 380_000,
                    year_to_date: 200_000,
                },
                ..FacilityProfile::default()
            },
            FacilityProfile {
                name: "Lake City Medical Center".to_string(),
                beds: 67,
                strokes_per_year: 90,
                ..FacilityProfile::default()
            },
        ];
        let date = NaiveDate::from_ymd_opt(2026, 5, 20).unwrap();
        let report = Engine::new(&config, mode).evaluate(profiles, date);
        (report, config)
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("GeoJSON".parse::<OutputFormat>().unwrap(), OutputFormat::Geojson);
        assert!("xlsx".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.default_file_name(), "territory-map.json");
    }

    #[test]
    fn json_document_has_config_summary_and_hospitals() {
        let (report, config) = report(ScoringMode::Commercial);
        let output = render(&report, &config, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["config"]["rep_name"], "Andrew Payne");
        assert_eq!(json["summary"]["facilityCount"], 2);
        let hospitals = json["hospitals"].as_array().unwrap();
        assert_eq!(hospitals.len(), 2);
        assert_eq!(hospitals[0]["name"], "Mayo Clinic Hospital in Florida");
        assert_eq!(hospitals[0]["tier"], 1);
        assert_eq!(hospitals[0]["certificationLabel"], "Comprehensive Stroke Center");
    }

    #[test]
    fn geojson_skips_unlocated() {
        let (report, config) = report(ScoringMode::Infrastructure);
        let output = render(&report, &config, OutputFormat::Geojson).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["features"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn html_page_contains_table_and_embedded_data() {
        let (report, config) = report(ScoringMode::Commercial);
        let page = render(&report, &config, OutputFormat::Html).unwrap();

        assert!(page.contains("<h1>North Florida</h1>"));
        assert!(page.contains("Mayo Clinic Hospital in Florida"));
        assert!(page.contains("Lake City Medical Center"));
        assert!(page.contains("May 20, 2026"));
        assert!(page.contains("Annualized Revenue"));
        assert!(page.contains(r#"<script id="territory-data" type="application/json">"#));
        assert!(!page.contains("Prefers </script>"));
    }
}
