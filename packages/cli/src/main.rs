#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `territory_map`: score, tier, and map a hospital roster.
//!
//! Reads an Excel, CSV, or JSON roster, runs it through the territory engine, and
//! writes an HTML page, a JSON document, or a `GeoJSON` feature collection.
//! Logging defaults to `info`; set `RUST_LOG` to override.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, error::ErrorKind};
use territory_map_config::TerritoryConfig;
use territory_map_engine::Engine;
use territory_map_facility_models::{ScoringMode, columns};
use territory_map_render::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "territory_map",
    about = "Score, tier, and map hospital facilities for a sales territory"
)]
struct Cli {
    /// Roster file (`.xlsx`, `.csv`, or `.json`)
    #[arg(value_name = "INPUT", conflicts_with = "input")]
    input_path: Option<PathBuf>,

    /// Roster file (`.xlsx`, `.csv`, or `.json`)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Territory config file (`.toml` or `.json`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path (defaults to `territory-map.<format>`)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format: html, json, or geojson
    #[arg(long, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Jinja template to render instead of the built-in HTML page
    #[arg(long)]
    template: Option<PathBuf>,

    /// Scoring scheme: commercial or infrastructure
    #[arg(long, default_value_t = ScoringMode::Commercial)]
    mode: ScoringMode,

    /// Rep name (overrides the config file)
    #[arg(long)]
    rep: Option<String>,

    /// Territory name (overrides the config file)
    #[arg(long)]
    territory: Option<String>,

    /// Evaluation date for revenue annualization, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

impl Cli {
    fn roster_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().or(self.input_path.as_ref())
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.format.default_file_name()))
    }
}

fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Info);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();

    let Some(input) = cli.roster_path() else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "an input file is required (positional INPUT or --input)",
            )
            .exit();
    };

    if !input.is_file() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }

    if let Some(template) = &cli.template {
        if cli.format != OutputFormat::Html {
            return Err(
                format!("--template only applies to html output, not {}", cli.format).into(),
            );
        }
        if !template.is_file() {
            return Err(format!("Template file not found: {}", template.display()).into());
        }
    }

    let config = TerritoryConfig::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.rep.clone(), cli.territory.clone());

    let required = columns::required_columns(cli.mode);
    let roster = territory_map_source::load_roster(input, &required)?;

    let evaluation_date = cli
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let report = Engine::new(&config, cli.mode).run(&roster.records, evaluation_date);

    let output = cli.output_path();
    match &cli.template {
        Some(template) => {
            territory_map_render::write_custom_html(&report, &config, template, &output)?;
        }
        None => territory_map_render::write_report(&report, &config, cli.format, &output)?,
    }

    println!(
        "{} facilities scored ({}) -> {}",
        report.facilities.len(),
        cli.mode,
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_input_and_defaults() {
        let cli = Cli::try_parse_from(["territory_map", "hospitals.csv"]).unwrap();
        assert_eq!(cli.roster_path(), Some(&PathBuf::from("hospitals.csv")));
        assert_eq!(cli.format, OutputFormat::Html);
        assert_eq!(cli.mode, ScoringMode::Commercial);
        assert_eq!(cli.output_path(), PathBuf::from("territory-map.html"));
        assert!(cli.as_of.is_none());
        assert!(cli.template.is_none());
    }

    #[test]
    fn template_flag() {
        let cli = Cli::try_parse_from([
            "territory_map",
            "hospitals.xlsx",
            "--template",
            "territory_template.html",
        ])
        .unwrap();
        assert_eq!(cli.template, Some(PathBuf::from("territory_template.html")));
        assert_eq!(cli.roster_path(), Some(&PathBuf::from("hospitals.xlsx")));
    }

    #[test]
    fn flags() {
        let cli = Cli::try_parse_from([
            "territory_map",
            "--input",
            "roster.json",
            "--format",
            "geojson",
            "--mode",
            "infrastructure",
            "--rep",
            "Andrew Payne",
            "--as-of",
            "2026-03-31",
        ])
        .unwrap();

        assert_eq!(cli.roster_path(), Some(&PathBuf::from("roster.json")));
        assert_eq!(cli.format, OutputFormat::Geojson);
        assert_eq!(cli.mode, ScoringMode::Infrastructure);
        assert_eq!(cli.rep.as_deref(), Some("Andrew Payne"));
        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2026, 3, 31));
        assert_eq!(cli.output_path(), PathBuf::from("territory-map.geojson"));
    }

    #[test]
    fn rejects_bad_date_and_mode() {
        assert!(Cli::try_parse_from(["territory_map", "x.csv", "--as-of", "03/31/2026"]).is_err());
        assert!(Cli::try_parse_from(["territory_map", "x.csv", "--mode", "retail"]).is_err());
    }

    #[test]
    fn positional_and_flag_conflict() {
        assert!(Cli::try_parse_from(["territory_map", "a.csv", "--input", "b.csv"]).is_err());
    }
}
