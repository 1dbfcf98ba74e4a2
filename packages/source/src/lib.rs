#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Tabular facility roster readers.
//!
//! A roster is an ordered list of [`RawRecord`]s keyed by column header. The
//! readers here only move cells into [`RawValue`]s; typing and defaulting is
//! the engine's job. Structural problems (missing required columns, an
//! unreadable file) fail fast with a [`SourceError`]; rows without a facility
//! name are dropped before they reach the engine.

pub mod csv_roster;
pub mod json_roster;
pub mod xlsx_roster;

use std::path::Path;

use territory_map_facility_models::columns::{self, HOSPITAL_NAME};
use territory_map_facility_models::{RawRecord, RawValue};

/// Errors that can occur while reading a roster.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Excel workbook could not be read.
    #[error("Excel read error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// The roster lacks columns the selected scoring mode needs.
    #[error("Missing required columns: {}. Found columns: {}", missing.join(", "), found.join(", "))]
    MissingColumns {
        /// Required headers that were not found.
        missing: Vec<String>,
        /// Headers the roster does have.
        found: Vec<String>,
    },

    /// The JSON document is not an array of row objects.
    #[error("Invalid roster shape: {message}")]
    InvalidShape {
        /// Description of what went wrong.
        message: String,
    },

    /// The file extension is not a supported roster format.
    #[error("Unsupported roster format: {path}")]
    UnsupportedFormat {
        /// Offending path.
        path: String,
    },
}

/// A parsed roster: the header row plus every named data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    /// Column headers in source order.
    pub headers: Vec<String>,
    /// Data rows, in source order.
    pub records: Vec<RawRecord>,
}

impl Roster {
    /// Checks that every `required` column (or one of its aliases) is present.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingColumns`] listing every missing column.
    pub fn validate_columns(&self, required: &[&str]) -> Result<(), SourceError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|column| !columns::is_present(&self.headers, column))
            .map(|column| (*column).to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SourceError::MissingColumns {
                missing,
                found: self.headers.clone(),
            })
        }
    }

    /// Drops rows with no facility name.
    fn retain_named(mut self) -> Self {
        let before = self.records.len();
        self.records.retain(|record| {
            record
                .get(HOSPITAL_NAME)
                .is_some_and(|value| !value.is_blank())
        });
        let skipped = before - self.records.len();
        if skipped > 0 {
            log::debug!("Skipped {skipped} row(s) without a hospital name");
        }
        self
    }
}

/// Reads a roster from a `.xlsx`, `.csv`, or `.json` file and validates it against the
/// `required` columns.
///
/// # Errors
///
/// Returns [`SourceError`] if the file cannot be read or parsed, has an
/// unsupported extension, or is missing required columns.
pub fn load_roster(path: &Path, required: &[&str]) -> Result<Roster, SourceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let roster = match extension.as_deref() {
        Some("xlsx") => xlsx_roster::read_xlsx(path)?,
        Some("csv") => csv_roster::read_csv(std::fs::File::open(path)?)?,
        Some("json") => json_roster::parse_json(&std::fs::read_to_string(path)?)?,
        _ => {
            return Err(SourceError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };

    roster.validate_columns(required)?;
    let roster = roster.retain_named();

    log::info!(
        "Loaded {} facilities from {}",
        roster.records.len(),
        path.display()
    );

    Ok(roster)
}

/// Builds a record from `(column, value)` pairs. Handy for fixtures.
#[must_use]
pub fn record_from_pairs<I, K, V>(pairs: I) -> RawRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RawValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
