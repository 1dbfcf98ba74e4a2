//! Excel (`.xlsx`) roster reader.
//!
//! Only the first worksheet is read. Its first row holds the headers, and
//! cells keep their native type, so numbers and booleans reach the engine
//! without a round trip through text. Rows whose first cell is blank are
//! skipped.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use territory_map_facility_models::{RawRecord, RawValue};

use crate::{Roster, SourceError};

/// Reads the first worksheet of an `.xlsx` workbook.
///
/// # Errors
///
/// Returns [`SourceError::Xlsx`] if the workbook cannot be opened or parsed,
/// and [`SourceError::InvalidShape`] if it has no worksheets.
pub fn read_xlsx(path: &Path) -> Result<Roster, SourceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SourceError::InvalidShape {
            message: "workbook has no worksheets".to_string(),
        })??;

    Ok(roster_from_range(&range))
}

/// Builds a roster from a worksheet range whose first row is the header.
#[must_use]
pub fn roster_from_range(range: &Range<Data>) -> Roster {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(header).collect())
        .unwrap_or_default();

    let mut records = Vec::new();
    let mut skipped = 0_usize;

    for row in rows {
        if row.first().is_none_or(|cell| to_raw_value(cell).is_blank()) {
            skipped += 1;
            continue;
        }

        let record: RawRecord = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(i, header)| {
                let value = row.get(i).map_or(RawValue::Empty, to_raw_value);
                (header.clone(), value)
            })
            .collect();

        records.push(record);
    }

    log::debug!(
        "Parsed {} worksheet rows ({skipped} blank rows skipped)",
        records.len()
    );

    Roster { headers, records }
}

fn header(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_owned(),
        other => other.to_string().trim().to_owned(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_raw_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Empty,
        Data::Bool(b) => RawValue::Bool(*b),
        Data::Int(n) => RawValue::Number(*n as f64),
        Data::Float(f) => RawValue::Number(*f),
        Data::DateTime(dt) => RawValue::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            RawValue::from(s.as_str())
        }
    }
}
