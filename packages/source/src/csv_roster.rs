//! CSV roster reader.
//!
//! Every cell arrives as text; blank cells become [`RawValue::Empty`]. Rows
//! may be ragged, and short rows are padded with empty cells.

use std::io::Read;

use territory_map_facility_models::{RawRecord, RawValue};

use crate::{Roster, SourceError};

/// Parses a comma-delimited roster with a header row.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the input is not valid CSV.
pub fn read_csv<R: Read>(reader: R) -> Result<Roster, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;

        let record: RawRecord = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(i, header)| (header.clone(), RawValue::from(row.get(i).unwrap_or(""))))
            .collect();

        records.push(record);
    }

    log::debug!("Parsed {} CSV rows", records.len());

    Ok(Roster { headers, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_cells_as_text() {
        let csv = "Hospital Name,Licensed Beds,Comment\n\
                   Candler Hospital, 320 ,\n";
        let roster = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(roster.headers, vec!["Hospital Name", "Licensed Beds", "Comment"]);
        assert_eq!(roster.records.len(), 1);
        let row = &roster.records[0];
        assert_eq!(
            row.get("Licensed Beds"),
            Some(&RawValue::Text("320".to_string()))
        );
        assert_eq!(row.get("Comment"), Some(&RawValue::Empty));
    }

    #[test]
    fn pads_short_rows() {
        let csv = "Hospital Name,City,State\nTMH,Tallahassee\n";
        let roster = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(roster.records[0].get("State"), Some(&RawValue::Empty));
    }

    #[test]
    fn keeps_quoted_commas() {
        let csv = "Hospital Name,Address\n\"Baptist Medical Center Jacksonville\",\"800 Prudential Dr, Jacksonville, FL 32207\"\n";
        let roster = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(
            roster.records[0].get("Address"),
            Some(&RawValue::Text(
                "800 Prudential Dr, Jacksonville, FL 32207".to_string()
            ))
        );
    }
}
