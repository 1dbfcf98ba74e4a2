//! JSON roster reader.
//!
//! Accepts either a bare array of row objects or an object with a
//! `"hospitals"` array. Scalars keep their JSON type; nested arrays and
//! objects carry no meaning for a cell and are read as empty.

use territory_map_facility_models::{RawRecord, RawValue};

use crate::{Roster, SourceError};

/// Parses a JSON roster document.
///
/// # Errors
///
/// Returns [`SourceError::Json`] for malformed JSON and
/// [`SourceError::InvalidShape`] when the document is not a list of objects.
pub fn parse_json(json_str: &str) -> Result<Roster, SourceError> {
    let document: serde_json::Value = serde_json::from_str(json_str)?;

    let rows = match &document {
        serde_json::Value::Array(rows) => rows,
        serde_json::Value::Object(map) => match map.get("hospitals") {
            Some(serde_json::Value::Array(rows)) => rows,
            _ => {
                return Err(SourceError::InvalidShape {
                    message: "expected a \"hospitals\" array".to_string(),
                });
            }
        },
        _ => {
            return Err(SourceError::InvalidShape {
                message: "expected an array of row objects".to_string(),
            });
        }
    };

    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let Some(object) = row.as_object() else {
            return Err(SourceError::InvalidShape {
                message: format!("row {i} is not an object"),
            });
        };

        let mut record = RawRecord::new();
        for (key, value) in object {
            let header = key.trim();
            if !headers.iter().any(|h| h == header) {
                headers.push(header.to_string());
            }
            record.insert(header.to_string(), to_raw_value(value));
        }
        records.push(record);
    }

    Ok(Roster { headers, records })
}

/// Converts a JSON scalar into a [`RawValue`].
fn to_raw_value(value: &serde_json::Value) -> RawValue {
    match value {
        serde_json::Value::Bool(b) => RawValue::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Empty, RawValue::Number),
        serde_json::Value::String(s) => RawValue::from(s.as_str()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            RawValue::Empty
        }
    }
}
