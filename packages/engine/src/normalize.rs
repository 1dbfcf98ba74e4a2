//! Raw record to [`FacilityProfile`] conversion.
//!
//! Coercions never fail: a missing or unparseable cell yields the caller's
//! default. Structural problems are caught earlier, by the roster reader.

use territory_map_facility_models::columns;
use territory_map_facility_models::{
    Capabilities, Certification, Coordinates, Demographics, FacilityProfile, RawRecord, RawValue,
    RevenueFigures,
};

/// Finds the cell for `column`, trying the canonical header first and then
/// each alias. Blank cells are skipped so an empty canonical column does not
/// hide a populated alias.
#[must_use]
pub fn lookup<'a>(record: &'a RawRecord, column: &str) -> Option<&'a RawValue> {
    std::iter::once(column)
        .chain(columns::aliases(column).iter().copied())
        .filter_map(|candidate| record.get(candidate))
        .find(|value| !value.is_blank())
}

/// Coerces a cell to a finite float.
#[must_use]
pub fn coerce_f64(value: Option<&RawValue>, default: f64) -> f64 {
    let parsed = match value {
        Some(RawValue::Number(n)) => Some(*n),
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(RawValue::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(RawValue::Empty) | None => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(default)
}

/// Coerces a cell to a non-negative count, truncating toward zero.
///
/// `"530.0"` becomes 530. Negative values fall back to `default`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_count(value: Option<&RawValue>, default: u64) -> u64 {
    let n = coerce_f64(value, f64::NAN);
    if n.is_finite() && n >= 0.0 {
        n.trunc() as u64
    } else {
        default
    }
}

fn coerce_u32(value: Option<&RawValue>) -> u32 {
    u32::try_from(coerce_count(value, 0)).unwrap_or(u32::MAX)
}

/// Coerces a cell to a boolean.
///
/// Text is true only for `true`, `yes`, `1`, or `y` (any case); any other
/// text is false. Numbers are true when non-zero.
#[must_use]
pub fn coerce_bool(value: Option<&RawValue>, default: bool) -> bool {
    match value {
        Some(RawValue::Bool(b)) => *b,
        Some(RawValue::Number(n)) => *n != 0.0,
        Some(RawValue::Text(s)) => {
            let s = s.trim();
            ["true", "yes", "1", "y"]
                .iter()
                .any(|truthy| s.eq_ignore_ascii_case(truthy))
        }
        Some(RawValue::Empty) | None => default,
    }
}

/// Coerces a cell to a trimmed string. Whole numbers render without a
/// fractional part.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn coerce_string(value: Option<&RawValue>) -> String {
    match value {
        Some(RawValue::Text(s)) => s.trim().to_string(),
        Some(RawValue::Number(n)) if n.fract() == 0.0 && n.abs() < 1e15 => {
            format!("{}", *n as i64)
        }
        Some(RawValue::Number(n)) => n.to_string(),
        Some(RawValue::Bool(b)) => b.to_string(),
        Some(RawValue::Empty) | None => String::new(),
    }
}

/// Normalizes a certification cell.
#[must_use]
pub fn coerce_certification(value: Option<&RawValue>) -> Certification {
    let raw = coerce_string(value);
    let certification = Certification::normalize(&raw);
    if certification == Certification::None && !raw.is_empty() && !raw.eq_ignore_ascii_case("none")
    {
        log::debug!("Unrecognized certification '{raw}', treating as None");
    }
    certification
}

/// Builds a fully defaulted [`FacilityProfile`] from one raw record.
#[must_use]
pub fn normalize_record(record: &RawRecord) -> FacilityProfile {
    let text = |column: &str| coerce_string(lookup(record, column));
    let flag = |column: &str| coerce_bool(lookup(record, column), false);
    let number = |column: &str| coerce_f64(lookup(record, column), 0.0);
    let count = |column: &str| coerce_count(lookup(record, column), 0);

    FacilityProfile {
        name: text(columns::HOSPITAL_NAME),
        short_name: text(columns::SHORT_NAME),
        address: text(columns::ADDRESS),
        city: text(columns::CITY),
        state: text(columns::STATE),
        county: text(columns::COUNTY),
        phone: text(columns::PHONE),
        ir_phone: text(columns::IR_PHONE),
        affiliation: text(columns::AFFILIATION),
        gpo: text(columns::GPO),
        comment: text(columns::COMMENT),
        location: Coordinates::new(number(columns::LATITUDE), number(columns::LONGITUDE)),
        beds: coerce_u32(lookup(record, columns::LICENSED_BEDS)),
        strokes_per_year: coerce_u32(lookup(record, columns::STROKES_PER_YEAR)),
        certification: coerce_certification(lookup(record, columns::STROKE_CERTIFICATION)),
        cert_body: text(columns::CERT_BODY),
        nsg_fellowship: flag(columns::NSG_FELLOWSHIP),
        nir_fellowship: flag(columns::NIR_FELLOWSHIP),
        critical_access: flag(columns::CAH_STATUS),
        capabilities: Capabilities {
            thrombectomy_24_7: flag(columns::THROMBECTOMY_24_7),
            neuro_icu: flag(columns::NEURO_ICU),
            ct_scanner: flag(columns::CT_SCANNER),
            telestroke: flag(columns::TELESTROKE),
            tpa_available: flag(columns::TPA_AVAILABLE),
            spoke: flag(columns::SPOKE_HOSPITAL),
            medevac: flag(columns::MEDEVAC),
            road_access: flag(columns::ROAD_ACCESS),
        },
        demographics: Demographics {
            catchment_population: count(columns::CATCHMENT_POPULATION),
            population_65: count(columns::POPULATION_65),
            median_age: number(columns::MEDIAN_AGE),
            life_expectancy: number(columns::LIFE_EXPECTANCY),
        },
        revenue: RevenueFigures {
            prior_period: count(columns::PRIOR_REVENUE),
            year_to_date: count(columns::YTD_REVENUE),
        },
    }
}
