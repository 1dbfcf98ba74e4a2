//! Recognized source column headers.
//!
//! Every normalized field is read from one canonical header, falling back to
//! a short list of aliases. Columns not listed here are ignored.

use crate::ScoringMode;

pub const HOSPITAL_NAME: &str = "Hospital Name";
pub const SHORT_NAME: &str = "Short Name";
pub const ADDRESS: &str = "Address";
pub const CITY: &str = "City";
pub const STATE: &str = "State";
pub const COUNTY: &str = "County";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const PHONE: &str = "Phone";
pub const LICENSED_BEDS: &str = "Licensed Beds";
pub const AFFILIATION: &str = "Affiliation";
pub const GPO: &str = "Buy Group/GPO";
pub const STROKE_CERTIFICATION: &str = "Stroke Certification";
pub const STROKES_PER_YEAR: &str = "Strokes Per Year";
pub const PRIOR_REVENUE: &str = "NTS 2025 (Full Year)";
pub const YTD_REVENUE: &str = "NTS 2026 (YTD)";
pub const IR_PHONE: &str = "IR Phone";
pub const CERT_BODY: &str = "Cert Body";
pub const NSG_FELLOWSHIP: &str = "Neurosurgery Fellowship";
pub const NIR_FELLOWSHIP: &str = "Neuro IR Fellowship";
pub const CATCHMENT_POPULATION: &str = "Catchment Population";
pub const POPULATION_65: &str = "Population 65+";
pub const MEDIAN_AGE: &str = "Median Age";
pub const LIFE_EXPECTANCY: &str = "Life Expectancy";
pub const CAH_STATUS: &str = "CAH Status";
pub const TELESTROKE: &str = "Telestroke Capable";
pub const THROMBECTOMY_24_7: &str = "24/7 Thrombectomy";
pub const TPA_AVAILABLE: &str = "tPA Available";
pub const NEURO_ICU: &str = "Neuro ICU";
pub const CT_SCANNER: &str = "CT Scanner";
pub const SPOKE_HOSPITAL: &str = "Spoke Hospital";
pub const MEDEVAC: &str = "Medevac Available";
pub const ROAD_ACCESS: &str = "Road Access";
pub const COMMENT: &str = "Comment";

/// Alternate headers accepted for a canonical column, tried in order after
/// the canonical header itself.
#[must_use]
pub fn aliases(column: &str) -> &'static [&'static str] {
    match column {
        PRIOR_REVENUE => &["Prior Year Revenue", "Prior Period Revenue"],
        YTD_REVENUE => &["YTD Revenue", "Current YTD Revenue"],
        POPULATION_65 => &["Population 65 Plus", "Pop 65+"],
        CATCHMENT_POPULATION => &["Population"],
        LATITUDE => &["Lat"],
        LONGITUDE => &["Lng", "Lon"],
        _ => &[],
    }
}

/// Columns every input file must carry regardless of scoring mode.
pub const BASE_REQUIRED: &[&str] = &[
    HOSPITAL_NAME,
    SHORT_NAME,
    ADDRESS,
    CITY,
    STATE,
    COUNTY,
    LATITUDE,
    LONGITUDE,
    PHONE,
    LICENSED_BEDS,
    AFFILIATION,
    GPO,
    STROKE_CERTIFICATION,
    STROKES_PER_YEAR,
];

/// Additional columns required by commercial scoring.
pub const COMMERCIAL_REQUIRED: &[&str] = &[PRIOR_REVENUE, YTD_REVENUE];

/// All columns required for the given scoring mode.
#[must_use]
pub fn required_columns(mode: ScoringMode) -> Vec<&'static str> {
    let mut columns = BASE_REQUIRED.to_vec();
    if mode == ScoringMode::Commercial {
        columns.extend_from_slice(COMMERCIAL_REQUIRED);
    }
    columns
}

/// Whether `headers` satisfies `column` directly or through an alias.
#[must_use]
pub fn is_present<S: AsRef<str>>(headers: &[S], column: &str) -> bool {
    std::iter::once(column)
        .chain(aliases(column).iter().copied())
        .any(|candidate| headers.iter().any(|h| h.as_ref() == candidate))
}
