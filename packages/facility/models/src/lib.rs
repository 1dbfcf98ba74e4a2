#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Facility record types shared across the territory map toolchain.
//!
//! A [`Facility`] starts life as a normalized [`FacilityProfile`] and is
//! enriched stage by stage: epidemiology, revenue projection, composite score,
//! tier, and travel. Each stage owns exactly one of the optional derived parts,
//! so a later stage can never rewrite what an earlier one produced.

pub mod columns;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A raw scalar cell value as delivered by a tabular data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Native boolean cell.
    Bool(bool),
    /// Native numeric cell.
    Number(f64),
    /// Text cell (CSV cells always arrive as text).
    Text(String),
}

impl RawValue {
    /// Returns `true` for a missing cell or a text cell containing only
    /// whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_owned())
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One source row: column header to raw cell value.
pub type RawRecord = BTreeMap<String, RawValue>;

/// Stroke center certification level.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Certification {
    /// Comprehensive Stroke Center
    #[serde(rename = "CSC")]
    #[strum(serialize = "CSC")]
    Comprehensive,
    /// Primary Stroke Center
    #[serde(rename = "PSC")]
    #[strum(serialize = "PSC")]
    Primary,
    /// Thrombectomy-Capable Stroke Center
    #[serde(rename = "TSC")]
    #[strum(serialize = "TSC")]
    ThrombectomyStroke,
    /// Thrombectomy-Capable Center
    #[serde(rename = "TCC")]
    #[strum(serialize = "TCC")]
    ThrombectomyCenter,
    /// No recognized certification
    #[default]
    #[serde(rename = "None")]
    #[strum(serialize = "None")]
    None,
}

impl Certification {
    /// Normalizes a raw certification string.
    ///
    /// Unrecognized values (including the empty string) map to
    /// [`Certification::None`] rather than failing.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    /// Whether this level is one of the two thrombectomy-capable designations.
    #[must_use]
    pub const fn is_thrombectomy_capable(self) -> bool {
        matches!(self, Self::ThrombectomyStroke | Self::ThrombectomyCenter)
    }

    /// Human-readable certification label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comprehensive => "Comprehensive Stroke Center",
            Self::Primary => "Primary Stroke Center",
            Self::ThrombectomyStroke => "Thrombectomy-Capable Stroke Center",
            Self::ThrombectomyCenter => "Thrombectomy-Capable Center",
            Self::None => "No Certification",
        }
    }

    /// Display colour used by map markers and badges.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Comprehensive => "#EB1700",
            Self::Primary => "#F59E0B",
            Self::ThrombectomyStroke | Self::ThrombectomyCenter => "#0077C8",
            Self::None => "#6B7280",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Comprehensive,
            Self::Primary,
            Self::ThrombectomyStroke,
            Self::ThrombectomyCenter,
            Self::None,
        ]
    }
}

/// Which composite scoring scheme a pipeline run uses.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoringMode {
    /// Commercial (TPS) scoring with revenue momentum and revenue rank.
    #[default]
    Commercial,
    /// Pure infrastructure/clinical capability scoring.
    Infrastructure,
}

/// Qualitative band derived from a composite score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Segment {
    /// Score of 70 or more
    High,
    /// Score of 50 to 69
    Mid,
    /// Score below 50
    Low,
}

impl Segment {
    /// Lowest score that lands in [`Segment::High`].
    pub const HIGH_THRESHOLD: u8 = 70;
    /// Lowest score that lands in [`Segment::Mid`].
    pub const MID_THRESHOLD: u8 = 50;

    /// Classifies a clamped composite score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MID_THRESHOLD {
            Self::Mid
        } else {
            Self::Low
        }
    }

    /// Outreach strategy label for this band.
    #[must_use]
    pub const fn strategy(self) -> &'static str {
        match self {
            Self::High => "Invest & Grow",
            Self::Mid => "Develop & Build",
            Self::Low => "Monitor & Nurture",
        }
    }

    /// Returns all variants of this enum, highest band first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::High, Self::Mid, Self::Low]
    }
}

/// Ordinal, set-relative priority tier (1 is highest).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Tier {
    /// Top third of the ranked set
    #[strum(serialize = "1")]
    One = 1,
    /// Middle band
    #[strum(serialize = "2")]
    Two = 2,
    /// Remainder
    #[strum(serialize = "3")]
    Three = 3,
}

impl Tier {
    /// Returns the numeric value of this tier.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::One, Self::Two, Self::Three]
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.value()
    }
}

impl TryFrom<u8> for Tier {
    type Error = InvalidTierError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(InvalidTierError { value }),
        }
    }
}

/// Error returned when converting a number outside 1-3 into a [`Tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTierError {
    /// The rejected value.
    pub value: u8,
}

impl std::fmt::Display for InvalidTierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier {}: expected 1-3", self.value)
    }
}

impl std::error::Error for InvalidTierError {}

/// Geographic access difficulty, bucketed from estimated travel time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AccessCategory {
    /// Under 30 minutes
    Local,
    /// 30 to 119 minutes
    Short,
    /// 120 to 239 minutes
    Long,
    /// 240 minutes or more
    #[serde(rename = "Flight Required")]
    #[strum(serialize = "Flight Required")]
    FlightRequired,
}

impl AccessCategory {
    /// Buckets a travel time in minutes. Each boundary is an exclusive upper
    /// bound on the lower band, so exactly 30 minutes is [`Self::Short`].
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        if minutes < 30 {
            Self::Local
        } else if minutes < 120 {
            Self::Short
        } else if minutes < 240 {
            Self::Long
        } else {
            Self::FlightRequired
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `(0, 0)` marks a facility whose source row had no usable location.
    #[must_use]
    pub fn is_null_island(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

/// Binary infrastructure capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Around-the-clock mechanical thrombectomy coverage.
    pub thrombectomy_24_7: bool,
    /// Dedicated neuro intensive care unit.
    pub neuro_icu: bool,
    /// On-site CT scanner.
    pub ct_scanner: bool,
    /// Telestroke network participation.
    pub telestroke: bool,
    /// Thrombolytic (tPA) availability.
    pub tpa_available: bool,
    /// Spoke/satellite of a larger hub.
    pub spoke: bool,
    /// Air medical transport available.
    pub medevac: bool,
    /// Reachable by road.
    pub road_access: bool,
}

/// Catchment demographics as supplied by the source (not yet imputed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// Total catchment population.
    pub catchment_population: u64,
    /// Population aged 65 and over; zero when the source omitted it.
    pub population_65: u64,
    /// Median age of the catchment.
    pub median_age: f64,
    /// Life expectancy at birth in the catchment.
    pub life_expectancy: f64,
}

/// Commercial revenue figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueFigures {
    /// Prior-period (full year) revenue.
    pub prior_period: u64,
    /// Current-period year-to-date revenue.
    pub year_to_date: u64,
}

/// A fully typed, defaulted facility record produced by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct FacilityProfile {
    /// Full facility name.
    pub name: String,
    /// Abbreviated display name.
    pub short_name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// County name.
    pub county: String,
    /// Main phone number.
    pub phone: String,
    /// Interventional radiology phone number.
    pub ir_phone: String,
    /// Health system affiliation.
    pub affiliation: String,
    /// Buying group / GPO.
    pub gpo: String,
    /// Free-form comment.
    pub comment: String,
    /// Facility location; `(0, 0)` when the source had none.
    pub location: Coordinates,
    /// Licensed bed count.
    pub beds: u32,
    /// Observed annual stroke volume.
    pub strokes_per_year: u32,
    /// Normalized certification level.
    pub certification: Certification,
    /// Certifying body (e.g. "Joint Commission", "DNV").
    pub cert_body: String,
    /// Accredited neurosurgery fellowship on site.
    pub nsg_fellowship: bool,
    /// Accredited neuro-interventional fellowship on site.
    pub nir_fellowship: bool,
    /// Critical Access Hospital designation.
    pub critical_access: bool,
    /// Infrastructure capability flags.
    pub capabilities: Capabilities,
    /// Catchment demographics.
    pub demographics: Demographics,
    /// Commercial revenue figures.
    pub revenue: RevenueFigures,
}

/// Age-weighted incidence estimates for a facility's catchment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epidemiology {
    /// Population 65+, after imputation.
    pub population_65: u64,
    /// Whether `population_65` was imputed from the total.
    pub age_imputed: bool,
    /// Share of the catchment aged 65+, in percent (one decimal).
    pub pop_65_pct: f64,
    /// Age-weighted effective population.
    pub effective_population: u64,
    /// Ischemic stroke volume per year.
    pub ischemic: u64,
    /// Large-vessel occlusion volume per year.
    pub lvo: u64,
    /// Mechanical-thrombectomy-eligible volume per year.
    pub mt_eligible: u64,
    /// Hemorrhagic stroke volume per year.
    pub hemorrhagic: u64,
    /// Subarachnoid hemorrhage share of the hemorrhagic volume.
    pub subarachnoid: u64,
    /// Intracerebral hemorrhage share of the hemorrhagic volume.
    pub intracerebral: u64,
    /// Remaining hemorrhagic volume.
    pub other_hemorrhagic: u64,
    /// AVM/aneurysm volume per year.
    pub avm_aneurysm: u64,
    /// Chronic subdural hematoma (MMA embolization candidate) volume per year.
    pub chronic_subdural: u64,
}

/// Year-over-year revenue projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueProjection {
    /// Year-to-date revenue extrapolated to a full year.
    pub annualized: u64,
    /// Growth of the annualized figure over the prior period, in percent.
    pub yoy_growth_pct: f64,
}

/// One weighted term of a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    /// Short component name (e.g. `"certification"`).
    pub name: String,
    /// Points awarded, before clamping of the total.
    pub points: f64,
    /// Maximum points this component can award.
    pub max_points: f64,
}

/// A bounded composite score with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    /// Scheme that produced this score.
    pub mode: ScoringMode,
    /// Clamped score in `[0, 100]`.
    pub score: u8,
    /// Qualitative band.
    pub segment: Segment,
    /// Strategy label for the band.
    pub strategy: String,
    /// Individual weighted terms.
    pub components: Vec<ScoreComponent>,
}

/// A facility's ordinal tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAssignment {
    /// Assigned tier.
    pub tier: Tier,
    /// Descriptive tier label.
    pub label: String,
    /// Zero-based position in the ranked set.
    pub rank: usize,
}

/// Nearest-base travel estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    /// Great-circle distance to the nearest base, in miles (one decimal).
    pub distance_miles: f64,
    /// Approximate road distance, in miles (one decimal).
    pub road_miles: f64,
    /// Estimated drive time in whole minutes.
    pub travel_time_min: u32,
    /// Name of the nearest team member.
    pub closest_team_member: String,
    /// Role of the nearest team member.
    pub closest_team_role: String,
    /// Access difficulty bucket.
    pub access: AccessCategory,
    /// The facility had no usable coordinates.
    pub location_missing: bool,
}

/// A facility record and every derived part computed for it so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Normalized input fields.
    pub profile: FacilityProfile,
    /// Set by the epidemiology estimator.
    pub epidemiology: Option<Epidemiology>,
    /// Set by the revenue projection step.
    pub revenue_projection: Option<RevenueProjection>,
    /// Set by the composite scorer.
    pub score: Option<CompositeScore>,
    /// Set by the tier classifier.
    pub tier: Option<TierAssignment>,
    /// Set by the travel resolver.
    pub travel: Option<TravelEstimate>,
}

impl Facility {
    /// Wraps a freshly normalized profile with no derived data.
    #[must_use]
    pub fn new(profile: FacilityProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// The clamped composite score, or 0 before scoring.
    #[must_use]
    pub fn score_value(&self) -> u8 {
        self.score.as_ref().map_or(0, |s| s.score)
    }

    /// Annualized revenue, or 0 before projection.
    #[must_use]
    pub fn annualized_revenue(&self) -> u64 {
        self.revenue_projection.map_or(0, |p| p.annualized)
    }
}
