//! The serialized shape of an enriched facility.
//!
//! Output never serializes [`Facility`] directly: only the fields listed on
//! [`FacilityView`] leave the process, under stable camelCase names.

use serde::Serialize;
use territory_map_config::TerritoryConfig;
use territory_map_engine::{TerritoryReport, TerritorySummary};
use territory_map_facility_models::{AccessCategory, Certification, Facility, Segment, Tier};

/// Flat, allow-listed view of one facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct FacilityView {
    pub name: String,
    pub short_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub county: String,
    pub phone: String,
    pub ir_phone: String,
    pub affiliation: String,
    pub gpo: String,
    pub lat: f64,
    pub lng: f64,

    pub beds: u32,
    pub strokes_per_year: u32,
    pub certification: Certification,
    pub certification_label: &'static str,
    pub certification_color: &'static str,
    pub cert_body: String,
    pub nsg_fellowship: bool,
    pub nir_fellowship: bool,
    pub critical_access: bool,
    pub thrombectomy_24_7: bool,
    pub neuro_icu: bool,
    pub ct_scanner: bool,
    pub telestroke: bool,
    pub tpa_available: bool,
    pub spoke: bool,
    pub medevac: bool,
    pub road_access: bool,

    pub catchment_population: u64,
    pub population_65: u64,
    pub pop_65_pct: f64,
    pub age_imputed: bool,
    pub median_age: f64,
    pub life_expectancy: f64,
    pub effective_population: u64,
    pub ischemic: u64,
    pub lvo: u64,
    pub mt_eligible: u64,
    pub hemorrhagic: u64,
    pub subarachnoid: u64,
    pub intracerebral: u64,
    pub other_hemorrhagic: u64,
    pub avm_aneurysm: u64,
    pub chronic_subdural: u64,

    pub prior_revenue: u64,
    pub ytd_revenue: u64,
    pub annualized_revenue: u64,
    pub yoy_growth_pct: f64,

    pub score: u8,
    pub segment: Option<Segment>,
    pub strategy: String,
    pub tier: Option<Tier>,
    pub tier_label: String,
    pub rank: Option<usize>,

    pub distance_miles: f64,
    pub road_miles: f64,
    pub travel_time_min: u32,
    pub closest_team_member: String,
    pub closest_team_role: String,
    pub access: Option<AccessCategory>,
    pub location_missing: bool,

    pub comment: String,
}

impl From<&Facility> for FacilityView {
    fn from(facility: &Facility) -> Self {
        let p = &facility.profile;
        let caps = &p.capabilities;
        let epi = facility.epidemiology.unwrap_or_default();
        let projection = facility.revenue_projection.unwrap_or_default();
        let score = facility.score.as_ref();
        let tier = facility.tier.as_ref();
        let travel = facility.travel.as_ref();

        Self {
            name: p.name.clone(),
            short_name: p.short_name.clone(),
            address: p.address.clone(),
            city: p.city.clone(),
            state: p.state.clone(),
            county: p.county.clone(),
            phone: p.phone.clone(),
            ir_phone: p.ir_phone.clone(),
            affiliation: p.affiliation.clone(),
            gpo: p.gpo.clone(),
            lat: p.location.lat,
            lng: p.location.lng,

            beds: p.beds,
            strokes_per_year: p.strokes_per_year,
            certification: p.certification,
            certification_label: p.certification.label(),
            certification_color: p.certification.color(),
            cert_body: p.cert_body.clone(),
            nsg_fellowship: p.nsg_fellowship,
            nir_fellowship: p.nir_fellowship,
            critical_access: p.critical_access,
            thrombectomy_24_7: caps.thrombectomy_24_7,
            neuro_icu: caps.neuro_icu,
            ct_scanner: caps.ct_scanner,
            telestroke: caps.telestroke,
            tpa_available: caps.tpa_available,
            spoke: caps.spoke,
            medevac: caps.medevac,
            road_access: caps.road_access,

            catchment_population: p.demographics.catchment_population,
            population_65: epi.population_65,
            pop_65_pct: epi.pop_65_pct,
            age_imputed: epi.age_imputed,
            median_age: p.demographics.median_age,
            life_expectancy: p.demographics.life_expectancy,
            effective_population: epi.effective_population,
            ischemic: epi.ischemic,
            lvo: epi.lvo,
            mt_eligible: epi.mt_eligible,
            hemorrhagic: epi.hemorrhagic,
            subarachnoid: epi.subarachnoid,
            intracerebral: epi.intracerebral,
            other_hemorrhagic: epi.other_hemorrhagic,
            avm_aneurysm: epi.avm_aneurysm,
            chronic_subdural: epi.chronic_subdural,

            prior_revenue: p.revenue.prior_period,
            ytd_revenue: p.revenue.year_to_date,
            annualized_revenue: projection.annualized,
            yoy_growth_pct: projection.yoy_growth_pct,

            score: facility.score_value(),
            segment: score.map(|s| s.segment),
            strategy: score.map(|s| s.strategy.clone()).unwrap_or_default(),
            tier: tier.map(|t| t.tier),
            tier_label: tier.map(|t| t.label.clone()).unwrap_or_default(),
            rank: tier.map(|t| t.rank),

            distance_miles: travel.map_or(0.0, |t| t.distance_miles),
            road_miles: travel.map_or(0.0, |t| t.road_miles),
            travel_time_min: travel.map_or(0, |t| t.travel_time_min),
            closest_team_member: travel
                .map(|t| t.closest_team_member.clone())
                .unwrap_or_default(),
            closest_team_role: travel
                .map(|t| t.closest_team_role.clone())
                .unwrap_or_default(),
            access: travel.map(|t| t.access),
            location_missing: p.location.is_null_island(),

            comment: p.comment.clone(),
        }
    }
}

/// The complete JSON document: config, summary, and every facility.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument<'a> {
    pub config: &'a TerritoryConfig,
    pub summary: &'a TerritorySummary,
    pub hospitals: Vec<FacilityView>,
}

impl<'a> ReportDocument<'a> {
    #[must_use]
    pub fn new(report: &'a TerritoryReport, config: &'a TerritoryConfig) -> Self {
        Self {
            config,
            summary: &report.summary,
            hospitals: facility_views(&report.facilities),
        }
    }
}

/// Views for every facility, in the given order.
#[must_use]
pub fn facility_views(facilities: &[Facility]) -> Vec<FacilityView> {
    facilities.iter().map(FacilityView::from).collect()
}

#[cfg(test)]
mod tests {
    use territory_map_facility_models::{Coordinates, FacilityProfile};

    use super::*;

    #[test]
    fn unenriched_facility_has_neutral_derived_fields() {
        let facility = Facility::new(FacilityProfile {
            name: "Ascension St. Vincent's Riverside".to_string(),
            certification: Certification::Primary,
            location: Coordinates::new(30.3072, -81.6897),
            ..FacilityProfile::default()
        });
        let view = FacilityView::from(&facility);

        assert_eq!(view.score, 0);
        assert!(view.tier.is_none());
        assert_eq!(view.certification_label, "Primary Stroke Center");
        assert_eq!(view.certification_color, "#F59E0B");
        assert!(!view.location_missing);
    }

    #[test]
    fn serializes_allow_listed_camel_case_fields() {
        let view = FacilityView::from(&Facility::default());
        let json = serde_json::to_value(&view).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("shortName"));
        assert!(object.contains_key("mtEligible"));
        assert!(object.contains_key("closestTeamMember"));
        assert!(object.contains_key("locationMissing"));
        assert!(!object.contains_key("profile"));
        assert!(!object.contains_key("components"));
        assert_eq!(json["certification"], "None");
        assert_eq!(json["locationMissing"], true);
    }
}
