//! `GeoJSON` export of located facilities.

use serde_json::Value;
use territory_map_facility_models::Facility;

use crate::view::FacilityView;

/// Builds a `FeatureCollection` of Point features. Facilities without
/// coordinates are left out.
#[must_use]
pub fn feature_collection(facilities: &[Facility]) -> Value {
    let features: Vec<Value> = facilities
        .iter()
        .map(FacilityView::from)
        .filter(|view| !view.location_missing)
        .map(|view| feature(&view))
        .collect();

    log::debug!(
        "Built {} GeoJSON features ({} skipped without coordinates)",
        features.len(),
        facilities.len() - features.len()
    );

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn feature(view: &FacilityView) -> Value {
    serde_json::json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [view.lng, view.lat]
        },
        "properties": {
            "name": view.name,
            "shortName": view.short_name,
            "city": view.city,
            "state": view.state,
            "certification": view.certification,
            "color": view.certification_color,
            "beds": view.beds,
            "strokesPerYear": view.strokes_per_year,
            "score": view.score,
            "segment": view.segment,
            "tier": view.tier,
            "tierLabel": view.tier_label,
            "travelTimeMin": view.travel_time_min,
            "access": view.access,
            "closestTeamMember": view.closest_team_member,
        }
    })
}
