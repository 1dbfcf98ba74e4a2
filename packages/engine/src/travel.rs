//! Nearest team base and drive-time estimates.

use territory_map_config::TeamBase;
use territory_map_facility_models::{AccessCategory, Coordinates, TravelEstimate};

use crate::epidemiology::round_1dp;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Multiplier from great-circle to approximate road distance.
pub const ROAD_FACTOR: f64 = 1.3;

/// Assumed average driving speed.
pub const AVERAGE_SPEED_MPH: f64 = 55.0;

/// Great-circle distance between two points, in miles.
#[must_use]
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_MILES * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Drive time in whole minutes for a road distance.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn travel_minutes(road_miles: f64) -> u32 {
    let minutes = (road_miles / AVERAGE_SPEED_MPH * 60.0).round_ties_even();
    if minutes.is_finite() && minutes > 0.0 {
        minutes.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// The base closest to `location`, with its great-circle distance. The first
/// base wins a tie. `None` only when `bases` is empty.
#[must_use]
pub fn nearest_base(location: Coordinates, bases: &[TeamBase]) -> Option<(&TeamBase, f64)> {
    let mut best: Option<(&TeamBase, f64)> = None;
    for base in bases {
        let distance = haversine_miles(base.location, location);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((base, distance));
        }
    }
    best
}

/// Resolves travel from the nearest base to `location`.
#[must_use]
pub fn resolve(location: Coordinates, bases: &[TeamBase]) -> Option<TravelEstimate> {
    let (base, distance) = nearest_base(location, bases)?;
    let road = distance * ROAD_FACTOR;
    let minutes = travel_minutes(road);

    Some(TravelEstimate {
        distance_miles: round_1dp(distance),
        road_miles: round_1dp(road),
        travel_time_min: minutes,
        closest_team_member: base.name.clone(),
        closest_team_role: base.role.clone(),
        access: AccessCategory::from_minutes(minutes),
        location_missing: location.is_null_island(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(name: &str, lat: f64, lng: f64) -> TeamBase {
        TeamBase {
            name: name.to_string(),
            role: "CAS".to_string(),
            location: Coordinates::new(lat, lng),
        }
    }

    #[test]
    fn same_point_is_local() {
        let bases = [base("Rep", 30.0, -81.0)];
        let estimate = resolve(Coordinates::new(30.0, -81.0), &bases).unwrap();
        assert!(estimate.distance_miles.abs() < f64::EPSILON);
        assert_eq!(estimate.travel_time_min, 0);
        assert_eq!(estimate.access, AccessCategory::Local);
        assert_eq!(estimate.closest_team_member, "Rep");
        assert!(!estimate.location_missing);
    }

    #[test]
    fn jacksonville_to_gainesville() {
        let jacksonville = Coordinates::new(30.3322, -81.6557);
        let gainesville = Coordinates::new(29.6516, -82.3248);
        let miles = haversine_miles(jacksonville, gainesville);
        assert!((miles - 61.8).abs() < 0.5, "{miles}");

        let estimate = resolve(gainesville, &[base("Rep", 30.3322, -81.6557)]).unwrap();
        assert_eq!(estimate.access, AccessCategory::Short);
    }

    #[test]
    fn nearest_base_wins_and_first_wins_ties() {
        let bases = [
            base("North", 31.0, -81.0),
            base("South", 29.0, -81.0),
            base("Near", 30.1, -81.0),
        ];
        let (closest, _) = nearest_base(Coordinates::new(30.0, -81.0), &bases).unwrap();
        assert_eq!(closest.name, "Near");

        let tied = [base("First", 31.0, -81.0), base("Second", 29.0, -81.0)];
        let (closest, _) = nearest_base(Coordinates::new(30.0, -81.0), &tied).unwrap();
        assert_eq!(closest.name, "First");
    }

    #[test]
    fn no_bases_resolves_nothing() {
        assert!(resolve(Coordinates::new(30.0, -81.0), &[]).is_none());
    }

    #[test]
    fn missing_location_is_flagged() {
        let estimate = resolve(Coordinates::default(), &[base("Rep", 30.0, -81.0)]).unwrap();
        assert!(estimate.location_missing);
        assert_eq!(estimate.access, AccessCategory::FlightRequired);
    }

    #[test]
    fn travel_time_is_monotonic_in_distance() {
        let origin = Coordinates::new(30.0, -81.0);
        let bases = [base("Rep", origin.lat, origin.lng)];
        let mut last = 0;
        for step in 0..60 {
            let target = Coordinates::new(30.0 + f64::from(step) * 0.1, -81.0);
            let minutes = resolve(target, &bases).unwrap().travel_time_min;
            assert!(minutes >= last);
            last = minutes;
        }
    }
}
