//! Territory-level roll-up of an enriched facility set.

use std::collections::BTreeMap;

use serde::Serialize;
use territory_map_facility_models::{Certification, Coordinates, Facility, Segment, Tier};

use crate::revenue::growth_pct;

/// Aggregate figures for one territory run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerritorySummary {
    pub facility_count: usize,
    pub tier_counts: BTreeMap<Tier, usize>,
    pub segment_counts: BTreeMap<Segment, usize>,
    pub certification_counts: BTreeMap<Certification, usize>,
    /// Mean composite score, rounded.
    pub average_score: u8,
    pub total_prior_revenue: u64,
    pub total_ytd_revenue: u64,
    pub total_annualized_revenue: u64,
    /// Growth of the annualized total over the prior total, one decimal.
    pub territory_yoy_pct: f64,
    /// Facilities without usable coordinates.
    pub missing_locations: usize,
    /// Map centre: the configured one, or the mean facility location.
    pub map_center: Coordinates,
}

impl TerritorySummary {
    /// Summarizes `facilities`. `configured_center` of `None` requests the
    /// mean of every located facility (falling back to `(0, 0)`).
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn build(facilities: &[Facility], configured_center: Option<Coordinates>) -> Self {
        let mut tier_counts: BTreeMap<Tier, usize> =
            Tier::all().iter().map(|&t| (t, 0)).collect();
        let mut segment_counts: BTreeMap<Segment, usize> =
            Segment::all().iter().map(|&s| (s, 0)).collect();
        let mut certification_counts: BTreeMap<Certification, usize> =
            Certification::all().iter().map(|&c| (c, 0)).collect();

        let mut score_total = 0_u64;
        let mut total_prior_revenue = 0_u64;
        let mut total_ytd_revenue = 0_u64;
        let mut total_annualized_revenue = 0_u64;

        for facility in facilities {
            if let Some(tier) = &facility.tier {
                *tier_counts.entry(tier.tier).or_default() += 1;
            }
            if let Some(score) = &facility.score {
                *segment_counts.entry(score.segment).or_default() += 1;
                score_total = score_total.saturating_add(u64::from(score.score));
            }
            *certification_counts
                .entry(facility.profile.certification)
                .or_default() += 1;

            // Revenue cells may already sit at u64::MAX.
            total_prior_revenue =
                total_prior_revenue.saturating_add(facility.profile.revenue.prior_period);
            total_ytd_revenue =
                total_ytd_revenue.saturating_add(facility.profile.revenue.year_to_date);
            total_annualized_revenue =
                total_annualized_revenue.saturating_add(facility.annualized_revenue());
        }

        let located: Vec<Coordinates> = facilities
            .iter()
            .map(|f| f.profile.location)
            .filter(|c| !c.is_null_island())
            .collect();

        let map_center = configured_center.unwrap_or_else(|| centroid(&located));

        let average_score = if facilities.is_empty() {
            0
        } else {
            (score_total as f64 / facilities.len() as f64)
                .round_ties_even()
                .min(100.0) as u8
        };

        Self {
            facility_count: facilities.len(),
            tier_counts,
            segment_counts,
            certification_counts,
            average_score,
            total_prior_revenue,
            total_ytd_revenue,
            total_annualized_revenue,
            territory_yoy_pct: growth_pct(total_annualized_revenue, total_prior_revenue),
            missing_locations: facilities.len() - located.len(),
            map_center,
        }
    }

    /// Writes the summary to the log at `info`.
    pub fn log(&self) {
        log::info!(
            "{} facilities, average score {}, tiers 1/2/3 = {}/{}/{}",
            self.facility_count,
            self.average_score,
            self.count_for_tier(Tier::One),
            self.count_for_tier(Tier::Two),
            self.count_for_tier(Tier::Three),
        );
        log::info!(
            "Revenue: prior {} / YTD {} / annualized {} ({:+.1}% YoY)",
            self.total_prior_revenue,
            self.total_ytd_revenue,
            self.total_annualized_revenue,
            self.territory_yoy_pct
        );
        if self.missing_locations > 0 {
            log::warn!(
                "{} facilities have no coordinates and are left off the map",
                self.missing_locations
            );
        }
    }

    #[must_use]
    pub fn count_for_tier(&self, tier: Tier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn count_for_segment(&self, segment: Segment) -> usize {
        self.segment_counts.get(&segment).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn count_for_certification(&self, certification: Certification) -> usize {
        self.certification_counts
            .get(&certification)
            .copied()
            .unwrap_or(0)
    }
}

#[allow(clippy::cast_precision_loss)]
fn centroid(points: &[Coordinates]) -> Coordinates {
    if points.is_empty() {
        return Coordinates::default();
    }
    let n = points.len() as f64;
    Coordinates::new(
        points.iter().map(|c| c.lat).sum::<f64>() / n,
        points.iter().map(|c| c.lng).sum::<f64>() / n,
    )
}

#[cfg(test)]
mod tests {
    use territory_map_facility_models::{
        CompositeScore, FacilityProfile, RevenueFigures, RevenueProjection, ScoringMode,
        TierAssignment,
    };

    use super::*;

    fn enriched(lat: f64, lng: f64, score: u8, tier: Tier, prior: u64, annualized: u64) -> Facility {
        let segment = Segment::from_score(score);
        Facility {
            profile: FacilityProfile {
                location: Coordinates::new(lat, lng),
                revenue: RevenueFigures {
                    prior_period: prior,
                    year_to_date: annualized / 2,
                },
                ..FacilityProfile::default()
            },
            revenue_projection: Some(RevenueProjection {
                annualized,
                yoy_growth_pct: 0.0,
            }),
            score: Some(CompositeScore {
                mode: ScoringMode::Commercial,
                score,
                segment,
                strategy: segment.strategy().to_string(),
                components: Vec::new(),
            }),
            tier: Some(TierAssignment {
                tier,
                label: String::new(),
                rank: 0,
            }),
            ..Facility::default()
        }
    }

    #[test]
    fn rolls_up_counts_and_revenue() {
        let facilities = vec![
            enriched(30.0, -81.0, 80, Tier::One, 100_000, 120_000),
            enriched(29.0, -82.0, 55, Tier::Two, 50_000, 40_000),
            enriched(0.0, 0.0, 20, Tier::Three, 50_000, 60_000),
        ];
        let summary = TerritorySummary::build(&facilities, None);

        assert_eq!(summary.facility_count, 3);
        assert_eq!(summary.count_for_tier(Tier::Two), 1);
        assert_eq!(summary.count_for_segment(Segment::High), 1);
        assert_eq!(summary.count_for_segment(Segment::Low), 1);
        assert_eq!(summary.count_for_certification(Certification::None), 3);
        assert_eq!(summary.count_for_certification(Certification::Primary), 0);
        assert_eq!(summary.average_score, 52);
        assert_eq!(summary.total_prior_revenue, 200_000);
        assert_eq!(summary.total_annualized_revenue, 220_000);
        assert!((summary.territory_yoy_pct - 10.0).abs() < 1e-9);
        assert_eq!(summary.missing_locations, 1);
        assert!((summary.map_center.lat - 29.5).abs() < 1e-9);
        assert!((summary.map_center.lng + 81.5).abs() < 1e-9);
    }

    #[test]
    fn revenue_totals_saturate() {
        let facilities = vec![
            enriched(30.0, -81.0, 100, Tier::One, u64::MAX, u64::MAX),
            enriched(29.0, -82.0, 100, Tier::Two, u64::MAX, u64::MAX),
        ];
        let summary = TerritorySummary::build(&facilities, None);

        assert_eq!(summary.total_prior_revenue, u64::MAX);
        assert_eq!(summary.total_ytd_revenue, u64::MAX - 1);
        assert_eq!(summary.total_annualized_revenue, u64::MAX);
        assert_eq!(summary.average_score, 100);
        assert!(summary.territory_yoy_pct.abs() < f64::EPSILON);
    }

    #[test]
    fn configured_center_wins() {
        let facilities = vec![enriched(30.0, -81.0, 80, Tier::One, 0, 0)];
        let summary = TerritorySummary::build(&facilities, Some(Coordinates::new(33.0, -83.0)));
        assert!((summary.map_center.lat - 33.0).abs() < f64::EPSILON);
        assert!(summary.territory_yoy_pct.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_set() {
        let summary = TerritorySummary::build(&[], None);
        assert_eq!(summary.facility_count, 0);
        assert_eq!(summary.average_score, 0);
        assert!(summary.map_center.is_null_island());
        assert_eq!(summary.tier_counts.len(), 3);
    }

    #[test]
    fn serializes_count_maps_with_readable_keys() {
        let summary = TerritorySummary::build(&[], None);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["tierCounts"]["1"], 0);
        assert_eq!(json["segmentCounts"]["HIGH"], 0);
        assert_eq!(json["certificationCounts"]["CSC"], 0);
    }
}
