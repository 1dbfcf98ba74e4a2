//! Commercial (TPS) scoring: clinical volume plus revenue momentum and rank.

use territory_map_config::CommercialWeights;
use territory_map_facility_models::{Facility, ScoreComponent, ScoringMode, Tier};

use super::{ScoringStrategy, SetStatistics, SortKey, component};

#[derive(Debug, Clone, Copy, Default)]
pub struct CommercialStrategy {
    weights: CommercialWeights,
}

impl CommercialStrategy {
    #[must_use]
    pub const fn new(weights: CommercialWeights) -> Self {
        Self { weights }
    }

    /// Momentum award for projected revenue against the prior period.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn momentum(&self, annualized: u64, prior: u64) -> f64 {
        let w = &self.weights;
        let annualized = annualized as f64;
        let prior = prior as f64;

        if annualized > prior * (1.0 + w.momentum_band) {
            w.momentum_growth
        } else if annualized >= prior * (1.0 - w.momentum_band) {
            w.momentum_flat
        } else {
            w.momentum_decline
        }
    }
}

impl ScoringStrategy for CommercialStrategy {
    fn mode(&self) -> ScoringMode {
        ScoringMode::Commercial
    }

    fn components(&self, facility: &Facility, stats: &SetStatistics) -> Vec<ScoreComponent> {
        let w = &self.weights;
        let profile = &facility.profile;

        let fellowships = [profile.nsg_fellowship, profile.nir_fellowship]
            .iter()
            .filter(|&&f| f)
            .count();

        let revenue_rank = stats.revenue_quartiles.map_or(w.revenue_rank[3], |q| {
            w.revenue_rank[q.bucket(profile.revenue.prior_period)]
        });

        let momentum_max = w
            .momentum_growth
            .max(w.momentum_flat)
            .max(w.momentum_decline);
        let rank_max = w.revenue_rank.iter().copied().fold(0.0, f64::max);

        vec![
            component(
                "stroke_volume",
                f64::from(profile.strokes_per_year) / stats.max_strokes * w.stroke_volume,
                w.stroke_volume,
            ),
            component(
                "beds",
                f64::from(profile.beds) / stats.max_beds * w.beds,
                w.beds,
            ),
            component(
                "certification",
                w.certification.points(profile.certification),
                w.certification.max(),
            ),
            component(
                "fellowship",
                f64::from(u8::try_from(fellowships).unwrap_or(2)) * w.fellowship_each,
                2.0 * w.fellowship_each,
            ),
            component(
                "momentum",
                self.momentum(facility.annualized_revenue(), profile.revenue.prior_period),
                momentum_max,
            ),
            component("revenue_rank", revenue_rank, rank_max),
        ]
    }

    #[allow(clippy::cast_precision_loss)]
    fn sort_key(&self, facility: &Facility) -> SortKey {
        SortKey {
            primary: facility.profile.revenue.prior_period as f64,
            secondary: f64::from(facility.score_value()),
        }
    }

    fn tier_label(&self, tier: Tier) -> &'static str {
        match tier {
            Tier::One => "Strategic Account",
            Tier::Two => "Growth Account",
            Tier::Three => "Maintain Account",
        }
    }
}

#[cfg(test)]
mod tests {
    use territory_map_facility_models::{Certification, RevenueProjection};

    use super::super::score_all;
    use super::super::test_support::facility;
    use super::*;

    fn with_projection(mut f: Facility, annualized: u64) -> Facility {
        f.revenue_projection = Some(RevenueProjection {
            annualized,
            yoy_growth_pct: 0.0,
        });
        f
    }

    #[test]
    fn momentum_bands() {
        let strategy = CommercialStrategy::default();
        assert!((strategy.momentum(106, 100) - 15.0).abs() < f64::EPSILON);
        assert!((strategy.momentum(105, 100) - 8.0).abs() < f64::EPSILON);
        assert!((strategy.momentum(95, 100) - 8.0).abs() < f64::EPSILON);
        assert!((strategy.momentum(94, 100) - 3.0).abs() < f64::EPSILON);
        // No prior revenue: any projected revenue counts as growth.
        assert!((strategy.momentum(1, 0) - 15.0).abs() < f64::EPSILON);
        assert!((strategy.momentum(0, 0) - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unrecognized_certification_scores_three() {
        let f = facility(|p| p.certification = Certification::normalize("Foo"));
        let stats = SetStatistics::from_facilities(std::slice::from_ref(&f));
        let components = CommercialStrategy::default().components(&f, &stats);
        let cert = components.iter().find(|c| c.name == "certification").unwrap();
        assert!((cert.points - 3.0).abs() < f64::EPSILON);
        assert!((cert.max_points - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn best_in_set_scores_full_marks() {
        let leader = with_projection(
            facility(|p| {
                p.strokes_per_year = 1250;
                p.beds = 1162;
                p.certification = Certification::Comprehensive;
                p.nsg_fellowship = true;
                p.nir_fellowship = true;
                p.revenue.prior_period = 500_000;
            }),
            600_000,
        );
        let small = with_projection(
            facility(|p| {
                p.strokes_per_year = 100;
                p.beds = 25;
                p.revenue.prior_period = 10_000;
            }),
            5_000,
        );

        let mut set = vec![leader, small];
        score_all(&CommercialStrategy::default(), &mut set);

        // 25 + 15 + 20 + 15 + 15 + 10
        assert_eq!(set[0].score_value(), 100);
        // 2 + 0.32 + 3 + 0 + 3 + 2 = 10.32
        assert_eq!(set[1].score_value(), 10);
        assert_eq!(set[1].score.as_ref().unwrap().components.len(), 6);
    }

    #[test]
    fn stroke_volume_score_is_monotonic() {
        let strategy = CommercialStrategy::default();
        let reference = facility(|p| p.strokes_per_year = 1000);
        let mut last = 0.0;
        for strokes in (0..=1000).step_by(100) {
            let f = facility(|p| p.strokes_per_year = strokes);
            let stats = SetStatistics::from_facilities(&[reference.clone(), f.clone()]);
            let total: f64 = strategy.components(&f, &stats).iter().map(|c| c.points).sum();
            assert!(total >= last);
            last = total;
        }
    }

    #[test]
    fn sorts_by_prior_revenue_then_score() {
        let strategy = CommercialStrategy::default();
        let f = facility(|p| p.revenue.prior_period = 42);
        let key = strategy.sort_key(&f);
        assert!((key.primary - 42.0).abs() < f64::EPSILON);
        assert!(key.secondary.abs() < f64::EPSILON);
        assert_eq!(strategy.tier_label(Tier::One), "Strategic Account");
    }
}
