//! Composite facility scoring.
//!
//! Both schemes implement [`ScoringStrategy`]; they only produce weighted
//! components and a tier sort key. Summing, clamping, and segmenting happen
//! once, in [`score_facility`].

pub mod commercial;
pub mod infrastructure;

use territory_map_config::TerritoryConfig;
use territory_map_facility_models::{
    CompositeScore, Facility, ScoreComponent, ScoringMode, Segment, Tier,
};

pub use commercial::CommercialStrategy;
pub use infrastructure::InfrastructureStrategy;

/// Two-level descending sort key used by the tier classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortKey {
    pub primary: f64,
    pub secondary: f64,
}

impl SortKey {
    /// Descending comparison: the larger key sorts first.
    #[must_use]
    pub fn cmp_desc(&self, other: &Self) -> std::cmp::Ordering {
        other
            .primary
            .total_cmp(&self.primary)
            .then_with(|| other.secondary.total_cmp(&self.secondary))
    }
}

/// Revenue-rank thresholds taken from prior-period revenue sorted descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueQuartiles {
    pub q1: u64,
    pub q2: u64,
    pub q3: u64,
}

impl RevenueQuartiles {
    /// Computes thresholds for a set of values. With fewer than four values
    /// every threshold is the set maximum. `None` for an empty set.
    #[must_use]
    pub fn from_values(values: &[u64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        let n = sorted.len();

        match n {
            0 => None,
            1..=3 => Some(Self {
                q1: sorted[0],
                q2: sorted[0],
                q3: sorted[0],
            }),
            _ => Some(Self {
                q1: sorted[n / 4],
                q2: sorted[n / 2],
                q3: sorted[3 * n / 4],
            }),
        }
    }

    /// Zero-based bucket: 0 for the top quartile through 3 for the bottom.
    #[must_use]
    pub const fn bucket(&self, value: u64) -> usize {
        if value >= self.q1 {
            0
        } else if value >= self.q2 {
            1
        } else if value >= self.q3 {
            2
        } else {
            3
        }
    }
}

/// Set-wide statistics computed in one pass before per-record scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetStatistics {
    /// Largest stroke volume in the set, or 1 when that is 0.
    pub max_strokes: f64,
    /// Largest bed count in the set, or 1 when that is 0.
    pub max_beds: f64,
    /// Prior-revenue thresholds, `None` for an empty set.
    pub revenue_quartiles: Option<RevenueQuartiles>,
}

impl SetStatistics {
    #[must_use]
    pub fn from_facilities(facilities: &[Facility]) -> Self {
        let revenues: Vec<u64> = facilities
            .iter()
            .map(|f| f.profile.revenue.prior_period)
            .collect();

        Self {
            max_strokes: max_or_one(facilities.iter().map(|f| f.profile.strokes_per_year)),
            max_beds: max_or_one(facilities.iter().map(|f| f.profile.beds)),
            revenue_quartiles: RevenueQuartiles::from_values(&revenues),
        }
    }
}

fn max_or_one(values: impl Iterator<Item = u32>) -> f64 {
    f64::from(values.max().filter(|&m| m > 0).unwrap_or(1))
}

/// A composite scoring scheme.
pub trait ScoringStrategy {
    /// The scheme this strategy implements.
    fn mode(&self) -> ScoringMode;

    /// Weighted components for one facility, relative to `stats`.
    fn components(&self, facility: &Facility, stats: &SetStatistics) -> Vec<ScoreComponent>;

    /// Key the tier classifier sorts by, descending. Called after scoring.
    fn sort_key(&self, facility: &Facility) -> SortKey;

    /// Label for each tier.
    fn tier_label(&self, tier: Tier) -> &'static str;
}

/// Rounds a raw component sum and clamps it to `[0, 100]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round_ties_even().clamp(0.0, 100.0) as u8
}

/// Scores one facility.
#[must_use]
pub fn score_facility(
    strategy: &dyn ScoringStrategy,
    facility: &Facility,
    stats: &SetStatistics,
) -> CompositeScore {
    let components = strategy.components(facility, stats);
    let score = clamp_score(components.iter().map(|c| c.points).sum());
    let segment = Segment::from_score(score);

    CompositeScore {
        mode: strategy.mode(),
        score,
        segment,
        strategy: segment.strategy().to_string(),
        components,
    }
}

/// Scores every facility in the set, filling in each one's score slot.
pub fn score_all(strategy: &dyn ScoringStrategy, facilities: &mut [Facility]) {
    let stats = SetStatistics::from_facilities(facilities);
    log::debug!(
        "Scoring {} facilities ({}): max strokes {}, max beds {}",
        facilities.len(),
        strategy.mode(),
        stats.max_strokes,
        stats.max_beds
    );

    for facility in facilities.iter_mut() {
        facility.score = Some(score_facility(strategy, facility, &stats));
    }
}

/// Builds the strategy for `mode` with the weights from `config`.
#[must_use]
pub fn strategy_for(mode: ScoringMode, config: &TerritoryConfig) -> Box<dyn ScoringStrategy> {
    match mode {
        ScoringMode::Commercial => Box::new(CommercialStrategy::new(config.commercial_weights)),
        ScoringMode::Infrastructure => {
            Box::new(InfrastructureStrategy::new(config.infrastructure_weights))
        }
    }
}

pub(crate) fn component(name: &str, points: f64, max_points: f64) -> ScoreComponent {
    ScoreComponent {
        name: name.to_string(),
        points,
        max_points,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::facility;
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_score(108.0), 100);
        assert_eq!(clamp_score(-4.0), 0);
        assert_eq!(clamp_score(69.5), 70);
        assert_eq!(clamp_score(70.5), 70);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn quartiles_for_small_sets_collapse_to_max() {
        let q = RevenueQuartiles::from_values(&[100, 300, 200]).unwrap();
        assert_eq!(q, RevenueQuartiles { q1: 300, q2: 300, q3: 300 });
        assert_eq!(q.bucket(300), 0);
        assert_eq!(q.bucket(200), 3);
        assert!(RevenueQuartiles::from_values(&[]).is_none());
    }

    #[test]
    fn quartiles_index_descending_values() {
        let values: Vec<u64> = (1..=8).map(|v| v * 100).collect();
        let q = RevenueQuartiles::from_values(&values).unwrap();
        // sorted desc: 800 700 600 500 400 300 200 100
        assert_eq!(q, RevenueQuartiles { q1: 600, q2: 400, q3: 200 });
        assert_eq!(q.bucket(800), 0);
        assert_eq!(q.bucket(500), 1);
        assert_eq!(q.bucket(300), 2);
        assert_eq!(q.bucket(100), 3);
    }

    #[test]
    fn zero_maxima_become_one() {
        let stats = SetStatistics::from_facilities(&[facility(|_| {})]);
        assert!((stats.max_strokes - 1.0).abs() < f64::EPSILON);
        assert!((stats.max_beds - 1.0).abs() < f64::EPSILON);

        let empty = SetStatistics::from_facilities(&[]);
        assert!((empty.max_beds - 1.0).abs() < f64::EPSILON);
        assert!(empty.revenue_quartiles.is_none());
    }

    #[test]
    fn score_all_on_empty_set_is_a_no_op() {
        let config = TerritoryConfig::default();
        for mode in [ScoringMode::Commercial, ScoringMode::Infrastructure] {
            let mut facilities: Vec<Facility> = Vec::new();
            score_all(strategy_for(mode, &config).as_ref(), &mut facilities);
            assert!(facilities.is_empty());
        }
    }

    #[test]
    fn sort_key_orders_descending() {
        let high = SortKey { primary: 10.0, secondary: 0.0 };
        let low = SortKey { primary: 5.0, secondary: 99.0 };
        let tie_break = SortKey { primary: 10.0, secondary: 1.0 };
        assert_eq!(high.cmp_desc(&low), std::cmp::Ordering::Less);
        assert_eq!(tie_break.cmp_desc(&high), std::cmp::Ordering::Less);
    }
}
