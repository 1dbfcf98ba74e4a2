//! Set-relative tier assignment.

use territory_map_facility_models::{Facility, Tier, TierAssignment};

use crate::scoring::ScoringStrategy;

/// Exclusive rank bounds for tiers 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierBoundaries {
    pub tier_1_end: usize,
    pub tier_2_end: usize,
}

impl TierBoundaries {
    /// Boundaries for a ranked set of `n` facilities.
    #[must_use]
    pub fn for_count(n: usize) -> Self {
        Self {
            tier_1_end: n.div_ceil(3).max(1),
            tier_2_end: (2 * n).div_ceil(3).max(2),
        }
    }

    #[must_use]
    pub const fn tier_for_rank(&self, rank: usize) -> Tier {
        if rank < self.tier_1_end {
            Tier::One
        } else if rank < self.tier_2_end {
            Tier::Two
        } else {
            Tier::Three
        }
    }
}

/// Indices of `facilities` ordered by the strategy's key, descending. Equal
/// keys keep input order.
#[must_use]
pub fn ranked_order(strategy: &dyn ScoringStrategy, facilities: &[Facility]) -> Vec<usize> {
    let keys: Vec<_> = facilities.iter().map(|f| strategy.sort_key(f)).collect();
    let mut order: Vec<usize> = (0..facilities.len()).collect();
    order.sort_by(|&a, &b| keys[a].cmp_desc(&keys[b]));
    order
}

/// Assigns every scored facility a tier, label, and rank.
pub fn assign_tiers(strategy: &dyn ScoringStrategy, facilities: &mut [Facility]) {
    let bounds = TierBoundaries::for_count(facilities.len());
    let order = ranked_order(strategy, facilities);

    for (rank, index) in order.into_iter().enumerate() {
        let tier = bounds.tier_for_rank(rank);
        facilities[index].tier = Some(TierAssignment {
            tier,
            label: strategy.tier_label(tier).to_string(),
            rank,
        });
    }
}

#[cfg(test)]
mod tests {
    use territory_map_facility_models::{CompositeScore, ScoringMode, Segment};

    use super::*;
    use crate::scoring::InfrastructureStrategy;
    use crate::scoring::test_support::facility;

    fn scored(name: &str, score: u8) -> Facility {
        let mut f = facility(|p| p.name = name.to_string());
        let segment = Segment::from_score(score);
        f.score = Some(CompositeScore {
            mode: ScoringMode::Infrastructure,
            score,
            segment,
            strategy: segment.strategy().to_string(),
            components: Vec::new(),
        });
        f
    }

    fn tiers(facilities: &[Facility]) -> Vec<u8> {
        facilities
            .iter()
            .map(|f| f.tier.as_ref().unwrap().tier.value())
            .collect()
    }

    #[test]
    fn boundaries_for_small_sets() {
        assert_eq!(
            TierBoundaries::for_count(0),
            TierBoundaries { tier_1_end: 1, tier_2_end: 2 }
        );
        assert_eq!(
            TierBoundaries::for_count(1),
            TierBoundaries { tier_1_end: 1, tier_2_end: 2 }
        );
        assert_eq!(
            TierBoundaries::for_count(3),
            TierBoundaries { tier_1_end: 1, tier_2_end: 2 }
        );
        assert_eq!(
            TierBoundaries::for_count(10),
            TierBoundaries { tier_1_end: 4, tier_2_end: 7 }
        );
    }

    #[test]
    fn single_facility_is_tier_one() {
        let mut set = vec![scored("A", 12)];
        assign_tiers(&InfrastructureStrategy::default(), &mut set);
        assert_eq!(tiers(&set), vec![1]);
    }

    #[test]
    fn two_facilities_split_across_tiers() {
        let mut set = vec![scored("B", 10), scored("A", 90)];
        assign_tiers(&InfrastructureStrategy::default(), &mut set);

        let a = set[1].tier.as_ref().unwrap();
        let b = set[0].tier.as_ref().unwrap();
        assert_eq!(a.tier, Tier::One);
        assert_eq!(a.rank, 0);
        assert_eq!(a.label, "High Complexity Hub");
        assert!(b.tier > a.tier);
    }

    #[test]
    fn three_facilities_fill_every_tier() {
        let mut set = vec![scored("A", 30), scored("B", 60), scored("C", 90)];
        assign_tiers(&InfrastructureStrategy::default(), &mut set);
        assert_eq!(tiers(&set), vec![3, 2, 1]);
    }

    #[test]
    fn ties_keep_input_order() {
        let set = vec![scored("A", 50), scored("B", 50), scored("C", 50)];
        let order = ranked_order(&InfrastructureStrategy::default(), &set);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn every_facility_gets_exactly_one_tier() {
        for n in 0..25_u8 {
            let mut set: Vec<Facility> = (0..n).map(|i| scored("X", i * 4)).collect();
            assign_tiers(&InfrastructureStrategy::default(), &mut set);
            assert!(set.iter().all(|f| f.tier.is_some()));
            if n >= 3 {
                for tier in Tier::all() {
                    assert!(set.iter().any(|f| f.tier.as_ref().unwrap().tier == *tier));
                }
            }
        }
    }
}
