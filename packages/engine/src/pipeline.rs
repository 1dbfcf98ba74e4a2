//! End-to-end enrichment of a facility set.

use chrono::NaiveDate;
use territory_map_config::{TeamBase, TerritoryConfig};
use territory_map_facility_models::{
    Coordinates, Facility, FacilityProfile, RawRecord, ScoringMode,
};

use crate::epidemiology::EpidemiologyEstimator;
use crate::normalize::normalize_record;
use crate::revenue;
use crate::scoring::{ScoringStrategy, score_all, strategy_for};
use crate::summary::TerritorySummary;
use crate::tiering::assign_tiers;
use crate::travel;

/// The engine's output: every facility, fully enriched, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryReport {
    pub mode: ScoringMode,
    pub evaluation_date: NaiveDate,
    /// Facilities sorted by the scoring scheme's key, best first.
    pub facilities: Vec<Facility>,
    pub summary: TerritorySummary,
}

/// Runs normalize → estimate → score → tier → travel over a record set.
pub struct Engine {
    estimator: EpidemiologyEstimator,
    strategy: Box<dyn ScoringStrategy>,
    bases: Vec<TeamBase>,
    map_center: Option<Coordinates>,
}

impl Engine {
    /// Builds an engine from a territory config and scoring mode.
    #[must_use]
    pub fn new(config: &TerritoryConfig, mode: ScoringMode) -> Self {
        let map_center = (!config.wants_auto_center())
            .then(|| Coordinates::new(config.map_center_lat, config.map_center_lng));

        Self {
            estimator: EpidemiologyEstimator::new(config.epidemiology),
            strategy: strategy_for(mode, config),
            bases: config.team_bases(),
            map_center,
        }
    }

    /// Builds an engine around an explicit strategy.
    #[must_use]
    pub fn with_strategy(
        estimator: EpidemiologyEstimator,
        strategy: Box<dyn ScoringStrategy>,
        bases: Vec<TeamBase>,
    ) -> Self {
        Self {
            estimator,
            strategy,
            bases,
            map_center: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ScoringMode {
        self.strategy.mode()
    }

    /// Normalizes and enriches raw records. `evaluation_date` drives revenue
    /// annualization.
    #[must_use]
    pub fn run(&self, records: &[RawRecord], evaluation_date: NaiveDate) -> TerritoryReport {
        let profiles = records.iter().map(normalize_record).collect();
        self.evaluate(profiles, evaluation_date)
    }

    /// Enriches already-normalized profiles.
    #[must_use]
    pub fn evaluate(
        &self,
        profiles: Vec<FacilityProfile>,
        evaluation_date: NaiveDate,
    ) -> TerritoryReport {
        log::info!(
            "Evaluating {} facilities ({} scoring, as of {evaluation_date})",
            profiles.len(),
            self.mode()
        );

        let mut facilities: Vec<Facility> = profiles
            .into_iter()
            .map(|profile| {
                let mut facility = Facility::new(profile);
                facility.epidemiology =
                    Some(self.estimator.estimate(&facility.profile.demographics));
                facility.revenue_projection =
                    Some(revenue::project(&facility.profile.revenue, evaluation_date));
                facility
            })
            .collect();

        score_all(self.strategy.as_ref(), &mut facilities);
        assign_tiers(self.strategy.as_ref(), &mut facilities);

        for facility in &mut facilities {
            let location = facility.profile.location;
            if location.is_null_island() {
                log::warn!(
                    "{} has no coordinates; travel is measured from (0, 0)",
                    facility.profile.name
                );
            }
            facility.travel = travel::resolve(location, &self.bases);
            if facility.travel.is_none() {
                log::warn!(
                    "No team bases configured; skipping travel for {}",
                    facility.profile.name
                );
            }
        }

        facilities.sort_by_key(|f| f.tier.as_ref().map_or(usize::MAX, |t| t.rank));

        let summary = TerritorySummary::build(&facilities, self.map_center);
        summary.log();

        TerritoryReport {
            mode: self.mode(),
            evaluation_date,
            facilities,
            summary,
        }
    }
}
