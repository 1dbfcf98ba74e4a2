//! Age-weighted stroke incidence estimates for a facility catchment.

use territory_map_config::EpidemiologyRates;
use territory_map_facility_models::{Demographics, Epidemiology};

const PER_100K: f64 = 100_000.0;

/// Rounds a non-negative volume to the nearest integer, ties to even.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round_ties_even() as u64
    } else {
        0
    }
}

/// Rounds to one decimal place.
#[must_use]
pub fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Converts catchment demographics into per-condition annual volumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpidemiologyEstimator {
    rates: EpidemiologyRates,
}

impl EpidemiologyEstimator {
    #[must_use]
    pub const fn new(rates: EpidemiologyRates) -> Self {
        Self { rates }
    }

    #[must_use]
    pub const fn rates(&self) -> &EpidemiologyRates {
        &self.rates
    }

    /// Estimates volumes for one catchment.
    ///
    /// A zero 65+ figure with a positive total is imputed from
    /// [`EpidemiologyRates::default_65_fraction`] and flagged. Every volume is
    /// rounded independently from its exact parent, so the hemorrhagic
    /// sub-splits need not sum to the hemorrhagic total.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&self, demographics: &Demographics) -> Epidemiology {
        let rates = &self.rates;
        let total = demographics.catchment_population;

        let age_imputed = demographics.population_65 == 0 && total > 0;
        let population_65 = if age_imputed {
            round_count(total as f64 * rates.default_65_fraction)
        } else {
            demographics.population_65
        };

        let under_65 = total.saturating_sub(population_65);
        let effective = (population_65 as f64).mul_add(rates.age_weight_65, under_65 as f64);

        let pop_65_pct = if total == 0 {
            0.0
        } else {
            round_1dp(population_65 as f64 / total as f64 * 100.0)
        };

        let ischemic = effective * rates.ischemic_per_100k / PER_100K;
        let lvo = ischemic * rates.lvo_fraction;
        let mt_eligible = lvo * rates.mt_eligible_fraction;
        let hemorrhagic = effective * rates.hemorrhagic_per_100k / PER_100K;

        Epidemiology {
            population_65,
            age_imputed,
            pop_65_pct,
            effective_population: round_count(effective),
            ischemic: round_count(ischemic),
            lvo: round_count(lvo),
            mt_eligible: round_count(mt_eligible),
            hemorrhagic: round_count(hemorrhagic),
            subarachnoid: round_count(hemorrhagic * rates.subarachnoid_fraction),
            intracerebral: round_count(hemorrhagic * rates.intracerebral_fraction),
            other_hemorrhagic: round_count(hemorrhagic * rates.other_hemorrhagic_fraction),
            avm_aneurysm: round_count(effective * rates.avm_aneurysm_per_100k / PER_100K),
            chronic_subdural: round_count(effective * rates.chronic_subdural_per_100k / PER_100K),
        }
    }
}
