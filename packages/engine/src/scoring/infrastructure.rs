//! Infrastructure scoring: certification, capability flags, and fellowships,
//! with only a small capped term for stroke volume.

use territory_map_config::InfrastructureWeights;
use territory_map_facility_models::{Facility, ScoreComponent, ScoringMode, Tier};

use super::{ScoringStrategy, SetStatistics, SortKey, component};

#[derive(Debug, Clone, Copy, Default)]
pub struct InfrastructureStrategy {
    weights: InfrastructureWeights,
}

impl InfrastructureStrategy {
    #[must_use]
    pub const fn new(weights: InfrastructureWeights) -> Self {
        Self { weights }
    }
}

const fn award(flag: bool, points: f64) -> f64 {
    if flag { points } else { 0.0 }
}

impl ScoringStrategy for InfrastructureStrategy {
    fn mode(&self) -> ScoringMode {
        ScoringMode::Infrastructure
    }

    fn components(&self, facility: &Facility, stats: &SetStatistics) -> Vec<ScoreComponent> {
        let w = &self.weights;
        let profile = &facility.profile;
        let caps = &profile.capabilities;

        let capability_flags = [
            (caps.thrombectomy_24_7, w.thrombectomy_24_7),
            (caps.neuro_icu, w.neuro_icu),
            (profile.critical_access, w.critical_access),
            (caps.ct_scanner, w.ct_scanner),
            (caps.telestroke, w.telestroke),
            (caps.tpa_available, w.tpa_available),
        ];
        let capabilities: f64 = capability_flags
            .iter()
            .map(|&(flag, points)| award(flag, points))
            .sum();
        let capabilities_max: f64 = capability_flags.iter().map(|&(_, points)| points).sum();

        let volume = (f64::from(profile.strokes_per_year) / stats.max_strokes
            * w.stroke_volume_cap)
            .min(w.stroke_volume_cap);

        vec![
            component(
                "certification",
                w.certification.points(profile.certification),
                w.certification.max(),
            ),
            component("capabilities", capabilities, capabilities_max),
            component(
                "fellowship",
                award(profile.nsg_fellowship, w.nsg_fellowship)
                    + award(profile.nir_fellowship, w.nir_fellowship),
                w.nsg_fellowship + w.nir_fellowship,
            ),
            component("stroke_volume", volume, w.stroke_volume_cap),
        ]
    }

    fn sort_key(&self, facility: &Facility) -> SortKey {
        SortKey {
            primary: f64::from(facility.score_value()),
            secondary: f64::from(facility.profile.strokes_per_year),
        }
    }

    fn tier_label(&self, tier: Tier) -> &'static str {
        match tier {
            Tier::One => "High Complexity Hub",
            Tier::Two => "Regional Center",
            Tier::Three => "Basic Capability",
        }
    }
}
