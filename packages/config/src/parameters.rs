//! Immutable rate and weight tables injected into the engine.
//!
//! Defaults reproduce the published scoring model. Any table can be
//! overridden from the territory config file, which keeps the engine free of
//! module-level constants and lets tests pin alternate values.

use serde::{Deserialize, Deserializer, Serialize};
use territory_map_facility_models::Certification;

/// Per-100,000 incidence rates and age weighting for the epidemiology
/// estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EpidemiologyRates {
    /// Fraction of the total catchment assumed to be 65+ when the source
    /// omits that figure.
    pub default_65_fraction: f64,
    /// Incidence multiplier applied to the 65+ cohort.
    pub age_weight_65: f64,
    /// Ischemic strokes per 100,000 effective population.
    pub ischemic_per_100k: f64,
    /// Share of ischemic strokes caused by a large-vessel occlusion.
    pub lvo_fraction: f64,
    /// Share of LVO strokes eligible for mechanical thrombectomy.
    pub mt_eligible_fraction: f64,
    /// Hemorrhagic strokes per 100,000 effective population.
    pub hemorrhagic_per_100k: f64,
    /// Subarachnoid share of hemorrhagic strokes.
    pub subarachnoid_fraction: f64,
    /// Intracerebral share of hemorrhagic strokes.
    pub intracerebral_fraction: f64,
    /// Remaining hemorrhagic share.
    pub other_hemorrhagic_fraction: f64,
    /// AVM/aneurysm cases per 100,000 effective population.
    pub avm_aneurysm_per_100k: f64,
    /// Chronic subdural hematoma cases per 100,000 effective population.
    pub chronic_subdural_per_100k: f64,
}

impl Default for EpidemiologyRates {
    fn default() -> Self {
        Self {
            default_65_fraction: 0.17,
            age_weight_65: 2.5,
            ischemic_per_100k: 216.0,
            lvo_fraction: 0.30,
            mt_eligible_fraction: 0.40,
            hemorrhagic_per_100k: 36.0,
            subarachnoid_fraction: 0.25,
            intracerebral_fraction: 0.65,
            other_hemorrhagic_fraction: 0.10,
            avm_aneurysm_per_100k: 3.0,
            chronic_subdural_per_100k: 17.3,
        }
    }
}

/// Points awarded per certification level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CertificationPoints {
    /// CSC
    pub comprehensive: f64,
    /// PSC
    pub primary: f64,
    /// TSC and TCC
    pub thrombectomy_capable: f64,
    /// No certification
    pub none: f64,
}

impl CertificationPoints {
    /// Looks up the points for a certification level.
    #[must_use]
    pub const fn points(&self, certification: Certification) -> f64 {
        match certification {
            Certification::Comprehensive => self.comprehensive,
            Certification::Primary => self.primary,
            Certification::ThrombectomyStroke | Certification::ThrombectomyCenter => {
                self.thrombectomy_capable
            }
            Certification::None => self.none,
        }
    }

    /// The largest award in the table.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.comprehensive
            .max(self.primary)
            .max(self.thrombectomy_capable)
            .max(self.none)
    }

    /// Default commercial certification awards.
    pub const COMMERCIAL: Self = Self {
        comprehensive: 20.0,
        primary: 12.0,
        thrombectomy_capable: 8.0,
        none: 3.0,
    };

    /// Default infrastructure certification awards.
    pub const INFRASTRUCTURE: Self = Self {
        comprehensive: 25.0,
        primary: 20.0,
        thrombectomy_capable: 15.0,
        none: 5.0,
    };
}

/// A certification table as written in a config file. Omitted levels keep
/// the scheme's default award.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct CertificationOverrides {
    comprehensive: Option<f64>,
    primary: Option<f64>,
    thrombectomy_capable: Option<f64>,
    none: Option<f64>,
}

impl CertificationOverrides {
    fn over(self, base: CertificationPoints) -> CertificationPoints {
        CertificationPoints {
            comprehensive: self.comprehensive.unwrap_or(base.comprehensive),
            primary: self.primary.unwrap_or(base.primary),
            thrombectomy_capable: self.thrombectomy_capable.unwrap_or(base.thrombectomy_capable),
            none: self.none.unwrap_or(base.none),
        }
    }
}

fn commercial_certification<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<CertificationPoints, D::Error> {
    CertificationOverrides::deserialize(deserializer)
        .map(|overrides| overrides.over(CertificationPoints::COMMERCIAL))
}

fn infrastructure_certification<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<CertificationPoints, D::Error> {
    CertificationOverrides::deserialize(deserializer)
        .map(|overrides| overrides.over(CertificationPoints::INFRASTRUCTURE))
}

/// Weights for the commercial (TPS) scoring scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CommercialWeights {
    /// Points for the set-maximum stroke volume.
    pub stroke_volume: f64,
    /// Points for the set-maximum bed count.
    pub beds: f64,
    /// Certification lookup.
    #[serde(deserialize_with = "commercial_certification")]
    pub certification: CertificationPoints,
    /// Points per fellowship program (two programs).
    pub fellowship_each: f64,
    /// Momentum award when projected revenue beats the prior period by more
    /// than the band.
    pub momentum_growth: f64,
    /// Momentum award when projected revenue is within the band.
    pub momentum_flat: f64,
    /// Momentum award when projected revenue falls below the band.
    pub momentum_decline: f64,
    /// Half-width of the "flat" momentum band (0.05 = ±5%).
    pub momentum_band: f64,
    /// Revenue-rank awards for the top, second, third, and bottom quartile.
    pub revenue_rank: [f64; 4],
}

impl Default for CommercialWeights {
    fn default() -> Self {
        Self {
            stroke_volume: 25.0,
            beds: 15.0,
            certification: CertificationPoints::COMMERCIAL,
            fellowship_each: 7.5,
            momentum_growth: 15.0,
            momentum_flat: 8.0,
            momentum_decline: 3.0,
            momentum_band: 0.05,
            revenue_rank: [10.0, 7.0, 4.0, 2.0],
        }
    }
}

/// Weights for the infrastructure scoring scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct InfrastructureWeights {
    /// Certification lookup.
    #[serde(deserialize_with = "infrastructure_certification")]
    pub certification: CertificationPoints,
    /// 24/7 thrombectomy coverage.
    pub thrombectomy_24_7: f64,
    /// Neuro ICU.
    pub neuro_icu: f64,
    /// Critical Access Hospital status.
    pub critical_access: f64,
    /// CT scanner.
    pub ct_scanner: f64,
    /// Telestroke.
    pub telestroke: f64,
    /// tPA availability.
    pub tpa_available: f64,
    /// Neurosurgery fellowship.
    pub nsg_fellowship: f64,
    /// Neuro-interventional fellowship.
    pub nir_fellowship: f64,
    /// Cap on the stroke-volume share term.
    pub stroke_volume_cap: f64,
}

impl Default for InfrastructureWeights {
    fn default() -> Self {
        Self {
            certification: CertificationPoints::INFRASTRUCTURE,
            thrombectomy_24_7: 15.0,
            neuro_icu: 12.0,
            critical_access: 10.0,
            ct_scanner: 8.0,
            telestroke: 8.0,
            tpa_available: 5.0,
            nsg_fellowship: 7.0,
            nir_fellowship: 8.0,
            stroke_volume_cap: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certification_lookup_covers_both_thrombectomy_codes() {
        let points = CommercialWeights::default().certification;
        assert!((points.points(Certification::ThrombectomyStroke) - 8.0).abs() < f64::EPSILON);
        assert!((points.points(Certification::ThrombectomyCenter) - 8.0).abs() < f64::EPSILON);
        assert!((points.points(Certification::None) - 3.0).abs() < f64::EPSILON);
        assert!((points.max() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hemorrhagic_split_sums_to_one() {
        let rates = EpidemiologyRates::default();
        let total = rates.subarachnoid_fraction
            + rates.intracerebral_fraction
            + rates.other_hemorrhagic_fraction;
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_certification_override_keeps_scheme_defaults() {
        let weights: InfrastructureWeights =
            toml::from_str("[certification]\ncomprehensive = 30.0\n").unwrap();
        assert!((weights.certification.comprehensive - 30.0).abs() < f64::EPSILON);
        assert!((weights.certification.primary - 20.0).abs() < f64::EPSILON);
        assert!((weights.certification.none - 5.0).abs() < f64::EPSILON);
        assert!((weights.neuro_icu - 12.0).abs() < f64::EPSILON);

        let weights: CommercialWeights =
            toml::from_str("beds = 10.0\n[certification]\nnone = 0.0\n").unwrap();
        assert!((weights.certification.comprehensive - 20.0).abs() < f64::EPSILON);
        assert!((weights.certification.primary - 12.0).abs() < f64::EPSILON);
        assert!(weights.certification.none.abs() < f64::EPSILON);
        assert!((weights.beds - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_certification_level_is_rejected() {
        assert!(toml::from_str::<CommercialWeights>("[certification]\nstellar = 1.0\n").is_err());
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let rates: EpidemiologyRates = toml::from_str("ischemic_per_100k = 200.0").unwrap();
        assert!((rates.ischemic_per_100k - 200.0).abs() < f64::EPSILON);
        assert!((rates.age_weight_65 - 2.5).abs() < f64::EPSILON);
    }
}
