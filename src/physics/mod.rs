//! Impact physics calculator.
//!
//! Converts an impactor description into energy release, crater geometry,
//! thermal, blast, wind and seismic effects using closed-form empirical
//! scaling laws. Everything here is a pure function of its input: no I/O,
//! no shared state, safe to call from any thread.

pub mod blast;
pub mod crater;

#[cfg(test)]
mod proptest_physics;

use serde::Serialize;

use crate::display::{dp0, dp1, dp2, dp4};
use crate::types::{GeoPoint, ImpactorParameters, KM_S_TO_KMH, KM_S_TO_MPH, MEGATON_TNT_J};

pub use blast::{BlastEffects, ThermalEffects, WindEffects};
pub use crater::{CraterGeometry, SeismicEffects};

/// Yield of the Tsar Bomba test (Mt).
pub const TSAR_BOMBA_MT: f64 = 50.0;

/// Yield of the Hiroshima bomb (Mt).
pub const HIROSHIMA_MT: f64 = 0.015;

/// Energy above which an impact out-powers a hurricane's daily release (Mt).
pub const HURRICANE_MT: f64 = 60.0;

/// Energy released on impact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRelease {
    #[serde(skip)]
    pub kinetic_energy_j: f64,
    #[serde(serialize_with = "dp2")]
    pub energy_megatons: f64,
    #[serde(serialize_with = "dp4")]
    pub energy_gigatons: f64,
    #[serde(serialize_with = "dp1")]
    pub tsar_bomba_equivalent: f64,
    #[serde(serialize_with = "dp0")]
    pub hiroshima_equivalent: f64,
    #[serde(rename = "hurricaneComparison")]
    pub exceeds_hurricane: bool,
}

impl EnergyRelease {
    pub fn from_joules(kinetic_energy_j: f64) -> Self {
        let energy_megatons = kinetic_energy_j / MEGATON_TNT_J;
        Self {
            kinetic_energy_j,
            energy_megatons,
            energy_gigatons: energy_megatons / 1000.0,
            tsar_bomba_equivalent: energy_megatons / TSAR_BOMBA_MT,
            hiroshima_equivalent: energy_megatons / HIROSHIMA_MT,
            exceeds_hurricane: energy_megatons > HURRICANE_MT,
        }
    }
}

/// How often an impactor of a given size strikes Earth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ImpactFrequency {
    #[serde(rename = "every 10-100 years")]
    Decades,
    #[serde(rename = "every 100-1,000 years")]
    Centuries,
    #[serde(rename = "every 1,000-10,000 years")]
    Millennia,
    #[serde(rename = "every 10,000-100,000 years")]
    TensOfMillennia,
    #[serde(rename = "every 100,000+ years")]
    HundredsOfMillennia,
}

impl ImpactFrequency {
    /// Bucket by impactor diameter (m).
    pub fn from_diameter(diameter_m: f64) -> Self {
        if diameter_m < 50.0 {
            ImpactFrequency::Decades
        } else if diameter_m < 100.0 {
            ImpactFrequency::Centuries
        } else if diameter_m < 300.0 {
            ImpactFrequency::Millennia
        } else if diameter_m < 1000.0 {
            ImpactFrequency::TensOfMillennia
        } else {
            ImpactFrequency::HundredsOfMillennia
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactFrequency::Decades => "every 10-100 years",
            ImpactFrequency::Centuries => "every 100-1,000 years",
            ImpactFrequency::Millennia => "every 1,000-10,000 years",
            ImpactFrequency::TensOfMillennia => "every 10,000-100,000 years",
            ImpactFrequency::HundredsOfMillennia => "every 100,000+ years",
        }
    }
}

/// Coarse tsunami risk category.
///
/// There is no land/water mask: any impact within 60° of the equator is
/// treated as a potential ocean impact. This is a known approximation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TsunamiRisk {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MODERATE - May generate local tsunamis")]
    Moderate,
    #[serde(rename = "HIGH - Capable of generating destructive tsunamis")]
    High,
}

impl TsunamiRisk {
    pub fn assess(diameter_m: f64, lat: f64) -> Self {
        let likely_ocean = lat.abs() < 60.0;
        if likely_ocean && diameter_m > 200.0 {
            TsunamiRisk::High
        } else if likely_ocean && diameter_m > 50.0 {
            TsunamiRisk::Moderate
        } else {
            TsunamiRisk::Low
        }
    }
}

/// Concentric zone radii handed to map overlays (km).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DamageZones {
    pub crater: f64,
    pub severe: f64,
    pub moderate: f64,
}

/// Everything derived from one impactor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactEffects {
    #[serde(flatten)]
    pub energy: EnergyRelease,
    #[serde(serialize_with = "dp0")]
    pub impact_velocity_kmh: f64,
    #[serde(serialize_with = "dp0")]
    pub impact_velocity_mph: f64,
    pub impact_frequency: ImpactFrequency,
    #[serde(flatten)]
    pub crater: CraterGeometry,
    #[serde(flatten)]
    pub thermal: ThermalEffects,
    #[serde(flatten)]
    pub blast: BlastEffects,
    #[serde(flatten)]
    pub wind: WindEffects,
    #[serde(flatten)]
    pub seismic: SeismicEffects,
    /// Area inside the 5 psi ring (km²).
    #[serde(serialize_with = "dp0")]
    pub affected_area: f64,
    pub tsunami_risk: TsunamiRisk,
    pub impact_location: GeoPoint,
    pub zones: DamageZones,
}

impl ImpactEffects {
    /// True when every numeric output is finite.
    ///
    /// Validated input always satisfies this; a `false` here is an internal
    /// failure, not a user error.
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    /// Name of the first non-finite output, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        let checks = [
            ("energy", self.energy.energy_megatons),
            ("crater diameter", self.crater.diameter_km),
            ("fireball radius", self.thermal.fireball_radius_km),
            ("thermal radius", self.thermal.second_degree_radius_km),
            ("blast radius", self.blast.light_damage_radius),
            ("decibels", self.wind.max_decibels),
            ("seismic magnitude", self.seismic.magnitude),
            ("seismic felt radius", self.seismic.felt_radius_km),
            ("affected area", self.affected_area),
        ];
        checks
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}

/// Compute every impact effect for `params`.
///
/// The formulas do not validate: a zero angle yields an infinite crater and
/// non-positive sizes yield NaN. Validate with
/// [`ImpactorParameters::validate`] first.
pub fn compute_impact_effects(params: &ImpactorParameters) -> ImpactEffects {
    let energy = EnergyRelease::from_joules(params.kinetic_energy_j());
    let mt = energy.energy_megatons;

    let crater = crater::crater_geometry(params);
    let seismic = crater::seismic_effects(energy.kinetic_energy_j);
    let thermal = blast::thermal_effects(mt);
    let blast = blast::blast_effects(mt);
    let wind = blast::wind_effects(mt, &blast);

    let affected_area = std::f64::consts::PI * blast.moderate_damage_radius.powi(2);

    ImpactEffects {
        energy,
        impact_velocity_kmh: params.velocity * KM_S_TO_KMH,
        impact_velocity_mph: params.velocity * KM_S_TO_MPH,
        impact_frequency: ImpactFrequency::from_diameter(params.diameter),
        crater,
        thermal,
        blast,
        wind,
        seismic,
        affected_area,
        tsunami_risk: TsunamiRisk::assess(params.diameter, params.lat),
        impact_location: params.location(),
        zones: DamageZones {
            crater: crater.radius_km,
            severe: blast.air_blast_radius,
            moderate: blast.moderate_damage_radius,
        },
    }
}
