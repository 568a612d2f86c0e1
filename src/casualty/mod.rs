//! Population casualty estimator.
//!
//! Overlays the damage radii from the physics calculator on a uniform
//! population density and counts fatalities per zone. The headline total
//! uses concentric ring areas (crater disc, severe ring, moderate ring) so
//! nobody is counted twice. The per-cause figures (fireball, shock wave,
//! wind, seismic, burns) overlap those rings and are informational only.

pub mod region;

#[cfg(test)]
mod proptest_casualty;

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::display::dp1;
use crate::physics::ImpactEffects;
use crate::types::GeoPoint;

pub use region::{estimate_region, DataSource, LocationCategory, PopulationEstimate};

/// Fatality rates by cause (fraction of the exposed population).
pub mod rates {
    pub const CRATER: f64 = 1.0;
    pub const FIREBALL: f64 = 0.95;
    pub const SEVERE_ZONE: f64 = 0.7;
    pub const MODERATE_ZONE: f64 = 0.3;
    pub const SHOCK_WAVE: f64 = 0.6;
    pub const WIND_BLAST: f64 = 0.65;
    pub const SEISMIC: f64 = 0.01;
    pub const BURNS_3RD_DEGREE: f64 = 0.6;
    pub const BURNS_2ND_DEGREE: f64 = 0.4;
    /// Share of the surviving at-risk population counted as injured.
    pub const INJURED: f64 = 0.5;
}

/// Thermal effects over water or ice are scaled by this factor.
pub const THERMAL_DAMPENING: f64 = 0.05;
/// Blast effects over water or ice are scaled by this factor.
pub const BLAST_DAMPENING: f64 = 0.1;

/// Reported fatality rate at ground zero (%).
pub const GROUND_ZERO_FATALITY_RATE: u32 = 100;

/// Location and damage radii (km) fed to the casualty model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CasualtyInputs {
    pub location: GeoPoint,
    pub crater_radius: f64,
    /// 20 psi radius.
    pub severe_radius: f64,
    /// 5 psi radius.
    pub moderate_radius: f64,
    pub fireball_radius: f64,
    pub thermal_3rd_radius: f64,
    pub thermal_2nd_radius: f64,
    pub lung_damage_radius: f64,
    pub eardrums_radius: f64,
    pub seismic_radius: f64,
}

impl CasualtyInputs {
    /// Take every radius from a physics result.
    pub fn from_effects(effects: &ImpactEffects) -> Self {
        Self {
            location: effects.impact_location,
            crater_radius: effects.crater.radius_km,
            severe_radius: effects.blast.air_blast_radius,
            moderate_radius: effects.blast.moderate_damage_radius,
            fireball_radius: effects.thermal.fireball_radius_km,
            thermal_3rd_radius: effects.thermal.third_degree_radius_km,
            thermal_2nd_radius: effects.thermal.second_degree_radius_km,
            lung_damage_radius: effects.wind.lung_damage_radius,
            eardrums_radius: effects.wind.eardrums_rupture_radius,
            seismic_radius: effects.seismic.felt_radius_km,
        }
    }
}

/// Area of each concentric zone (km²).
///
/// `severe` and `moderate` are rings: the disc of that radius minus the
/// disc inside it. Radii come from independent scaling laws, so a ring can
/// come out negative when an inner radius exceeds an outer one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ZoneAreas {
    pub crater: f64,
    pub severe: f64,
    pub moderate: f64,
}

impl ZoneAreas {
    pub fn from_radii(crater_radius: f64, severe_radius: f64, moderate_radius: f64) -> Self {
        let crater = disc_area(crater_radius);
        Self {
            crater,
            severe: disc_area(severe_radius) - crater,
            moderate: disc_area(moderate_radius) - disc_area(severe_radius),
        }
    }

    pub fn total(&self) -> f64 {
        self.crater + self.severe + self.moderate
    }
}

fn disc_area(radius: f64) -> f64 {
    PI * radius * radius
}

/// Severity classification, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Moderate,
    Significant,
    Major,
    Severe,
    Catastrophic,
}

impl Severity {
    /// Classify by fatality count; thresholds are exclusive.
    pub fn from_fatalities(fatalities: u64) -> Self {
        match fatalities {
            f if f > 1_000_000 => Severity::Catastrophic,
            f if f > 100_000 => Severity::Severe,
            f if f > 10_000 => Severity::Major,
            f if f > 1_000 => Severity::Significant,
            f if f > 100 => Severity::Moderate,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::Significant => "SIGNIFICANT",
            Severity::Major => "MAJOR",
            Severity::Severe => "SEVERE",
            Severity::Catastrophic => "CATASTROPHIC",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Casualty estimate for one impact.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationImpact {
    /// People inside the 5 psi radius.
    pub total_at_risk: u64,
    /// Crater, severe-ring and moderate-ring fatalities only.
    pub estimated_fatalities: u64,
    pub estimated_injured: u64,
    pub location_category: LocationCategory,
    /// People per km².
    #[serde(serialize_with = "dp1")]
    pub population_density: f64,
    pub data_source: DataSource,
    pub severity: Severity,
    pub crater_vaporized: u64,
    pub severe_zone_fatalities: u64,
    pub moderate_zone_fatalities: u64,
    pub ground_zero_fatality_rate: u32,
    pub fireball_deaths: u64,
    #[serde(rename = "burns3rdDegree")]
    pub burns_3rd_degree: u64,
    #[serde(rename = "burns2ndDegree")]
    pub burns_2nd_degree: u64,
    pub shock_wave_deaths: u64,
    pub wind_blast_deaths: u64,
    pub seismic_deaths: u64,
    pub zone_areas: ZoneAreas,
}

/// People in `area` at `density`, scaled by `rate`, rounded to whole people.
///
/// Negative areas (inverted rings) count as nobody.
fn head_count(area: f64, density: f64, rate: f64) -> u64 {
    let people = area.max(0.0) * density * rate;
    // `as` saturates: NaN and negatives become 0.
    people.round() as u64
}

/// Estimate casualties for the given radii.
///
/// `measured_density` comes from an external population dataset; pass
/// `None` to fall back to the coarse geographic estimate.
pub fn compute_casualties(inputs: &CasualtyInputs, measured_density: Option<f64>) -> PopulationImpact {
    let estimate = PopulationEstimate::resolve(inputs.location, measured_density);
    let density = estimate.density;

    let (thermal_factor, blast_factor) = if estimate.category.is_dampened() {
        (THERMAL_DAMPENING, BLAST_DAMPENING)
    } else {
        (1.0, 1.0)
    };

    let areas = ZoneAreas::from_radii(inputs.crater_radius, inputs.severe_radius, inputs.moderate_radius);

    let crater_vaporized = head_count(areas.crater, density, rates::CRATER);
    let severe_zone_fatalities = head_count(areas.severe, density, rates::SEVERE_ZONE * blast_factor);
    let moderate_zone_fatalities = head_count(areas.moderate, density, rates::MODERATE_ZONE * blast_factor);

    let fireball_deaths = head_count(
        disc_area(inputs.fireball_radius),
        density,
        rates::FIREBALL * thermal_factor,
    );
    let shock_wave_deaths = head_count(areas.severe, density, rates::SHOCK_WAVE * blast_factor);
    let wind_blast_deaths = head_count(areas.severe, density, rates::WIND_BLAST * blast_factor);
    let seismic_deaths = head_count(disc_area(inputs.seismic_radius), density, rates::SEISMIC);
    let burns_3rd_degree = head_count(
        disc_area(inputs.thermal_3rd_radius),
        density,
        rates::BURNS_3RD_DEGREE * thermal_factor,
    );
    let burns_2nd_degree = head_count(
        disc_area(inputs.thermal_2nd_radius),
        density,
        rates::BURNS_2ND_DEGREE * thermal_factor,
    );

    let estimated_fatalities = crater_vaporized
        .saturating_add(severe_zone_fatalities)
        .saturating_add(moderate_zone_fatalities);
    let total_at_risk = head_count(disc_area(inputs.moderate_radius), density, 1.0);
    let estimated_injured =
        (total_at_risk.saturating_sub(estimated_fatalities) as f64 * rates::INJURED).round() as u64;

    PopulationImpact {
        total_at_risk,
        estimated_fatalities,
        estimated_injured,
        location_category: estimate.category,
        population_density: density,
        data_source: estimate.data_source,
        severity: Severity::from_fatalities(estimated_fatalities),
        crater_vaporized,
        severe_zone_fatalities,
        moderate_zone_fatalities,
        ground_zero_fatality_rate: GROUND_ZERO_FATALITY_RATE,
        fireball_deaths,
        burns_3rd_degree,
        burns_2nd_degree,
        shock_wave_deaths,
        wind_blast_deaths,
        seismic_deaths,
        zone_areas: areas,
    }
}
