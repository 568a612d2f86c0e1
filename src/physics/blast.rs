//! Fireball, thermal, overpressure and acoustic effects.
//!
//! All radii follow the power-law form `r = c · E^k` with `E` in megatons of
//! TNT and `r` in kilometers. The coefficients are empirical fits; none of
//! the zones are guaranteed to nest inside each other.

use serde::Serialize;

use crate::display::{dp0, dp2};
use crate::types::MPH_TO_KMH;

/// Peak wind speed behind a 20 psi shock front (mph).
pub const PEAK_WIND_SPEED_20PSI_MPH: f64 = 470.0;

/// Upper bound for the reported sound level (dB).
pub const MAX_DECIBELS: f64 = 250.0;

/// Empirical power-law damage radius (km).
pub fn scaled_radius(coefficient: f64, energy_megatons: f64, exponent: f64) -> f64 {
    coefficient * energy_megatons.powf(exponent)
}

/// Fireball and thermal radiation radii (km).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThermalEffects {
    #[serde(rename = "fireballDiameter", serialize_with = "dp2")]
    pub fireball_diameter_km: f64,
    #[serde(rename = "fireballRadius", serialize_with = "dp2")]
    pub fireball_radius_km: f64,
    /// Clothing and vegetation ignite.
    #[serde(rename = "thermalIgnitionRadius", serialize_with = "dp2")]
    pub ignition_radius_km: f64,
    #[serde(rename = "thermal3rdDegreeRadius", serialize_with = "dp2")]
    pub third_degree_radius_km: f64,
    #[serde(rename = "thermal2ndDegreeRadius", serialize_with = "dp2")]
    pub second_degree_radius_km: f64,
}

pub fn thermal_effects(energy_megatons: f64) -> ThermalEffects {
    let fireball_diameter_km = scaled_radius(0.56, energy_megatons, 0.33);
    ThermalEffects {
        fireball_diameter_km,
        fireball_radius_km: fireball_diameter_km / 2.0,
        ignition_radius_km: scaled_radius(0.38, energy_megatons, 0.41),
        third_degree_radius_km: scaled_radius(0.32, energy_megatons, 0.38),
        second_degree_radius_km: scaled_radius(0.46, energy_megatons, 0.40),
    }
}

/// Overpressure damage radii (km).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastEffects {
    /// 20 psi: heavily built structures destroyed.
    #[serde(serialize_with = "dp2")]
    pub air_blast_radius: f64,
    /// 5 psi: most residential buildings collapse.
    #[serde(serialize_with = "dp2")]
    pub moderate_damage_radius: f64,
    /// 1 psi: windows shatter.
    #[serde(serialize_with = "dp2")]
    pub light_damage_radius: f64,
    #[serde(rename = "ef5TornadoZone", serialize_with = "dp2")]
    pub ef5_tornado_zone: f64,
    #[serde(serialize_with = "dp2")]
    pub trees_blown_radius: f64,
    #[serde(serialize_with = "dp2")]
    pub jupiter_storm_zone: f64,
    #[serde(serialize_with = "dp2")]
    pub total_collapse_radius: f64,
    #[serde(serialize_with = "dp2")]
    pub home_destruction_radius: f64,
    #[serde(serialize_with = "dp2")]
    pub severe_structural_damage_radius: f64,
}

pub fn blast_effects(energy_megatons: f64) -> BlastEffects {
    let severe = scaled_radius(0.22, energy_megatons, 0.33);
    let moderate = scaled_radius(0.54, energy_megatons, 0.33);
    BlastEffects {
        air_blast_radius: severe,
        moderate_damage_radius: moderate,
        light_damage_radius: scaled_radius(1.04, energy_megatons, 0.33),
        ef5_tornado_zone: severe,
        trees_blown_radius: moderate,
        jupiter_storm_zone: severe * 0.8,
        total_collapse_radius: severe,
        home_destruction_radius: moderate * 1.3,
        severe_structural_damage_radius: moderate,
    }
}

/// Wind and acoustic effects of the shock front.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindEffects {
    #[serde(serialize_with = "dp0")]
    pub peak_wind_speed_mph: f64,
    #[serde(serialize_with = "dp0")]
    pub peak_wind_speed_kmh: f64,
    #[serde(serialize_with = "dp0")]
    pub max_decibels: f64,
    #[serde(serialize_with = "dp2")]
    pub lung_damage_radius: f64,
    #[serde(serialize_with = "dp2")]
    pub eardrums_rupture_radius: f64,
}

/// Sound level at the source: 200 + 20·log10(E), capped at [`MAX_DECIBELS`].
pub fn max_decibels(energy_megatons: f64) -> f64 {
    (200.0 + 20.0 * energy_megatons.log10()).min(MAX_DECIBELS)
}

pub fn wind_effects(energy_megatons: f64, blast: &BlastEffects) -> WindEffects {
    WindEffects {
        peak_wind_speed_mph: PEAK_WIND_SPEED_20PSI_MPH,
        peak_wind_speed_kmh: PEAK_WIND_SPEED_20PSI_MPH * MPH_TO_KMH,
        max_decibels: max_decibels(energy_megatons),
        lung_damage_radius: blast.air_blast_radius * 1.2,
        eardrums_rupture_radius: blast.moderate_damage_radius,
    }
}
