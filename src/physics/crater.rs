//! Crater geometry and seismic response.
//!
//! Crater size follows the Holsapple–Housen scaling relation:
//!
//! D = 1.8 · d · (ρ_i/ρ_t)^(1/3) · (v/c_t)^0.44 / sin(θ)^(1/3)
//!
//! where ρ_t and c_t are the density and sound speed of the target rock.

use serde::Serialize;

use crate::display::{dp0, dp1, dp2, dp3};
use crate::types::{ImpactorParameters, TARGET_ROCK_DENSITY, TARGET_SOUND_SPEED};

/// Transient crater dimensions (km).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CraterGeometry {
    #[serde(rename = "craterDiameter", serialize_with = "dp2")]
    pub diameter_km: f64,
    #[serde(rename = "craterDepth", serialize_with = "dp3")]
    pub depth_km: f64,
    #[serde(rename = "craterRadius", serialize_with = "dp2")]
    pub radius_km: f64,
}

/// Crater diameter in meters for the given impactor.
///
/// Undefined (infinite) at a grazing angle of 0°.
pub fn crater_diameter_m(params: &ImpactorParameters) -> f64 {
    let angle_rad = params.angle.to_radians();
    1.8 * params.diameter
        * (params.density / TARGET_ROCK_DENSITY).powf(1.0 / 3.0)
        * (params.velocity_ms() / TARGET_SOUND_SPEED).powf(0.44)
        / angle_rad.sin().powf(1.0 / 3.0)
}

/// Crater diameter, depth and radius. Depth is a third of the diameter.
pub fn crater_geometry(params: &ImpactorParameters) -> CraterGeometry {
    let diameter_m = crater_diameter_m(params);
    CraterGeometry {
        diameter_km: diameter_m / 1000.0,
        depth_km: diameter_m / 3.0 / 1000.0,
        radius_km: diameter_m / 2.0 / 1000.0,
    }
}

/// Ground shaking caused by the impact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SeismicEffects {
    /// Richter-like magnitude.
    #[serde(rename = "seismicMagnitude", serialize_with = "dp1")]
    pub magnitude: f64,
    /// Radius within which the shaking is felt (km).
    #[serde(rename = "seismicFeltRadius", serialize_with = "dp0")]
    pub felt_radius_km: f64,
}

/// Seismic magnitude from kinetic energy: M = 0.67·log10(E) − 5.87.
pub fn seismic_magnitude(kinetic_energy_j: f64) -> f64 {
    0.67 * kinetic_energy_j.log10() - 5.87
}

pub fn seismic_effects(kinetic_energy_j: f64) -> SeismicEffects {
    let magnitude = seismic_magnitude(kinetic_energy_j);
    SeismicEffects {
        magnitude,
        felt_radius_km: 10f64.powf(magnitude / 2.0) * 0.5,
    }
}
