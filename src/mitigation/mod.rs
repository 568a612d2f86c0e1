//! Mitigation estimator.
//!
//! Converts a proposed deflection campaign (strategy, warning time, Δv) into
//! the resulting shift of the impact point and a heuristic probability of
//! success. Depends only on the impactor description, never on the impact
//! effects.
//!
//! The shift is the straight-line drift `Δx = Δv · t`. It is applied purely
//! along the meridian: latitude moves, longitude stays put.

pub mod strategy;

#[cfg(test)]
mod proptest_mitigation;

use serde::{Serialize, Serializer};

use crate::display::{dp0, dp1, round_to};
use crate::error::ImpactError;
use crate::types::{
    require_positive, sphere_mass, GeoPoint, EARTH_RADIUS_KM, RAD_TO_DEG, SECONDS_PER_YEAR,
};

pub use strategy::{DeflectionStrategy, StrategyCoefficients};

/// Deflections beyond this distance turn an impact into a miss (km).
pub const MISS_THRESHOLD_KM: f64 = EARTH_RADIUS_KM * 0.02;

/// Density assumed when estimating the impulse a campaign must deliver.
pub const ASSUMED_STONY_DENSITY: f64 = 3000.0;

/// A proposed deflection campaign against one impactor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MitigationParameters {
    /// Asteroid diameter (m)
    pub diameter: f64,
    /// Asteroid velocity (km/s)
    pub velocity: f64,
    /// Predicted impact latitude (degrees)
    pub lat: f64,
    /// Predicted impact longitude (degrees)
    pub lon: f64,
    pub strategy: DeflectionStrategy,
    /// Lead time before impact (years)
    pub warning_time_years: f64,
    /// Velocity change delivered to the asteroid (cm/s)
    pub velocity_change_cm_s: f64,
}

impl MitigationParameters {
    pub fn validate(&self) -> Result<(), ImpactError> {
        require_positive("diameter", self.diameter)?;
        require_positive("velocity", self.velocity)?;
        require_positive("warningTime", self.warning_time_years)?;
        require_positive("velocityChange", self.velocity_change_cm_s)?;
        GeoPoint::new(self.lat, self.lon).validate()
    }
}

/// Result of a deflection campaign.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationOutcome {
    /// True when the deflection exceeds [`MISS_THRESHOLD_KM`].
    pub success: bool,
    #[serde(rename = "successProbability", serialize_with = "dp1")]
    pub success_probability_percent: f64,
    #[serde(rename = "deflectionDistance", serialize_with = "dp0")]
    pub deflection_distance_km: f64,
    /// Shifted impact point; `None` when the asteroid misses.
    #[serde(rename = "newLocation", serialize_with = "location_dp4")]
    pub new_impact_location: Option<GeoPoint>,
    /// Momentum the campaign must deliver, assuming a stony body (N·s).
    pub impulse: f64,
    pub mitigation_type: DeflectionStrategy,
    pub warning_time: f64,
    pub velocity_change: f64,
    pub message: String,
}

fn location_dp4<S: Serializer>(location: &Option<GeoPoint>, serializer: S) -> Result<S::Ok, S::Error> {
    location
        .map(|p| GeoPoint::new(round_to(p.lat, 4), round_to(p.lon, 4)))
        .serialize(serializer)
}

/// Drift of the impact point after `warning_years` at `velocity_change_cm_s` (km).
pub fn deflection_distance_km(velocity_change_cm_s: f64, warning_years: f64) -> f64 {
    let velocity_change_ms = velocity_change_cm_s / 100.0;
    velocity_change_ms * warning_years * SECONDS_PER_YEAR / 1000.0
}

/// Latitude shift (degrees) for a meridional displacement along Earth's surface.
pub fn latitude_shift_deg(distance_km: f64) -> f64 {
    (distance_km / EARTH_RADIUS_KM) * RAD_TO_DEG
}

fn outcome_message(success: bool, deflection_km: f64) -> String {
    let km = deflection_km.round();
    if success {
        format!("Success! Asteroid deflected by {km:.0} km - Earth impact avoided.")
    } else {
        format!(
            "Partial deflection achieved. Impact point shifted by {km:.0} km. Consider additional mitigation efforts."
        )
    }
}

/// Estimate the outcome of a deflection campaign.
pub fn compute_mitigation(params: &MitigationParameters) -> MitigationOutcome {
    let deflection_km = deflection_distance_km(params.velocity_change_cm_s, params.warning_time_years);
    let success = deflection_km > MISS_THRESHOLD_KM;

    let success_probability_percent = params.strategy.success_probability(
        params.warning_time_years,
        params.diameter,
        params.velocity_change_cm_s,
    );

    // Latitude is not wrapped at the poles; callers only display it.
    let new_impact_location = (!success).then(|| {
        GeoPoint::new(params.lat + latitude_shift_deg(deflection_km), params.lon)
    });

    let impulse = sphere_mass(params.diameter, ASSUMED_STONY_DENSITY) * params.velocity_change_cm_s / 100.0;

    MitigationOutcome {
        success,
        success_probability_percent,
        deflection_distance_km: deflection_km,
        new_impact_location,
        impulse,
        mitigation_type: params.strategy,
        warning_time: params.warning_time_years,
        velocity_change: params.velocity_change_cm_s,
        message: outcome_message(success, deflection_km),
    }
}
