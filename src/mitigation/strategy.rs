//! Deflection strategies and their success heuristics.
//!
//! Three campaign types are modelled: ramming the asteroid with a spacecraft,
//! towing it with a hovering spacecraft's gravity, and pushing it with a
//! standoff detonation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

/// Lower bound for any reported success probability (%).
pub const MIN_SUCCESS_PERCENT: f64 = 5.0;

/// Upper bound for any reported success probability (%).
pub const MAX_SUCCESS_PERCENT: f64 = 98.0;

/// Per-strategy heuristic constants.
///
/// Success probability before clamping is
/// `min(cap, (warning_years / diameter_m) · k1 · Δv_cm_s · k2)`.
/// These are illustrative engineering numbers, not derived physics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategyCoefficients {
    /// Best achievable probability for the strategy (%).
    pub cap: f64,
    pub k1: f64,
    pub k2: f64,
}

/// Planetary-defense deflection technique.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeflectionStrategy {
    /// Spacecraft rams the asteroid. Effectiveness drops with size and rises
    /// with warning time.
    #[serde(rename = "kinetic")]
    Kinetic,
    /// Spacecraft tows the asteroid gravitationally. Needs long lead times,
    /// favors smaller objects.
    #[serde(rename = "gravity")]
    GravityTractor,
    /// Standoff detonation. Most effective against large objects.
    #[serde(rename = "nuclear")]
    Nuclear,
}

impl DeflectionStrategy {
    pub const ALL: [DeflectionStrategy; 3] = [
        DeflectionStrategy::Kinetic,
        DeflectionStrategy::GravityTractor,
        DeflectionStrategy::Nuclear,
    ];

    pub fn coefficients(&self) -> StrategyCoefficients {
        match self {
            DeflectionStrategy::Kinetic => StrategyCoefficients {
                cap: 95.0,
                k1: 1000.0,
                k2: 10.0,
            },
            DeflectionStrategy::GravityTractor => StrategyCoefficients {
                cap: 90.0,
                k1: 800.0,
                k2: 8.0,
            },
            DeflectionStrategy::Nuclear => StrategyCoefficients {
                cap: 98.0,
                k1: 1200.0,
                k2: 12.0,
            },
        }
    }

    /// Heuristic probability (%) that the campaign succeeds.
    ///
    /// # Arguments
    /// * `warning_years` - Lead time before impact (years)
    /// * `diameter_m` - Asteroid diameter (m)
    /// * `velocity_change_cm_s` - Imparted Δv (cm/s)
    ///
    /// # Returns
    /// Probability clamped to [5, 98] %.
    pub fn success_probability(&self, warning_years: f64, diameter_m: f64, velocity_change_cm_s: f64) -> f64 {
        let StrategyCoefficients { cap, k1, k2 } = self.coefficients();
        let raw = (warning_years / diameter_m) * k1 * velocity_change_cm_s * k2;
        raw.min(cap).clamp(MIN_SUCCESS_PERCENT, MAX_SUCCESS_PERCENT)
    }

    /// Wire name used in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeflectionStrategy::Kinetic => "kinetic",
            DeflectionStrategy::GravityTractor => "gravity",
            DeflectionStrategy::Nuclear => "nuclear",
        }
    }

    /// Human-readable name.
    pub fn description(&self) -> &'static str {
        match self {
            DeflectionStrategy::Kinetic => "Kinetic Impactor",
            DeflectionStrategy::GravityTractor => "Gravity Tractor",
            DeflectionStrategy::Nuclear => "Nuclear Standoff",
        }
    }
}

impl FromStr for DeflectionStrategy {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kinetic" => Ok(DeflectionStrategy::Kinetic),
            "gravity" => Ok(DeflectionStrategy::GravityTractor),
            "nuclear" => Ok(DeflectionStrategy::Nuclear),
            other => Err(ImpactError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for DeflectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
