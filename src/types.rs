//! Core physical constants and impactor input types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ImpactError;

/// Physical constants (SI units unless noted)

/// Energy of one megaton of TNT (J)
pub const MEGATON_TNT_J: f64 = 4.184e15;

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Julian year length in days
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Seconds per Julian year
pub const SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * SECONDS_PER_DAY;

/// Target rock density assumed by the crater scaling law (kg/m³)
pub const TARGET_ROCK_DENSITY: f64 = 2500.0;

/// Sound speed in target rock assumed by the crater scaling law (m/s)
pub const TARGET_SOUND_SPEED: f64 = 5000.0;

/// km/s to km/h
pub const KM_S_TO_KMH: f64 = 3600.0;

/// km/s to mph
pub const KM_S_TO_MPH: f64 = 2236.94;

/// mph to km/h
pub const MPH_TO_KMH: f64 = 1.60934;

/// Physical description of an incoming impactor.
///
/// Fields are deliberately plain: the effect formulas accept whatever is
/// stored here and will happily produce NaN for nonsense. Call
/// [`ImpactorParameters::validate`] before computing anything from
/// caller-supplied values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactorParameters {
    /// Diameter (m)
    pub diameter: f64,
    /// Impact velocity (km/s)
    pub velocity: f64,
    /// Entry angle from horizontal (degrees, 90 = vertical)
    pub angle: f64,
    /// Bulk density (kg/m³)
    pub density: f64,
    /// Target latitude (degrees)
    pub lat: f64,
    /// Target longitude (degrees)
    pub lon: f64,
}

impl ImpactorParameters {
    /// Create a new parameter set.
    pub fn new(diameter: f64, velocity: f64, angle: f64, density: f64, lat: f64, lon: f64) -> Self {
        Self {
            diameter,
            velocity,
            angle,
            density,
            lat,
            lon,
        }
    }

    /// Reject values the scaling laws cannot handle.
    pub fn validate(&self) -> Result<(), ImpactError> {
        require_positive("diameter", self.diameter)?;
        require_positive("velocity", self.velocity)?;
        require_positive("density", self.density)?;
        require_finite("angle", self.angle)?;
        if self.angle <= 0.0 || self.angle > 90.0 {
            return Err(ImpactError::invalid(
                "angle",
                format!("{} is outside (0, 90] degrees", self.angle),
            ));
        }
        self.location().validate()
    }

    /// Impact point.
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Velocity in m/s
    pub fn velocity_ms(&self) -> f64 {
        self.velocity * 1000.0
    }

    /// Mass of a sphere of this diameter and density (kg)
    pub fn mass_kg(&self) -> f64 {
        sphere_mass(self.diameter, self.density)
    }

    /// Kinetic energy at impact (J)
    pub fn kinetic_energy_j(&self) -> f64 {
        0.5 * self.mass_kg() * self.velocity_ms().powi(2)
    }
}

/// Mass of a homogeneous sphere (kg).
pub fn sphere_mass(diameter_m: f64, density: f64) -> f64 {
    let radius = diameter_m / 2.0;
    (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3) * density
}

/// Common impactor compositions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    Ice,
    Carbonaceous,
    Rocky,
    Iron,
}

impl MaterialPreset {
    /// Representative bulk density (kg/m³).
    pub fn density(&self) -> f64 {
        match self {
            MaterialPreset::Ice => 1000.0,
            MaterialPreset::Carbonaceous => 2000.0,
            MaterialPreset::Rocky => 3000.0,
            MaterialPreset::Iron => 8000.0,
        }
    }
}

impl FromStr for MaterialPreset {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ice" => Ok(MaterialPreset::Ice),
            "carbonaceous" => Ok(MaterialPreset::Carbonaceous),
            "rocky" | "stony" => Ok(MaterialPreset::Rocky),
            "iron" | "metallic" => Ok(MaterialPreset::Iron),
            other => Err(ImpactError::invalid(
                "material",
                format!("unknown material {other:?}"),
            )),
        }
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both coordinates are finite and inside their ranges.
    pub fn validate(&self) -> Result<(), ImpactError> {
        require_finite("lat", self.lat)?;
        require_finite("lon", self.lon)?;
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ImpactError::invalid(
                "lat",
                format!("{} is outside [-90, 90]", self.lat),
            ));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(ImpactError::invalid(
                "lon",
                format!("{} is outside [-180, 180]", self.lon),
            ));
        }
        Ok(())
    }

    /// Human-readable coordinates, e.g. `"40.71°N, 74.01°W"`.
    ///
    /// Used as the place name whenever reverse geocoding is unavailable.
    pub fn format_coordinates(&self) -> String {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.2}°{}, {:.2}°{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_coordinates())
    }
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), ImpactError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ImpactError::invalid(field, "must be a finite number"))
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ImpactError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ImpactError::invalid(field, format!("{value} must be positive")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_mass() {
        // 100 m stony sphere: 4/3·π·50³·3000 ≈ 1.5708e9 kg
        let mass = sphere_mass(100.0, 3000.0);
        assert_relative_eq!(mass, 1.570_796_3e9, max_relative = 1e-6);
    }

    #[test]
    fn test_kinetic_energy() {
        let params = ImpactorParameters::new(100.0, 20.0, 45.0, 3000.0, 0.0, 0.0);
        // 0.5 · 1.5708e9 · (2e4)² = π·1e17 J
        assert_relative_eq!(
            params.kinetic_energy_j(),
            std::f64::consts::PI * 1e17,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_seconds_per_year() {
        assert_eq!(SECONDS_PER_YEAR, 31_557_600.0);
    }

    #[test]
    fn test_validate_accepts_vertical_impact() {
        let params = ImpactorParameters::new(50.0, 17.0, 90.0, 2000.0, 89.9, -179.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base = ImpactorParameters::new(100.0, 20.0, 45.0, 3000.0, 10.0, 10.0);

        let cases = [
            (ImpactorParameters { diameter: 0.0, ..base }, "diameter"),
            (ImpactorParameters { velocity: -3.0, ..base }, "velocity"),
            (ImpactorParameters { density: f64::NAN, ..base }, "density"),
            (ImpactorParameters { angle: 0.0, ..base }, "angle"),
            (ImpactorParameters { angle: 91.0, ..base }, "angle"),
            (ImpactorParameters { lat: 90.5, ..base }, "lat"),
            (ImpactorParameters { lon: f64::INFINITY, ..base }, "lon"),
        ];

        for (params, expected_field) in cases {
            match params.validate() {
                Err(ImpactError::InvalidField { field, .. }) => {
                    assert_eq!(field, expected_field, "wrong field for {params:?}")
                }
                other => panic!("expected invalid {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_material_presets() {
        assert_eq!("ice".parse::<MaterialPreset>().unwrap().density(), 1000.0);
        assert_eq!("Stony".parse::<MaterialPreset>().unwrap(), MaterialPreset::Rocky);
        assert_eq!(MaterialPreset::Iron.density(), 8000.0);
        assert!("cheese".parse::<MaterialPreset>().is_err());
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(GeoPoint::new(40.7128, -74.006).format_coordinates(), "40.71°N, 74.01°W");
        assert_eq!(GeoPoint::new(-33.8688, 151.2093).format_coordinates(), "33.87°S, 151.21°E");
        assert_eq!(GeoPoint::new(0.0, 0.0).to_string(), "0.00°N, 0.00°E");
    }
}
