//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use impactor::config::ServiceConfig;
use impactor::geocode::{Address, PlaceNameProvider};
use impactor::population::DensityProvider;
use impactor::types::ImpactorParameters;
use impactor::{ImpactError, ImpactService};

/// 100 m stony asteroid at 20 km/s, 45°, over New York.
pub fn stony_100m() -> ImpactorParameters {
    ImpactorParameters::new(100.0, 20.0, 45.0, 3000.0, 40.7128, -74.006)
}

/// 1 km stony asteroid at 20 km/s striking vertically over Paris.
pub fn stony_1km() -> ImpactorParameters {
    ImpactorParameters::new(1000.0, 20.0, 90.0, 3000.0, 48.85, 2.35)
}

/// JSON body for `calculate-impact` built from parameters.
pub fn impact_body(params: &ImpactorParameters) -> String {
    serde_json::json!({
        "diameter": params.diameter,
        "velocity": params.velocity,
        "angle": params.angle,
        "density": params.density,
        "lat": params.lat,
        "lon": params.lon,
    })
    .to_string()
}

/// JSON body for `calculate-mitigation`.
pub fn mitigation_body(strategy: &str, warning_years: f64, velocity_change_cm_s: f64) -> String {
    serde_json::json!({
        "asteroidParams": { "diameter": 100.0, "velocity": 20.0, "lat": 40.7128, "lon": -74.006 },
        "mitigationType": strategy,
        "warningTime": warning_years,
        "velocityChange": velocity_change_cm_s,
    })
    .to_string()
}

/// Density provider that always reports the same value.
pub struct UniformDensity(pub f64);

impl DensityProvider for UniformDensity {
    fn lookup_density(&self, _lat: f64, _lon: f64) -> Result<Option<f64>, ImpactError> {
        Ok(Some(self.0))
    }
}

/// Density provider whose upstream is always down.
pub struct OfflineDensity;

impl DensityProvider for OfflineDensity {
    fn lookup_density(&self, _lat: f64, _lon: f64) -> Result<Option<f64>, ImpactError> {
        Err(ImpactError::UpstreamUnavailable("population service offline".into()))
    }
}

/// Geocoder that names every point after the same city.
pub struct FixedCity(pub &'static str, pub &'static str);

impl PlaceNameProvider for FixedCity {
    fn lookup_place_name(&self, _lat: f64, _lon: f64) -> Result<Option<Address>, ImpactError> {
        Ok(Some(Address {
            city: Some(self.0.to_string()),
            country: Some(self.1.to_string()),
            ..Address::default()
        }))
    }
}

/// Service backed by a uniform measured density.
pub fn service_with_density(density: f64) -> ImpactService {
    ImpactService::new(ServiceConfig::default(), Arc::new(UniformDensity(density)))
}
