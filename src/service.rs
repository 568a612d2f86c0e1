//! Request boundary for the two estimator endpoints.
//!
//! [`ImpactService`] validates raw JSON requests, runs the pure estimators,
//! consults the density and place-name collaborators through their caches,
//! and shapes every outcome into a [`Response`]. It holds no global state and
//! can be shared across threads behind an `Arc`.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::cache::CoordinateCache;
use crate::casualty::{compute_casualties, CasualtyInputs, PopulationImpact};
use crate::config::ServiceConfig;
use crate::error::ImpactError;
use crate::geocode::{lookup_display_name, name_or_coordinates, PlaceNameProvider};
use crate::mitigation::{compute_mitigation, DeflectionStrategy, MitigationOutcome, MitigationParameters};
use crate::physics::{compute_impact_effects, ImpactEffects};
use crate::population::{DensityProvider, NoPopulationData, PopulationGrid};
use crate::types::{GeoPoint, ImpactorParameters, MaterialPreset};

const IMPACT_FAILURE: &str = "Failed to calculate impact";
const MITIGATION_FAILURE: &str = "Failed to calculate mitigation";

/// A numeric request field. Absent and `null` are both "missing"; any other
/// non-number is rejected under the field's own name.
fn number(field: &'static str, value: &Option<Value>) -> Result<f64, ImpactError> {
    match value {
        None | Some(Value::Null) => Err(ImpactError::MissingField(field)),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| ImpactError::invalid(field, "must be a number")),
    }
}

fn text<'a>(field: &'static str, value: &'a Option<Value>) -> Result<Option<&'a str>, ImpactError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ImpactError::invalid(field, "must be a string")),
    }
}

/// Body of a `calculate-impact` request.
///
/// Fields are kept as raw JSON until [`ImpactRequest::to_parameters`] so an
/// absent or mistyped one is reported by name. `material` may stand in for
/// `density`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRequest {
    pub diameter: Option<Value>,
    pub velocity: Option<Value>,
    pub angle: Option<Value>,
    pub density: Option<Value>,
    pub material: Option<Value>,
    pub lat: Option<Value>,
    pub lon: Option<Value>,
}

impl ImpactRequest {
    pub fn to_parameters(&self) -> Result<ImpactorParameters, ImpactError> {
        let diameter = number("diameter", &self.diameter)?;
        let velocity = number("velocity", &self.velocity)?;
        let angle = number("angle", &self.angle)?;
        let density = match (&self.density, text("material", &self.material)?) {
            (None | Some(Value::Null), Some(material)) => MaterialPreset::from_str(material)?.density(),
            (density, _) => number("density", density)?,
        };
        let params = ImpactorParameters::new(
            diameter,
            velocity,
            angle,
            density,
            number("lat", &self.lat)?,
            number("lon", &self.lon)?,
        );
        params.validate()?;
        Ok(params)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AsteroidParams {
    pub diameter: Option<Value>,
    pub velocity: Option<Value>,
    pub lat: Option<Value>,
    pub lon: Option<Value>,
}

/// Body of a `calculate-mitigation` request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationRequest {
    pub asteroid_params: Option<Value>,
    pub mitigation_type: Option<Value>,
    pub warning_time: Option<Value>,
    pub velocity_change: Option<Value>,
}

impl MitigationRequest {
    pub fn to_parameters(&self) -> Result<MitigationParameters, ImpactError> {
        let asteroid: AsteroidParams = match &self.asteroid_params {
            None | Some(Value::Null) => return Err(ImpactError::MissingField("asteroidParams")),
            Some(value) => AsteroidParams::deserialize(value)
                .map_err(|_| ImpactError::invalid("asteroidParams", "must be an object"))?,
        };
        let strategy: DeflectionStrategy = text("mitigationType", &self.mitigation_type)?
            .ok_or(ImpactError::MissingField("mitigationType"))?
            .parse()?;

        let params = MitigationParameters {
            diameter: number("asteroidParams.diameter", &asteroid.diameter)?,
            velocity: number("asteroidParams.velocity", &asteroid.velocity)?,
            lat: number("asteroidParams.lat", &asteroid.lat)?,
            lon: number("asteroidParams.lon", &asteroid.lon)?,
            strategy,
            warning_time_years: number("warningTime", &self.warning_time)?,
            velocity_change_cm_s: number("velocityChange", &self.velocity_change)?,
        };
        params.validate()?;
        Ok(params)
    }
}

/// Full answer to a `calculate-impact` request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    #[serde(flatten)]
    pub effects: ImpactEffects,
    pub population_impact: PopulationImpact,
    pub location_name: String,
}

/// The operations exposed over the JSON boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    CalculateImpact,
    CalculateMitigation,
}

impl Endpoint {
    /// Accepts `calculate-impact`, `/calculate-impact` or `/api/calculate-impact`.
    pub fn from_path(path: &str) -> Option<Self> {
        let name = path.trim_start_matches('/');
        let name = name.strip_prefix("api/").unwrap_or(name);
        match name {
            "calculate-impact" => Some(Endpoint::CalculateImpact),
            "calculate-mitigation" => Some(Endpoint::CalculateMitigation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::CalculateImpact => "calculate-impact",
            Endpoint::CalculateMitigation => "calculate-mitigation",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::CalculateImpact => IMPACT_FAILURE,
            Endpoint::CalculateMitigation => MITIGATION_FAILURE,
        }
    }
}

/// Status code and JSON body returned to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Response {
    fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message.into() }),
        }
    }

    fn from_error(err: &ImpactError, fallback: &str) -> Self {
        Self::error(err.status_code(), err.public_message(fallback))
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub struct ImpactService {
    density: Arc<dyn DensityProvider>,
    geocoder: Option<Arc<dyn PlaceNameProvider>>,
    density_cache: CoordinateCache<Option<f64>>,
    place_cache: CoordinateCache<Option<String>>,
    config: ServiceConfig,
}

impl ImpactService {
    pub fn new(config: ServiceConfig, density: Arc<dyn DensityProvider>) -> Self {
        Self {
            density,
            geocoder: None,
            density_cache: lookup_cache(&config),
            place_cache: lookup_cache(&config),
            config,
        }
    }

    /// Build a service from configuration, loading the population grid when
    /// one is configured.
    pub fn from_config(config: ServiceConfig) -> Result<Self, ImpactError> {
        let density: Arc<dyn DensityProvider> = match &config.population_csv {
            Some(path) => {
                let grid = PopulationGrid::load(path, config.grid)?;
                info!(path = %path.display(), points = grid.len(), "loaded population grid");
                Arc::new(grid)
            }
            None => {
                info!("no population dataset configured; using geographic estimates");
                Arc::new(NoPopulationData)
            }
        };
        Ok(Self::new(config, density))
    }

    pub fn with_geocoder(mut self, geocoder: Arc<dyn PlaceNameProvider>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Measured density at `point`, or `None` to use the geographic estimate.
    ///
    /// A provider answer that is not a finite, non-negative number counts as
    /// a failed lookup and is not cached.
    fn measured_density(&self, point: GeoPoint) -> Option<f64> {
        let lookup = self.density_cache.get_or_try_insert_with(point, || {
            match self.density.lookup_density(point.lat, point.lon)? {
                Some(d) if !d.is_finite() || d < 0.0 => Err(ImpactError::UpstreamUnavailable(format!(
                    "density provider returned {d} people/km²"
                ))),
                density => Ok(density),
            }
        });
        match lookup {
            Ok(density) => density,
            Err(err) => {
                warn!(lat = point.lat, lon = point.lon, error = %err, "density lookup failed; estimating from region");
                None
            }
        }
    }

    fn place_name(&self, point: GeoPoint) -> String {
        let Some(geocoder) = &self.geocoder else {
            return point.format_coordinates();
        };
        let lookup = self
            .place_cache
            .get_or_try_insert_with(point, || lookup_display_name(geocoder.as_ref(), point));
        name_or_coordinates(point, lookup)
    }

    pub fn calculate_impact(&self, request: &ImpactRequest) -> Result<ImpactReport, ImpactError> {
        let params = request.to_parameters()?;
        let effects = compute_impact_effects(&params);
        if let Some(field) = effects.first_non_finite() {
            error!(?params, field, "impact computation produced a non-finite value");
            return Err(ImpactError::NonFiniteResult(field));
        }

        let location = params.location();
        let density = self.measured_density(location);
        let population_impact = compute_casualties(&CasualtyInputs::from_effects(&effects), density);
        let location_name = self.place_name(location);

        info!(
            diameter = params.diameter,
            energy_mt = effects.energy.energy_megatons,
            fatalities = population_impact.estimated_fatalities,
            severity = %population_impact.severity,
            location = %location_name,
            "impact calculated"
        );

        Ok(ImpactReport {
            effects,
            population_impact,
            location_name,
        })
    }

    pub fn calculate_mitigation(&self, request: &MitigationRequest) -> Result<MitigationOutcome, ImpactError> {
        let params = request.to_parameters()?;
        let outcome = compute_mitigation(&params);
        if !outcome.deflection_distance_km.is_finite() {
            error!(?params, "mitigation computation produced a non-finite deflection");
            return Err(ImpactError::NonFiniteResult("deflection distance"));
        }

        info!(
            strategy = %params.strategy,
            description = params.strategy.description(),
            deflection_km = outcome.deflection_distance_km,
            success = outcome.success,
            probability = outcome.success_probability_percent,
            "mitigation calculated"
        );
        Ok(outcome)
    }

    /// Handle one JSON request for `endpoint`.
    pub fn handle_json(&self, endpoint: &str, body: &str) -> Response {
        let Some(endpoint) = Endpoint::from_path(endpoint) else {
            debug!(endpoint, "unknown endpoint");
            return Response::error(404, format!("unknown endpoint: {endpoint}"));
        };

        let result = match endpoint {
            Endpoint::CalculateImpact => parse_body::<ImpactRequest>(body)
                .and_then(|req| self.calculate_impact(&req))
                .and_then(|report| Ok(serde_json::to_value(report)?)),
            Endpoint::CalculateMitigation => parse_body::<MitigationRequest>(body)
                .and_then(|req| self.calculate_mitigation(&req))
                .and_then(|outcome| Ok(serde_json::to_value(outcome)?)),
        };

        match result {
            Ok(value) => Response::ok(value),
            Err(err) => {
                if err.is_invalid_input() {
                    debug!(endpoint = endpoint.as_str(), error = %err, "rejected request");
                } else {
                    error!(endpoint = endpoint.as_str(), error = %err, "request failed");
                }
                Response::from_error(&err, endpoint.failure_message())
            }
        }
    }
}

fn lookup_cache<V: Clone>(config: &ServiceConfig) -> CoordinateCache<V> {
    CoordinateCache::new(config.cache_ttl(), config.cache_capacity, config.cache_precision)
}

/// A body that is not a JSON object of the expected shape is the caller's
/// fault, unlike a serialization failure on the way out.
fn parse_body<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, ImpactError> {
    serde_json::from_str(body).map_err(|e| ImpactError::invalid("body", e.to_string()))
}
