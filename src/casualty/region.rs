//! Population density resolution for the casualty model.
//!
//! A measured density (from a gridded dataset) is bucketed by value. Without
//! one, a handful of hard-coded bounding boxes assign a calibrated fallback
//! density. The boxes are intentionally coarse; the casualty rates were tuned
//! against exactly these values.

use std::fmt;

use serde::Serialize;

use crate::types::GeoPoint;

/// Density assigned to open ocean when no measurement exists (people/km²).
pub const OCEAN_DENSITY: f64 = 0.5;
/// Density assigned to polar regions (people/km²).
pub const POLAR_DENSITY: f64 = 1.0;
/// Density assigned to the major population belts (people/km²).
pub const POPULATED_DENSITY: f64 = 150.0;
/// Density assigned to everything else (people/km²).
pub const RURAL_DENSITY: f64 = 25.0;

/// Kind of terrain around the impact point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LocationCategory {
    #[serde(rename = "Unpopulated/Ocean")]
    Unpopulated,
    #[serde(rename = "Remote/Wilderness")]
    Wilderness,
    #[serde(rename = "Rural Area")]
    Rural,
    #[serde(rename = "Suburban Area")]
    Suburban,
    #[serde(rename = "Urban Area")]
    Urban,
    #[serde(rename = "Dense Urban Area")]
    DenseUrban,
    #[serde(rename = "Ocean/Remote")]
    OceanRemote,
    #[serde(rename = "Polar Region")]
    Polar,
    #[serde(rename = "Populated Region")]
    Populated,
}

impl LocationCategory {
    /// Bucket a measured density (people/km²).
    pub fn from_density(density: f64) -> Self {
        if density == 0.0 {
            LocationCategory::Unpopulated
        } else if density < 1.0 {
            LocationCategory::Wilderness
        } else if density < 10.0 {
            LocationCategory::Rural
        } else if density < 100.0 {
            LocationCategory::Suburban
        } else if density < 1000.0 {
            LocationCategory::Urban
        } else {
            LocationCategory::DenseUrban
        }
    }

    /// Water and ice absorb much of the thermal pulse and blast wave.
    pub fn is_dampened(&self) -> bool {
        matches!(self, LocationCategory::OceanRemote | LocationCategory::Polar)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::Unpopulated => "Unpopulated/Ocean",
            LocationCategory::Wilderness => "Remote/Wilderness",
            LocationCategory::Rural => "Rural Area",
            LocationCategory::Suburban => "Suburban Area",
            LocationCategory::Urban => "Urban Area",
            LocationCategory::DenseUrban => "Dense Urban Area",
            LocationCategory::OceanRemote => "Ocean/Remote",
            LocationCategory::Polar => "Polar Region",
            LocationCategory::Populated => "Populated Region",
        }
    }
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a density value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DataSource {
    #[serde(rename = "World Population CSV Data")]
    Measured,
    #[serde(rename = "Geographic Estimation")]
    Estimated,
}

/// Density used by the casualty model, with its provenance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulationEstimate {
    /// People per km².
    pub density: f64,
    pub category: LocationCategory,
    pub data_source: DataSource,
}

impl PopulationEstimate {
    /// Resolve the density for `location`, preferring a measured value.
    pub fn resolve(location: GeoPoint, measured_density: Option<f64>) -> Self {
        match measured_density {
            Some(density) => Self {
                density,
                category: LocationCategory::from_density(density),
                data_source: DataSource::Measured,
            },
            None => estimate_region(location),
        }
    }
}

/// Open-ocean longitude bands (Pacific, Atlantic, Indian).
fn in_ocean_band(lon: f64) -> bool {
    (lon > -180.0 && lon < -140.0) || (lon > -60.0 && lon < 20.0) || (lon > 40.0 && lon < 140.0)
}

/// North America, Europe, East Asia and south-eastern South America.
fn in_population_belt(lat: f64, lon: f64) -> bool {
    (lat > 20.0 && lat < 50.0 && lon > -130.0 && lon < -60.0)
        || (lat > 35.0 && lat < 65.0 && lon > -10.0 && lon < 40.0)
        || (lat > 20.0 && lat < 45.0 && lon > 70.0 && lon < 145.0)
        || (lat > -35.0 && lat < -10.0 && lon > -60.0 && lon < -35.0)
}

/// Geographic fallback used when no measured density is available.
///
/// Checks run in order: ocean band below 40°, polar above 60°, population
/// belts, then rural.
pub fn estimate_region(location: GeoPoint) -> PopulationEstimate {
    let GeoPoint { lat, lon } = location;
    let abs_lat = lat.abs();

    let (density, category) = if abs_lat < 40.0 && in_ocean_band(lon) {
        (OCEAN_DENSITY, LocationCategory::OceanRemote)
    } else if abs_lat > 60.0 {
        (POLAR_DENSITY, LocationCategory::Polar)
    } else if in_population_belt(lat, lon) {
        (POPULATED_DENSITY, LocationCategory::Populated)
    } else {
        (RURAL_DENSITY, LocationCategory::Rural)
    };

    PopulationEstimate {
        density,
        category,
        data_source: DataSource::Estimated,
    }
}
