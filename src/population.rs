//! Measured population density lookup.
//!
//! [`DensityProvider`] is the seam between the casualty model and whatever
//! supplies measured densities. [`PopulationGrid`] is the bundled
//! implementation: a point cloud loaded from a `lat,lng,pop` CSV and sampled
//! with inverse-distance weighting.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use wide::f64x4;

use crate::error::ImpactError;

/// Source of measured population densities (people/km²).
pub trait DensityProvider: Send + Sync {
    /// Density at a point.
    ///
    /// `Ok(None)` means no dataset is available and the caller should fall
    /// back to geographic estimation. `Err` is an upstream failure.
    fn lookup_density(&self, lat: f64, lon: f64) -> Result<Option<f64>, ImpactError>;
}

/// Provider used when no dataset is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPopulationData;

impl DensityProvider for NoPopulationData {
    fn lookup_density(&self, _lat: f64, _lon: f64) -> Result<Option<f64>, ImpactError> {
        Ok(None)
    }
}

/// Inverse-distance weighting parameters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Planar distance in degrees within which samples contribute.
    pub search_radius_deg: f64,
    /// Stop collecting samples once this many are in range.
    pub max_neighbors: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            search_radius_deg: 2.0,
            max_neighbors: 50,
        }
    }
}

/// Added to every distance so a sample sitting exactly on the query point
/// gets a large but finite weight.
const DISTANCE_SOFTENING_DEG: f64 = 0.01;

#[derive(thiserror::Error, Debug)]
pub enum PopulationGridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("population CSV is missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("population CSV line {line}: {reason}")]
    BadRow { line: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One sample as it appears in the dataset.
#[derive(Debug, Deserialize)]
struct GridRow {
    lat: f64,
    lng: f64,
    pop: f64,
}

impl From<PopulationGridError> for ImpactError {
    fn from(err: PopulationGridError) -> Self {
        match err {
            PopulationGridError::Io(e) => ImpactError::Io(e),
            other => ImpactError::Config(other.to_string()),
        }
    }
}

/// Population samples stored column-wise for vectorised distance checks.
#[derive(Clone, Debug, Default)]
pub struct PopulationGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
    densities: Vec<f64>,
    config: GridConfig,
}

impl PopulationGrid {
    pub fn load(path: impl AsRef<Path>, config: GridConfig) -> Result<Self, PopulationGridError> {
        let text = fs::read_to_string(path)?;
        Self::from_csv_str(&text, config)
    }

    /// Parse CSV text with a header naming `lat`, `lng` and `pop` columns
    /// (any order, extra columns ignored). Fields may be quoted.
    pub fn from_csv_str(text: &str, config: GridConfig) -> Result<Self, PopulationGridError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        for column in ["lat", "lng", "pop"] {
            if !headers.iter().any(|h| h == column) {
                return Err(PopulationGridError::MissingColumn(column));
            }
        }

        let mut grid = Self {
            config,
            ..Self::default()
        };

        for row in reader.deserialize::<GridRow>() {
            let row = row.map_err(|e| PopulationGridError::BadRow {
                line: e.position().map_or(0, |p| p.line() as usize),
                reason: match e.kind() {
                    csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
                    _ => e.to_string(),
                },
            })?;
            grid.lats.push(row.lat);
            grid.lons.push(row.lng);
            grid.densities.push(row.pop);
        }

        Ok(grid)
    }

    pub fn len(&self) -> usize {
        self.densities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Inverse-distance weighted density at a point.
    ///
    /// Distance is planar in degrees. Samples are taken in file order until
    /// `max_neighbors` fall inside the search radius, so on dense data the
    /// result depends on row order. Returns `Some(0.0)` when nothing is in
    /// range and `None` for an empty grid.
    pub fn interpolate(&self, lat: f64, lon: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let GridConfig {
            search_radius_deg,
            max_neighbors,
        } = self.config;
        let q_lat = f64x4::splat(lat);
        let q_lon = f64x4::splat(lon);

        let mut found = 0usize;
        let mut total_weight = 0.0;
        let mut weighted_density = 0.0;

        'scan: for start in (0..self.len()).step_by(4) {
            let end = (start + 4).min(self.len());
            // Padding lanes are NaN and never pass the radius check.
            let mut lat4 = [f64::NAN; 4];
            let mut lon4 = [f64::NAN; 4];
            lat4[..end - start].copy_from_slice(&self.lats[start..end]);
            lon4[..end - start].copy_from_slice(&self.lons[start..end]);

            let d_lat = q_lat - f64x4::new(lat4);
            let d_lon = q_lon - f64x4::new(lon4);
            let distances = (d_lat * d_lat + d_lon * d_lon).sqrt().to_array();

            for (lane, &distance) in distances.iter().enumerate().take(end - start) {
                if found >= max_neighbors {
                    break 'scan;
                }
                if distance <= search_radius_deg {
                    let weight = 1.0 / (distance + DISTANCE_SOFTENING_DEG);
                    weighted_density += self.densities[start + lane] * weight;
                    total_weight += weight;
                    found += 1;
                }
            }
        }

        if total_weight > 0.0 {
            Some(weighted_density / total_weight)
        } else {
            Some(0.0)
        }
    }
}

impl DensityProvider for PopulationGrid {
    fn lookup_density(&self, lat: f64, lon: f64) -> Result<Option<f64>, ImpactError> {
        Ok(self.interpolate(lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "lat,lng,pop\n\
        40.0,-74.0,1000\n\
        40.5,-74.0,200\n\
        10.0,10.0,50\n";

    fn grid(text: &str) -> PopulationGrid {
        PopulationGrid::from_csv_str(text, GridConfig::default()).unwrap()
    }

    #[test]
    fn test_parse() {
        let grid = grid(SAMPLE);
        assert_eq!(grid.len(), 3);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_columns_in_any_order() {
        let grid = grid("pop,country,lng,lat\n300,US,-74.0,40.0\n");
        assert_relative_eq!(grid.interpolate(40.0, -74.0).unwrap(), 300.0);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let grid = grid("city,lat,lng,pop\n\"Washington, D.C.\",38.9,-77.0,4000\n\"Paris\",48.85,2.35,20000\n");
        assert_eq!(grid.len(), 2);
        assert_relative_eq!(grid.interpolate(38.9, -77.0).unwrap(), 4000.0);
    }

    #[test]
    fn test_missing_column() {
        let err = PopulationGrid::from_csv_str("lat,lon,pop\n1,2,3\n", GridConfig::default()).unwrap_err();
        assert!(matches!(err, PopulationGridError::MissingColumn("lng")));
    }

    #[test]
    fn test_bad_row_reports_line() {
        let err = PopulationGrid::from_csv_str("lat,lng,pop\n1,2,3\n\n4,x,6\n", GridConfig::default())
            .unwrap_err();
        match err {
            PopulationGridError::BadRow { line, .. } => assert_eq!(line, 4),
            other => panic!("expected BadRow, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_grid_has_no_data() {
        let grid = grid("lat,lng,pop\n");
        assert!(grid.is_empty());
        assert_eq!(grid.interpolate(0.0, 0.0), None);
        assert_eq!(grid.lookup_density(0.0, 0.0).unwrap(), None);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        assert_eq!(grid(SAMPLE).interpolate(-30.0, 150.0), Some(0.0));
    }

    #[test]
    fn test_inverse_distance_weighting() {
        // Query sits on the first sample and 0.5° from the second.
        let density = grid(SAMPLE).interpolate(40.0, -74.0).unwrap();
        let w0 = 1.0 / 0.01;
        let w1 = 1.0 / 0.51;
        assert_relative_eq!(density, (1000.0 * w0 + 200.0 * w1) / (w0 + w1), max_relative = 1e-12);
    }

    #[test]
    fn test_radius_boundary_inclusive() {
        let grid = grid("lat,lng,pop\n0.0,2.0,80\n");
        assert_relative_eq!(grid.interpolate(0.0, 0.0).unwrap(), 80.0);
        assert_eq!(grid.interpolate(0.0, -0.001), Some(0.0));
    }

    #[test]
    fn test_neighbor_limit_follows_file_order() {
        // Six in-range samples; with a limit of 5 the sixth (very dense) one
        // is never seen, even though it is the closest.
        let mut csv = String::from("lat,lng,pop\n");
        for _ in 0..5 {
            csv.push_str("1.0,1.0,10\n");
        }
        csv.push_str("0.0,0.0,100000\n");

        let config = GridConfig {
            max_neighbors: 5,
            ..GridConfig::default()
        };
        let limited = PopulationGrid::from_csv_str(&csv, config).unwrap();
        assert_relative_eq!(limited.interpolate(0.0, 0.0).unwrap(), 10.0, max_relative = 1e-12);

        let unlimited = grid(&csv);
        assert!(unlimited.interpolate(0.0, 0.0).unwrap() > 10.0);
    }

    #[test]
    fn test_no_population_data_provider() {
        assert_eq!(NoPopulationData.lookup_density(1.0, 2.0).unwrap(), None);
    }

    #[test]
    fn test_grid_error_converts_to_config_error() {
        let err: ImpactError = PopulationGridError::MissingColumn("pop").into();
        assert!(matches!(err, ImpactError::Config(_)));
        assert_eq!(err.status_code(), 500);
    }
}
