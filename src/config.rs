//! Runtime service configuration loaded from a TOML file.
//!
//! Every key is optional. Missing keys keep their compiled defaults, so a
//! minimal file can point at a population dataset and nothing else:
//!
//! ```toml
//! population_csv = "data/world_population.csv"
//!
//! [grid]
//! search_radius_deg = 1.5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::ImpactError;
use crate::population::GridConfig;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Gridded population CSV (`lat,lng,pop`). Without one, casualty
    /// estimates use the geographic fallback.
    pub population_csv: Option<PathBuf>,

    // ── Lookup cache ─────────────────────────────────────────────────────────
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
    /// Decimal places coordinates are rounded to before caching.
    pub cache_precision: u32,

    // ── Density interpolation ────────────────────────────────────────────────
    pub grid: GridConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            population_csv: None,
            cache_ttl_secs: 3600,
            cache_capacity: 1024,
            cache_precision: 2,
            grid: GridConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ImpactError> {
        let config: Self = toml::from_str(text).map_err(|e| ImpactError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is not an error: defaults are returned. An unreadable
    /// or malformed file is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImpactError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents)
                    .map_err(|e| ImpactError::Config(format!("{}: {e}", path.display())))?;
                info!(path = %path.display(), "loaded service config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file found; using compiled defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self) -> Result<(), ImpactError> {
        let radius = self.grid.search_radius_deg;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ImpactError::Config(format!(
                "grid.search_radius_deg must be positive, got {radius}"
            )));
        }
        if self.grid.max_neighbors == 0 {
            return Err(ImpactError::Config("grid.max_neighbors must be at least 1".into()));
        }
        if self.cache_precision > 6 {
            return Err(ImpactError::Config(format!(
                "cache_precision must be at most 6, got {}",
                self.cache_precision
            )));
        }
        Ok(())
    }
}
