//! Configuration for grid caches.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::LatLonGrid;
use crate::spec::GridSpec;

/// Configuration for a [`GridCache`](crate::GridCache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grids built when the cache is created.
    pub prewarm: Vec<GridSpec>,

    /// Build the prewarm list on the rayon pool instead of one by one.
    pub parallel_warm: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            prewarm: Vec::new(),
            parallel_warm: true,
        }
    }
}

/// Parse a comma separated list of short grid names.
pub fn parse_grid_list(value: &str) -> Result<Vec<GridSpec>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

impl GridConfig {
    /// Load configuration from environment variables.
    ///
    /// - `GRID_PREWARM`: short names such as `O32,F48,N32`
    /// - `GRID_PARALLEL_WARM`: `true`/`1` or anything else for false
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_PREWARM") {
            match parse_grid_list(&val) {
                Ok(specs) => config.prewarm = specs,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring GRID_PREWARM"),
            }
        }

        if let Ok(val) = std::env::var("GRID_PARALLEL_WARM") {
            config.parallel_warm = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    ///
    /// Entries are checked by their parameters only; nothing is built.
    pub fn validate(&self) -> Result<()> {
        for spec in &self.prewarm {
            match *spec {
                GridSpec::LatLon {
                    min_lat,
                    max_lat,
                    min_lon,
                    max_lon,
                    lat_step,
                    lon_step,
                } => {
                    LatLonGrid::validate(min_lat, max_lat, min_lon, max_lon, lat_step, lon_step)
                        .map_err(|e| GridError::config(format!("prewarm entry {spec}: {e}")))?;
                }
                GridSpec::RegularGaussian { n }
                | GridSpec::ReducedGaussian { n }
                | GridSpec::OctahedralGaussian { n } => {
                    if n == 0 {
                        return Err(GridError::config(format!(
                            "prewarm entry {spec}: gaussian order must be > 0"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
