//! Grid construction parameters and their short names.
//!
//! Gaussian grids use the conventional names `F{n}` (regular), `N{n}`
//! (reduced) and `O{n}` (octahedral). Lat/lon grids are keyed as
//! `L{min_lat},{max_lat},{min_lon},{max_lon},{lat_step},{lon_step}` with
//! six decimals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::{GridLayout, LatLonGrid, OctahedralGaussian, ReducedGaussian, RegularGaussian};

/// Everything needed to build a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridSpec {
    LatLon {
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
        lat_step: f64,
        lon_step: f64,
    },
    RegularGaussian {
        n: usize,
    },
    ReducedGaussian {
        n: usize,
    },
    OctahedralGaussian {
        n: usize,
    },
}

impl GridSpec {
    /// GFS 0.25° global grid.
    pub fn gfs_0p25() -> Self {
        Self::LatLon {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lon: 0.0,
            max_lon: 359.75,
            lat_step: 0.25,
            lon_step: 0.25,
        }
    }

    /// Canonical cache key and short name.
    pub fn cache_key(&self) -> String {
        match *self {
            Self::LatLon {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
                lat_step,
                lon_step,
            } => format!(
                "L{min_lat:.6},{max_lat:.6},{min_lon:.6},{max_lon:.6},{lat_step:.6},{lon_step:.6}"
            ),
            Self::RegularGaussian { n } => format!("F{n}"),
            Self::ReducedGaussian { n } => format!("N{n}"),
            Self::OctahedralGaussian { n } => format!("O{n}"),
        }
    }

    /// Build the grid without caching.
    pub fn build(&self) -> Result<GridLayout> {
        let layout = match *self {
            Self::LatLon {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
                lat_step,
                lon_step,
            } => LatLonGrid::new(min_lat, max_lat, min_lon, max_lon, lat_step, lon_step)?.into(),
            Self::RegularGaussian { n } => RegularGaussian::new(n)?.into(),
            Self::ReducedGaussian { n } => ReducedGaussian::new(n)?.into(),
            Self::OctahedralGaussian { n } => OctahedralGaussian::new(n)?.into(),
        };
        Ok(layout)
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

impl FromStr for GridSpec {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let prefix = chars
            .next()
            .ok_or_else(|| GridError::parse_spec("empty grid name"))?;
        let body = chars.as_str();

        let order = || -> Result<usize> {
            match body.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(GridError::parse_spec(format!("bad gaussian order in {s:?}"))),
            }
        };

        match prefix.to_ascii_uppercase() {
            'F' => Ok(Self::RegularGaussian { n: order()? }),
            'N' => Ok(Self::ReducedGaussian { n: order()? }),
            'O' => Ok(Self::OctahedralGaussian { n: order()? }),
            'L' => {
                let values = body
                    .split(',')
                    .map(|v| v.trim().parse::<f64>())
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| GridError::parse_spec(format!("{s:?}: {e}")))?;

                match values.as_slice() {
                    &[min_lat, max_lat, min_lon, max_lon, lat_step, lon_step] => Ok(Self::LatLon {
                        min_lat,
                        max_lat,
                        min_lon,
                        max_lon,
                        lat_step,
                        lon_step,
                    }),
                    _ => Err(GridError::parse_spec(format!(
                        "{s:?}: expected 6 latlon values, got {}",
                        values.len()
                    ))),
                }
            }
            other => Err(GridError::parse_spec(format!("unknown grid prefix {other:?} in {s:?}"))),
        }
    }
}
