//! Gaussian grids: regular (`F`), reduced (`N`) and octahedral (`O`).
//!
//! All three share the same `2N` quadrature latitudes, ordered north to
//! south. They differ in how many longitudes each row carries.

use std::borrow::Cow;

use super::ragged::{row_longitudes, RaggedRows};
use super::Grid;
use crate::error::{GridError, Result};
use crate::nearest::{guess_nearest, search_nearest};
use crate::quadrature::gaussian_latitudes;

fn check_order(n: usize) -> Result<()> {
    if n == 0 {
        return Err(GridError::invalid_spec("gaussian order must be > 0"));
    }
    Ok(())
}

/// Regular Gaussian grid: `2N` rows of `4N` longitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularGaussian {
    n: usize,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
}

impl RegularGaussian {
    pub fn new(n: usize) -> Result<Self> {
        check_order(n)?;
        Ok(Self {
            n,
            latitudes: gaussian_latitudes(2 * n),
            longitudes: row_longitudes(4 * n),
        })
    }

    /// Gaussian order (rows between pole and equator).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Longitudes shared by every row.
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }
}

impl Grid for RegularGaussian {
    fn size(&self) -> usize {
        self.latitudes.len() * self.longitudes.len()
    }

    fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    fn lon_points_at(&self, row: usize) -> usize {
        if row < self.latitudes.len() {
            self.longitudes.len()
        } else {
            0
        }
    }

    fn longitudes_on_row(&self, row: usize) -> Vec<f64> {
        if row < self.latitudes.len() {
            self.longitudes.clone()
        } else {
            Vec::new()
        }
    }

    fn nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        let lon = self.normalize_lon(lon);
        search_nearest(&self.latitudes, true, lat, lon, |_| {
            Cow::Borrowed(self.longitudes.as_slice())
        })
    }

    fn guess_nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        let lon = self.normalize_lon(lon);
        guess_nearest(&self.latitudes, true, lat, lon, |_| {
            Cow::Borrowed(self.longitudes.as_slice())
        })
    }

    fn row_offset(&self, row: usize) -> usize {
        row.min(self.latitudes.len()) * self.longitudes.len()
    }

    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let cols = self.longitudes.len();
        (index < self.size()).then(|| (index / cols, index % cols))
    }

    fn is_rectangular(&self) -> bool {
        true
    }
}

/// Reduced Gaussian grid: the point count shrinks toward the poles,
/// `max(4, 4·round(N·cos(lat)))` per row, drawn from the equatorial `4N`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedGaussian {
    n: usize,
    rows: RaggedRows,
    longitudes: Vec<f64>,
}

/// Points on a reduced row at latitude `lat`.
pub(crate) fn reduced_row_points(n: usize, lat: f64) -> usize {
    let count = 4.0 * (n as f64 * lat.to_radians().cos()).round();
    (count as usize).max(4)
}

impl ReducedGaussian {
    pub fn new(n: usize) -> Result<Self> {
        check_order(n)?;
        let latitudes = gaussian_latitudes(2 * n);
        let lon_points = latitudes
            .iter()
            .map(|&lat| reduced_row_points(n, lat))
            .collect();

        Ok(Self {
            n,
            rows: RaggedRows::new(latitudes, lon_points),
            longitudes: row_longitudes(4 * n),
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Longitudes of the full equatorial row.
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Point count of every row.
    pub fn lon_points(&self) -> &[usize] {
        self.rows.lon_points()
    }

    /// Longitudes of the row closest to `lat`.
    pub fn longitudes_on_lat(&self, lat: f64) -> Vec<f64> {
        self.longitudes_on_row(self.rows.row_nearest(lat))
    }
}

/// Octahedral Gaussian grid: each row's point count is computed on its own
/// as `max(4, 4N·round(cos(lat)))`, so rows are ragged.
#[derive(Debug, Clone, PartialEq)]
pub struct OctahedralGaussian {
    n: usize,
    rows: RaggedRows,
}

/// Points on an octahedral row at latitude `lat`.
pub(crate) fn octahedral_row_points(n: usize, lat: f64) -> usize {
    let colatitude = (90.0 - lat).to_radians();
    let count = 4.0 * n as f64 * colatitude.sin().round();
    (count as usize).max(4)
}

impl OctahedralGaussian {
    pub fn new(n: usize) -> Result<Self> {
        check_order(n)?;
        let latitudes = gaussian_latitudes(2 * n);
        let lon_points = latitudes
            .iter()
            .map(|&lat| octahedral_row_points(n, lat))
            .collect();

        Ok(Self {
            n,
            rows: RaggedRows::new(latitudes, lon_points),
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Longitudes of the widest row.
    pub fn longitudes(&self) -> Vec<f64> {
        let widest = self.rows.lon_points().iter().copied().max().unwrap_or(0);
        row_longitudes(widest)
    }

    pub fn lon_points(&self) -> &[usize] {
        self.rows.lon_points()
    }

    pub fn longitudes_on_lat(&self, lat: f64) -> Vec<f64> {
        self.longitudes_on_row(self.rows.row_nearest(lat))
    }
}

macro_rules! impl_ragged_grid {
    ($grid:ty) => {
        impl Grid for $grid {
            fn size(&self) -> usize {
                self.rows.size()
            }

            fn latitudes(&self) -> &[f64] {
                self.rows.latitudes()
            }

            fn lon_points_at(&self, row: usize) -> usize {
                self.rows.lon_points_at(row)
            }

            fn longitudes_on_row(&self, row: usize) -> Vec<f64> {
                row_longitudes(self.rows.lon_points_at(row))
            }

            fn nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
                let lon = self.normalize_lon(lon);
                search_nearest(self.rows.latitudes(), true, lat, lon, |row| {
                    Cow::Owned(self.longitudes_on_row(row))
                })
            }

            fn guess_nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
                let lon = self.normalize_lon(lon);
                guess_nearest(self.rows.latitudes(), true, lat, lon, |row| {
                    Cow::Owned(self.longitudes_on_row(row))
                })
            }

            fn row_offset(&self, row: usize) -> usize {
                self.rows.row_offset(row)
            }

            fn locate(&self, index: usize) -> Option<(usize, usize)> {
                self.rows.locate(index)
            }

            fn is_rectangular(&self) -> bool {
                false
            }
        }
    };
}

impl_ragged_grid!(ReducedGaussian);
impl_ragged_grid!(OctahedralGaussian);
