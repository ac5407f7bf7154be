//! Grid layouts.
//!
//! Every layout is an ordered sequence of latitude rows. Uniform and
//! regular Gaussian grids share one longitude array across rows; reduced
//! and octahedral grids carry their own point count per row and store a
//! prefix sum so row offsets are O(1).

mod gaussian;
mod latlon;
mod ragged;

pub use gaussian::{OctahedralGaussian, ReducedGaussian, RegularGaussian};
pub use latlon::LatLonGrid;

use serde::{Deserialize, Serialize};

use crate::spec::GridSpec;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Common contract of all grid layouts.
///
/// Rows are indexed from the first entry of [`Grid::latitudes`]; columns
/// from the first longitude of that row. Implementations are immutable
/// after construction and can be shared across threads.
pub trait Grid: Send + Sync {
    /// Total number of points.
    fn size(&self) -> usize;

    /// Row latitudes, strictly monotonic.
    fn latitudes(&self) -> &[f64];

    /// Number of longitude points on `row`, or 0 for an unknown row.
    fn lon_points_at(&self, row: usize) -> usize;

    /// Exact nearest (row, column) by geodesic distance.
    fn nearest_index(&self, lat: f64, lon: f64) -> (usize, usize);

    /// Fast nearest (row, column) by per-axis degree difference.
    fn guess_nearest_index(&self, lat: f64, lon: f64) -> (usize, usize);

    /// Number of latitude rows.
    fn rows(&self) -> usize {
        self.latitudes().len()
    }

    /// Longitudes of `row`, evenly spaced from 0° with step `360 / count`.
    fn longitudes_on_row(&self, row: usize) -> Vec<f64> {
        let count = self.lon_points_at(row);
        (0..count).map(|col| self.longitude_at(row, col)).collect()
    }

    /// Longitude of a single point.
    fn longitude_at(&self, row: usize, col: usize) -> f64 {
        let count = self.lon_points_at(row);
        if count == 0 {
            return f64::NAN;
        }
        col as f64 * 360.0 / count as f64
    }

    /// Whether longitudes wrap around the globe.
    fn is_global(&self) -> bool {
        true
    }

    /// Map a longitude onto the range used by this grid.
    fn normalize_lon(&self, lon: f64) -> f64 {
        lon.rem_euclid(360.0)
    }

    /// Linear offset of the first point of `row` in row-major order.
    fn row_offset(&self, row: usize) -> usize {
        (0..row).map(|r| self.lon_points_at(r)).sum()
    }

    /// Row-major (row, column) of a linear offset.
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut offset = 0;
        for row in 0..self.rows() {
            let count = self.lon_points_at(row);
            if index < offset + count {
                return Some((row, index - offset));
            }
            offset += count;
        }
        None
    }

    /// Whether every row has the same number of points.
    fn is_rectangular(&self) -> bool {
        let first = self.lon_points_at(0);
        (1..self.rows()).all(|row| self.lon_points_at(row) == first)
    }
}

/// Any of the supported layouts.
#[derive(Debug, Clone, PartialEq)]
pub enum GridLayout {
    LatLon(LatLonGrid),
    Regular(RegularGaussian),
    Reduced(ReducedGaussian),
    Octahedral(OctahedralGaussian),
}

macro_rules! dispatch {
    ($self:ident, $grid:ident => $body:expr) => {
        match $self {
            GridLayout::LatLon($grid) => $body,
            GridLayout::Regular($grid) => $body,
            GridLayout::Reduced($grid) => $body,
            GridLayout::Octahedral($grid) => $body,
        }
    };
}

impl GridLayout {
    /// Construction parameters of this grid.
    pub fn spec(&self) -> GridSpec {
        match self {
            Self::LatLon(g) => g.spec(),
            Self::Regular(g) => GridSpec::RegularGaussian { n: g.n() },
            Self::Reduced(g) => GridSpec::ReducedGaussian { n: g.n() },
            Self::Octahedral(g) => GridSpec::OctahedralGaussian { n: g.n() },
        }
    }

    /// Short layout name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LatLon(_) => "latlon",
            Self::Regular(_) => "regular_gaussian",
            Self::Reduced(_) => "reduced_gaussian",
            Self::Octahedral(_) => "octahedral_gaussian",
        }
    }
}

impl Grid for GridLayout {
    fn size(&self) -> usize {
        dispatch!(self, g => g.size())
    }

    fn latitudes(&self) -> &[f64] {
        dispatch!(self, g => g.latitudes())
    }

    fn lon_points_at(&self, row: usize) -> usize {
        dispatch!(self, g => g.lon_points_at(row))
    }

    fn nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        dispatch!(self, g => g.nearest_index(lat, lon))
    }

    fn guess_nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        dispatch!(self, g => g.guess_nearest_index(lat, lon))
    }

    fn longitudes_on_row(&self, row: usize) -> Vec<f64> {
        dispatch!(self, g => g.longitudes_on_row(row))
    }

    fn longitude_at(&self, row: usize, col: usize) -> f64 {
        dispatch!(self, g => g.longitude_at(row, col))
    }

    fn is_global(&self) -> bool {
        dispatch!(self, g => g.is_global())
    }

    fn normalize_lon(&self, lon: f64) -> f64 {
        dispatch!(self, g => g.normalize_lon(lon))
    }

    fn row_offset(&self, row: usize) -> usize {
        dispatch!(self, g => g.row_offset(row))
    }

    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        dispatch!(self, g => g.locate(index))
    }

    fn is_rectangular(&self) -> bool {
        dispatch!(self, g => g.is_rectangular())
    }
}

impl From<LatLonGrid> for GridLayout {
    fn from(grid: LatLonGrid) -> Self {
        Self::LatLon(grid)
    }
}

impl From<RegularGaussian> for GridLayout {
    fn from(grid: RegularGaussian) -> Self {
        Self::Regular(grid)
    }
}

impl From<ReducedGaussian> for GridLayout {
    fn from(grid: ReducedGaussian) -> Self {
        Self::Reduced(grid)
    }
}

impl From<OctahedralGaussian> for GridLayout {
    fn from(grid: OctahedralGaussian) -> Self {
        Self::Octahedral(grid)
    }
}
