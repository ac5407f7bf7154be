//! Nearest-point search.
//!
//! Both lookups start from a binary bracket on the latitude rows and the
//! longitudes of each bracketing row. The exact lookup compares the
//! candidate cells by a truncated Vincenty distance; the guess compares
//! degrees per axis.

use std::borrow::Cow;

use geodesy::{haversine, vincenty_iterations};

use crate::codec::{grid_index, grid_index_from_indices};
use crate::layout::Grid;
use crate::scan_mode::ScanMode;

/// Vincenty iterations used when ranking candidate cells. Enough to order
/// neighbours correctly without paying for full convergence.
pub const NEAREST_ITERATIONS: usize = 3;

/// Indices of the two entries of a monotonic slice that bracket `value`.
///
/// Works for ascending and descending slices. Returns the same index twice
/// on an exact hit or when `value` lies beyond either end.
pub fn find_nearest_indices(value: f64, sorted: &[f64]) -> [usize; 2] {
    let len = sorted.len();
    if len == 0 {
        return [0, 0];
    }

    let descending = sorted[0] > sorted[len - 1];
    let pos = if descending {
        sorted.partition_point(|&v| v > value)
    } else {
        sorted.partition_point(|&v| v < value)
    };

    if pos == len {
        [len - 1, len - 1]
    } else if pos == 0 || sorted[pos] == value {
        [pos, pos]
    } else {
        [pos - 1, pos]
    }
}

fn bracket(indices: [usize; 2]) -> impl Iterator<Item = usize> {
    let [a, b] = indices;
    std::iter::once(a).chain((b != a).then_some(b))
}

/// Bracketing columns on one row, plus the seam column for global rows.
fn column_candidates(lons: &[f64], lon: f64, global: bool) -> Vec<usize> {
    let [a, b] = find_nearest_indices(lon, lons);
    let mut cols: Vec<usize> = bracket([a, b]).collect();

    if global && a == b && lons.len() > 1 {
        let last = lons.len() - 1;
        if a == last && lon > lons[last] {
            cols.push(0);
        } else if a == 0 && lon < lons[0] {
            cols.push(last);
        }
    }
    cols
}

fn lon_difference(a: f64, b: f64, global: bool) -> f64 {
    let d = (a - b).abs();
    if global {
        d.min((360.0 - d).abs())
    } else {
        d
    }
}

fn cell_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let estimate = vincenty_iterations(lat1, lon1, lat2, lon2, NEAREST_ITERATIONS);
    if estimate.distance_km.is_finite() {
        estimate.distance_km
    } else {
        haversine(lat1, lon1, lat2, lon2)
    }
}

/// Geodesic nearest cell among the bracketing candidates.
///
/// `lat` and `lon` must already be normalized for the grid. Ties keep the
/// first candidate visited.
pub(crate) fn search_nearest<'a>(
    latitudes: &[f64],
    global: bool,
    lat: f64,
    lon: f64,
    row_lons: impl Fn(usize) -> Cow<'a, [f64]>,
) -> (usize, usize) {
    let mut best = (0, 0);
    let mut best_distance = f64::INFINITY;

    for row in bracket(find_nearest_indices(lat, latitudes)) {
        let lons = row_lons(row);
        for col in column_candidates(&lons, lon, global) {
            let d = cell_distance(lat, lon, latitudes[row], lons[col]);
            if d < best_distance {
                best_distance = d;
                best = (row, col);
            }
        }
    }
    best
}

/// Degree-nearest cell: nearest row first, then nearest column on it.
pub(crate) fn guess_nearest<'a>(
    latitudes: &[f64],
    global: bool,
    lat: f64,
    lon: f64,
    row_lons: impl Fn(usize) -> Cow<'a, [f64]>,
) -> (usize, usize) {
    let [a, b] = find_nearest_indices(lat, latitudes);
    let row = if (latitudes[a] - lat).abs() > (latitudes[b] - lat).abs() {
        b
    } else {
        a
    };

    let lons = row_lons(row);
    let col = column_candidates(&lons, lon, global)
        .into_iter()
        .min_by(|&x, &y| {
            lon_difference(lons[x], lon, global).total_cmp(&lon_difference(lons[y], lon, global))
        })
        .unwrap_or(0);

    (row, col)
}

/// Neighbourhood lookups on a shared grid.
pub struct NearestGrids<'g, G: Grid + ?Sized> {
    grid: &'g G,
}

impl<'g, G: Grid + ?Sized> NearestGrids<'g, G> {
    pub fn new(grid: &'g G) -> Self {
        Self { grid }
    }

    /// Linear indices of the points around (`lat`, `lon`): on each
    /// bracketing row, the degree-nearest column and its two neighbours.
    /// Invalid combinations are skipped and duplicates removed.
    pub fn nearest_grids(&self, lat: f64, lon: f64, mode: ScanMode) -> Vec<usize> {
        let grid = self.grid;
        let latitudes = grid.latitudes();
        if latitudes.is_empty() {
            return Vec::new();
        }

        let global = grid.is_global();
        let lon = grid.normalize_lon(lon);
        let mut indices = Vec::with_capacity(6);

        for row in bracket(find_nearest_indices(lat, latitudes)) {
            let count = grid.lon_points_at(row);
            if count == 0 {
                continue;
            }
            let lons = grid.longitudes_on_row(row);
            let (_, center) = guess_nearest(
                &latitudes[row..=row],
                global,
                latitudes[row],
                lon,
                |_| Cow::Borrowed(lons.as_slice()),
            );

            let columns = [
                if global {
                    Some((center + count - 1) % count)
                } else {
                    center.checked_sub(1)
                },
                Some(center),
                if global {
                    Some((center + 1) % count)
                } else {
                    Some(center + 1).filter(|&c| c < count)
                },
            ];

            for col in columns.into_iter().flatten() {
                if let Some(index) = grid_index_from_indices(grid, row, col, mode) {
                    if !indices.contains(&index) {
                        indices.push(index);
                    }
                }
            }
        }
        indices
    }

    /// Linear index of the exact nearest point.
    pub fn nearest_grid(&self, lat: f64, lon: f64, mode: ScanMode) -> Option<usize> {
        grid_index(self.grid, lat, lon, mode)
    }
}
