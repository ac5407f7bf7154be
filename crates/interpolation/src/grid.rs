//! Interpolation of a stored field at arbitrary coordinates.

use std::sync::Arc;

use grids::{find_nearest_indices, grid_index_from_indices, Grid, ScanMode};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{InterpolationError, Result};
use crate::interpolators::{BilinearInterpolator, Interpolator};
use crate::reader::ValueReader;

/// Reads the four values around a target through a [`ValueReader`] and
/// combines them with an [`Interpolator`].
pub struct GridInterpolator<R> {
    reader: R,
    grid: Arc<dyn Grid>,
    scan_mode: ScanMode,
    interpolator: Box<dyn Interpolator>,
}

/// Corner indices of an enclosing cell with their weights.
struct Cell {
    indices: [usize; 4],
    row_weight: f64,
    /// Column fraction on the upper and on the lower row.
    col_weights: [f64; 2],
    /// The two rows have different point counts.
    ragged: bool,
}

/// Lower index `i` such that `values[i]` and `values[i + 1]` enclose
/// `value`, trying the neighbour of `nearest` first.
fn lower_bracket(values: &[f64], nearest: usize, value: f64) -> Option<usize> {
    let encloses = |i: usize| {
        let (a, b) = (values[i], values[i + 1]);
        value >= a.min(b) && value <= a.max(b)
    };

    if nearest + 1 < values.len() && encloses(nearest) {
        return Some(nearest);
    }
    if nearest >= 1 && nearest < values.len() && encloses(nearest - 1) {
        return Some(nearest - 1);
    }

    let [a, b] = find_nearest_indices(value, values);
    let lower = a.min(b);
    (lower + 1 < values.len() && encloses(lower)).then_some(lower)
}

/// `lon` moved by a whole turn when that brings it into `[first, last]`.
fn shift_into(lon: f64, first: f64, last: f64) -> f64 {
    [lon, lon - 360.0, lon + 360.0]
        .into_iter()
        .find(|v| (first..=last).contains(v))
        .unwrap_or(lon)
}

/// Position of `value` between `lo` and `hi`, in `[0, 1]`.
fn fraction(value: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        0.0
    } else {
        (value - lo) / (hi - lo)
    }
}

impl<R: ValueReader> GridInterpolator<R> {
    /// Bilinear interpolation over `grid` stored with `scan_mode`.
    pub fn new(reader: R, grid: Arc<dyn Grid>, scan_mode: ScanMode) -> Self {
        Self {
            reader,
            grid,
            scan_mode,
            interpolator: Box::new(BilinearInterpolator),
        }
    }

    /// Replace the interpolation strategy.
    pub fn with_interpolator(mut self, interpolator: Box<dyn Interpolator>) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn grid(&self) -> &dyn Grid {
        self.grid.as_ref()
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    pub fn interpolator(&self) -> &dyn Interpolator {
        self.interpolator.as_ref()
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// The enclosing cell: corner indices, the row fraction, and the column
    /// fraction measured on each of the two rows.
    fn cell(&self, lat: f64, lon: f64) -> Result<Cell> {
        let grid = self.grid.as_ref();
        let outside = || InterpolationError::outside_grid(lat, lon);

        let lats = grid.latitudes();
        if lats.len() < 2 {
            return Err(outside());
        }

        let (nearest_row, nearest_col) = grid.nearest_index(lat, lon);
        let row = lower_bracket(lats, nearest_row, lat).ok_or_else(outside)?;

        let global = grid.is_global();
        let mut lons = grid.longitudes_on_row(row);
        let count = lons.len();
        if count == 0 {
            return Err(outside());
        }

        let target_lon = if global {
            // Close the row so the seam cell between the last column and
            // the first one (+360°) can enclose the target.
            lons.push(lons[0] + 360.0);
            let normalized = grid.normalize_lon(lon);
            if normalized < lons[0] {
                normalized + 360.0
            } else {
                normalized
            }
        } else {
            shift_into(lon, lons[0], lons[count - 1])
        };

        let anchor = if nearest_row == row {
            nearest_col
        } else {
            find_nearest_indices(target_lon, &lons)[0]
        };
        let col = lower_bracket(&lons, anchor, target_lon).ok_or_else(outside)?;
        let col_weight = fraction(target_lon, lons[col], lons[col + 1]);

        // Ragged rows: the row below has its own columns and its own
        // position of the target between them.
        let below = grid.lon_points_at(row + 1);
        let (below_col, below_weight) = if below == count {
            (col, col_weight)
        } else {
            let mut below_lons = grid.longitudes_on_row(row + 1);
            if below_lons.is_empty() {
                return Err(outside());
            }
            if global {
                below_lons.push(below_lons[0] + 360.0);
            }
            let anchor = find_nearest_indices(target_lon, &below_lons)[0];
            let c = lower_bracket(&below_lons, anchor, target_lon).ok_or_else(outside)?;
            (c, fraction(target_lon, below_lons[c], below_lons[c + 1]))
        };

        let coords = [
            (row, col % count),
            (row, (col + 1) % count),
            (row + 1, below_col % below),
            (row + 1, (below_col + 1) % below),
        ];
        let mut indices = [0usize; 4];
        for (slot, (r, c)) in indices.iter_mut().zip(coords) {
            *slot = grid_index_from_indices(grid, r, c, self.scan_mode).ok_or_else(outside)?;
        }

        Ok(Cell {
            indices,
            row_weight: fraction(lat, lats[row], lats[row + 1]),
            col_weights: [col_weight, below_weight],
            ragged: below != count,
        })
    }

    /// Interpolated value at (`lat`, `lon`) for `time_step`.
    ///
    /// Fails with [`InterpolationError::OutsideGrid`] when no cell encloses
    /// the target, and with the reader's error as soon as a corner cannot
    /// be read.
    ///
    /// When the two rows of the cell hold different numbers of points, each
    /// row is first reduced along longitude with its own column fraction,
    /// then the two row values are combined by latitude.
    pub fn interpolate_at(&self, time_step: usize, lat: f64, lon: f64) -> Result<f64> {
        let cell = self.cell(lat, lon)?;

        let mut corners = [0.0; 4];
        for (value, index) in corners.iter_mut().zip(cell.indices) {
            *value = self
                .reader
                .read_value_at(time_step, index)
                .map_err(|e| {
                    debug!(
                        time_step,
                        index,
                        error = %e,
                        interpolator = self.interpolator.name(),
                        "interpolation aborted by reader"
                    );
                    InterpolationError::Reader(e)
                })?;
        }

        let interpolator = self.interpolator.as_ref();
        if !cell.ragged {
            return Ok(interpolator.interpolate(&corners, [cell.row_weight, cell.col_weights[0]]));
        }

        let [a, b, c, d] = corners;
        let upper = interpolator.interpolate(&[a, b, a, b], [0.0, cell.col_weights[0]]);
        let lower = interpolator.interpolate(&[c, d, c, d], [0.0, cell.col_weights[1]]);
        Ok(interpolator.interpolate(&[upper, upper, lower, lower], [cell.row_weight, 0.0]))
    }
}

impl<R: ValueReader + Sync> GridInterpolator<R> {
    /// Interpolate many points in parallel. Each result is independent, so
    /// one failing point does not affect the others.
    pub fn interpolate_many(&self, time_step: usize, points: &[(f64, f64)]) -> Vec<Result<f64>> {
        points
            .par_iter()
            .map(|&(lat, lon)| self.interpolate_at(time_step, lat, lon))
            .collect()
    }
}
