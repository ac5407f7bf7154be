//! Uniform latitude/longitude grid.

use std::borrow::Cow;

use super::Grid;
use crate::error::{GridError, Result};
use crate::nearest::{guess_nearest, search_nearest};
use crate::spec::GridSpec;

/// Regularly spaced grid. Rows run north to south from `max_lat`,
/// columns west to east from `min_lon`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonGrid {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    lat_step: f64,
    lon_step: f64,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    sphere: bool,
}

/// Whole microdegrees, used for exact comparisons of configured bounds.
fn microdegrees(value: f64) -> i64 {
    (value * 1e6).round() as i64
}

fn axis_count(span: f64, step: f64) -> usize {
    (span / step + 1e-9).floor() as usize + 1
}

/// Checked lat/lon parameters: ordered latitude bounds and axis counts.
struct Dimensions {
    min_lat: f64,
    max_lat: f64,
    rows: usize,
    cols: usize,
}

fn dimensions(
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    lat_step: f64,
    lon_step: f64,
) -> Result<Dimensions> {
    let params = [min_lat, max_lat, min_lon, max_lon, lat_step, lon_step];
    if params.iter().any(|v| !v.is_finite()) {
        return Err(GridError::invalid_spec(format!(
            "latlon parameters must be finite: {params:?}"
        )));
    }
    if lat_step <= 0.0 || lon_step <= 0.0 {
        return Err(GridError::invalid_spec(format!(
            "latlon steps must be > 0, got {lat_step} x {lon_step}"
        )));
    }

    let (min_lat, max_lat) = (min_lat.min(max_lat), min_lat.max(max_lat));
    if min_lat < -90.0 || max_lat > 90.0 {
        return Err(GridError::invalid_spec(format!(
            "latitudes must lie within [-90, 90], got [{min_lat}, {max_lat}]"
        )));
    }
    if microdegrees(max_lat) == microdegrees(min_lat) {
        return Err(GridError::invalid_spec(format!(
            "latitude span must be at least one microdegree, got [{min_lat}, {max_lat}]"
        )));
    }
    if max_lon < min_lon {
        return Err(GridError::invalid_spec(format!(
            "max_lon {max_lon} is west of min_lon {min_lon}"
        )));
    }

    let rows = axis_count(max_lat - min_lat, lat_step);
    let cols = axis_count(max_lon - min_lon, lon_step);
    if rows < 2 {
        return Err(GridError::invalid_spec(format!("latlon grid needs >= 2 rows, got {rows}")));
    }
    if cols < 4 {
        return Err(GridError::invalid_spec(format!(
            "latlon grid needs >= 4 columns, got {cols}"
        )));
    }

    Ok(Dimensions {
        min_lat,
        max_lat,
        rows,
        cols,
    })
}

impl LatLonGrid {
    /// Build a grid; latitude bounds may be given in either order.
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
        lat_step: f64,
        lon_step: f64,
    ) -> Result<Self> {
        let Dimensions {
            min_lat,
            max_lat,
            rows,
            cols,
        } = dimensions(min_lat, max_lat, min_lon, max_lon, lat_step, lon_step)?;

        let latitudes = (0..rows).map(|i| max_lat - i as f64 * lat_step).collect();
        let longitudes = (0..cols).map(|i| min_lon + i as f64 * lon_step).collect();
        let sphere = microdegrees(max_lon + lon_step) == microdegrees(min_lon + 360.0);

        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
            lat_step,
            lon_step,
            latitudes,
            longitudes,
            sphere,
        })
    }

    /// Check construction parameters without allocating the grid.
    pub fn validate(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
        lat_step: f64,
        lon_step: f64,
    ) -> Result<()> {
        dimensions(min_lat, max_lat, min_lon, max_lon, lat_step, lon_step).map(|_| ())
    }

    /// Whether the columns close around the globe.
    pub fn is_sphere(&self) -> bool {
        self.sphere
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn spec(&self) -> GridSpec {
        GridSpec::LatLon {
            min_lat: self.min_lat,
            max_lat: self.max_lat,
            min_lon: self.min_lon,
            max_lon: self.max_lon,
            lat_step: self.lat_step,
            lon_step: self.lon_step,
        }
    }

    /// Fold a latitude back into `[min_lat, max_lat]` by whole spans,
    /// in microdegrees so values on a bound stay on it.
    pub fn normalize_lat(&self, lat: f64) -> f64 {
        let lo = microdegrees(self.min_lat);
        let hi = microdegrees(self.max_lat);
        let value = microdegrees(lat);
        let span = hi - lo;

        let folded = if value < lo {
            lo + (value - lo).rem_euclid(span)
        } else if value > hi {
            hi - (hi - value).rem_euclid(span)
        } else {
            return lat;
        };
        folded as f64 / 1e6
    }
}

impl Grid for LatLonGrid {
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

    fn longitude_at(&self, row: usize, col: usize) -> f64 {
        match self.longitudes.get(col) {
            Some(&lon) if row < self.latitudes.len() => lon,
            _ => f64::NAN,
        }
    }

    fn nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        let lat = self.normalize_lat(lat);
        let lon = self.normalize_lon(lon);
        search_nearest(&self.latitudes, self.sphere, lat, lon, |_| {
            Cow::Borrowed(self.longitudes.as_slice())
        })
    }

    fn guess_nearest_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        let lat = self.normalize_lat(lat);
        let lon = self.normalize_lon(lon);
        guess_nearest(&self.latitudes, self.sphere, lat, lon, |_| {
            Cow::Borrowed(self.longitudes.as_slice())
        })
    }

    fn is_global(&self) -> bool {
        self.sphere
    }

    /// Shift into `[min_lon, min_lon + 360)`, then resolve values past
    /// `max_lon`: sphere grids return the representation nearer the seam,
    /// regional grids clamp to the nearer edge.
    fn normalize_lon(&self, lon: f64) -> f64 {
        let wrapped = self.min_lon + (lon - self.min_lon).rem_euclid(360.0);
        if wrapped <= self.max_lon {
            return wrapped;
        }

        let past_max = wrapped - self.max_lon;
        let before_min = self.min_lon + 360.0 - wrapped;
        match (self.sphere, before_min < past_max) {
            (true, true) => wrapped - 360.0,
            (true, false) => wrapped,
            (false, true) => self.min_lon,
            (false, false) => self.max_lon,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn gfs() -> LatLonGrid {
        LatLonGrid::new(-90.0, 90.0, 0.0, 359.75, 0.25, 0.25).unwrap()
    }

    #[test]
    fn test_dimensions() {
        let grid = gfs();
        assert_eq!(grid.rows(), 721);
        assert_eq!(grid.longitudes().len(), 1440);
        assert_eq!(grid.size(), 721 * 1440);
        assert_eq!(grid.latitudes()[0], 90.0);
        assert_eq!(grid.latitudes()[720], -90.0);
        assert!(grid.is_sphere());
        assert!(grid.is_global());
    }

    #[test]
    fn test_swapped_latitude_bounds() {
        let a = LatLonGrid::new(90.0, -90.0, 0.0, 359.0, 1.0, 1.0).unwrap();
        let b = LatLonGrid::new(-90.0, 90.0, 0.0, 359.0, 1.0, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(LatLonGrid::new(-90.0, 90.0, 0.0, 359.0, 0.0, 1.0).is_err());
        assert!(LatLonGrid::new(-90.0, 90.0, 0.0, 359.0, 1.0, -1.0).is_err());
        assert!(LatLonGrid::new(-90.0, 90.0, 0.0, 2.0, 1.0, 1.0).is_err());
        assert!(LatLonGrid::new(10.0, 10.0, 0.0, 359.0, 1.0, 1.0).is_err());
        assert!(LatLonGrid::new(-90.0, 95.0, 0.0, 359.0, 1.0, 1.0).is_err());
        assert!(LatLonGrid::new(-90.0, 90.0, 10.0, 0.0, 1.0, 1.0).is_err());
        assert!(LatLonGrid::new(f64::NAN, 90.0, 0.0, 359.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_sub_microdegree_span() {
        assert!(matches!(
            LatLonGrid::new(0.0, 1e-7, 0.0, 359.0, 1e-7, 1.0),
            Err(GridError::InvalidSpec(_))
        ));
        assert!(LatLonGrid::validate(0.0, 1e-7, 0.0, 359.0, 1e-7, 1.0).is_err());
        // One microdegree is the smallest span that folds
        let grid = LatLonGrid::new(0.0, 1e-6, 0.0, 359.0, 1e-6, 1.0).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.nearest_index(5.0, 10.0).1, 10);
    }

    #[test]
    fn test_validate_matches_new() {
        assert!(LatLonGrid::validate(-90.0, 90.0, 0.0, 359.75, 0.25, 0.25).is_ok());
        assert!(LatLonGrid::validate(90.0, -90.0, 0.0, 359.0, 1.0, 1.0).is_ok());
        assert!(LatLonGrid::validate(-90.0, 90.0, 0.0, 359.0, 0.0, 1.0).is_err());
        assert!(LatLonGrid::validate(-90.0, 90.0, 0.0, 2.0, 1.0, 1.0).is_err());
        assert!(LatLonGrid::validate(-90.0, 95.0, 0.0, 359.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_regional_grid_is_not_sphere() {
        let grid = LatLonGrid::new(20.0, 50.0, 70.0, 140.0, 0.5, 0.5).unwrap();
        assert!(!grid.is_sphere());
        assert_eq!(grid.rows(), 61);
        assert_eq!(grid.longitudes().len(), 141);
    }

    #[test]
    fn test_sphere_from_negative_start() {
        let grid = LatLonGrid::new(-90.0, 90.0, -180.0, 179.5, 0.5, 0.5).unwrap();
        assert!(grid.is_sphere());
        assert_eq!(grid.normalize_lon(180.0), -180.0);
        assert!((grid.normalize_lon(179.6) - 179.6).abs() < 1e-9);
        assert!((grid.normalize_lon(179.9) - (-180.1)).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_lon() {
        let grid = gfs();
        assert_eq!(grid.normalize_lon(-90.0), 270.0);
        assert_eq!(grid.normalize_lon(360.0), 0.0);
        // Past the last column but closer to 360
        assert!((grid.normalize_lon(359.9) - (-0.1)).abs() < 1e-9);
        assert!((grid.normalize_lon(-0.13) - 359.87).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_lat() {
        let grid = gfs();
        assert_eq!(grid.normalize_lat(45.0), 45.0);
        assert_eq!(grid.normalize_lat(-90.0), -90.0);
        assert_eq!(grid.normalize_lat(100.0), -80.0);
        assert_eq!(grid.normalize_lat(-100.0), 80.0);
    }

    #[test]
    fn test_nearest_origin() {
        let grid = gfs();
        assert_eq!(grid.nearest_index(0.0, 0.0), (360, 0));
        assert_eq!(grid.guess_nearest_index(0.0, 0.0), (360, 0));
    }

    #[test]
    fn test_nearest_across_seam() {
        let grid = gfs();
        assert_eq!(grid.nearest_index(10.0, 359.9), (320, 0));
        assert_eq!(grid.nearest_index(10.0, -0.1), (320, 0));
        assert_eq!(grid.nearest_index(10.0, 359.8), (320, 1439));
        assert_eq!(grid.guess_nearest_index(10.0, -0.2), (320, 1439));
    }

    #[test]
    fn test_regional_nearest_clamps_to_edge() {
        let grid = LatLonGrid::new(20.0, 50.0, 70.0, 140.0, 0.5, 0.5).unwrap();
        assert_eq!(grid.normalize_lon(60.0), 70.0);
        assert_eq!(grid.normalize_lon(150.0), 140.0);
        assert_eq!(grid.normalize_lon(-250.0), 110.0);
        // Latitudes fold by the 30° span
        assert_eq!(grid.nearest_index(10.0, 60.0), (20, 0));
        assert_eq!(grid.nearest_index(55.0, 150.0), (50, 140));
    }

    #[test]
    fn test_longitude_at() {
        let grid = gfs();
        assert_eq!(grid.longitude_at(0, 4), 1.0);
        assert!(grid.longitude_at(0, 1440).is_nan());
        assert!(grid.longitude_at(721, 0).is_nan());
    }
}
