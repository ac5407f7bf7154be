//! Synthetic fields and query points.
//!
//! Fields are laid out by linear grid index so tests can predict every
//! value a reader returns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Field evaluated from the coordinates of each index.
///
/// `point_at` returns the (lat, lon) stored at an index, typically
/// `grid_point` of the grid under test.
pub fn coordinate_field(
    size: usize,
    point_at: impl Fn(usize) -> (f64, f64),
    value: impl Fn(f64, f64) -> f64,
) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let (lat, lon) = point_at(i);
            value(lat, lon)
        })
        .collect()
}

/// Temperature-like value in Kelvin: warm at the equator, cold at the poles.
pub fn temperature_at(lat: f64, lon: f64) -> f64 {
    250.0 + 50.0 * lat.to_radians().cos() + 2.0 * lon.to_radians().sin()
}

/// A plane in (lat, lon): bilinear interpolation reproduces it exactly
/// inside any cell that does not cross the seam.
pub fn linear_at(lat: f64, lon: f64) -> f64 {
    3.0 * lat - 0.5 * lon + 100.0
}

/// Several time steps of one field, each shifted by `step_offset`.
pub fn time_steps(field: &[f64], steps: usize, step_offset: f64) -> Vec<Vec<f64>> {
    (0..steps)
        .map(|t| field.iter().map(|v| v + t as f64 * step_offset).collect())
        .collect()
}

/// Reproducible random (lat, lon) pairs covering the globe.
pub fn random_points(seed: u64, count: usize) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.gen_range(-89.0..89.0), rng.gen_range(-180.0..360.0)))
        .collect()
}
