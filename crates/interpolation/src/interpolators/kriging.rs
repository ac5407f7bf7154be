use serde::{Deserialize, Serialize};

use super::{corner_distances, Interpolator, CORNER_EPSILON};

/// Simplified ordinary kriging with a spherical semivariogram.
///
/// For a normalized distance `h = d / range` the variogram is
/// `nugget + sill * (1.5h - 0.5h³)` within range and `nugget + sill`
/// beyond it. Corners are weighted by `1 / (γ + nugget)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KrigingInterpolator {
    /// Variance reached at and beyond `range`.
    pub sill: f64,
    /// Distance, in cell units, past which corners are uncorrelated.
    pub range: f64,
    /// Variance at zero distance.
    pub nugget: f64,
}

impl KrigingInterpolator {
    pub fn new(sill: f64, range: f64, nugget: f64) -> Self {
        Self { sill, range, nugget }
    }

    /// Semivariance at distance `distance`.
    pub fn variogram(&self, distance: f64) -> f64 {
        if distance <= self.range {
            let h = distance / self.range;
            self.nugget + self.sill * (1.5 * h - 0.5 * h * h * h)
        } else {
            self.nugget + self.sill
        }
    }
}

impl Default for KrigingInterpolator {
    fn default() -> Self {
        Self {
            sill: 1.0,
            range: 1.0,
            nugget: 0.1,
        }
    }
}

impl Interpolator for KrigingInterpolator {
    fn interpolate(&self, corners: &[f64; 4], weights: [f64; 2]) -> f64 {
        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;

        for (value, distance) in corners.iter().zip(corner_distances(weights)) {
            if distance < CORNER_EPSILON {
                return *value;
            }
            let weight = 1.0 / (self.variogram(distance) + self.nugget);
            weight_sum += weight;
            value_sum += weight * value;
        }

        value_sum / weight_sum
    }

    fn name(&self) -> &'static str {
        "kriging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_close;
    use test_utils::corners::{CENTER, STEPPED};

    #[test]
    fn test_variogram_shape() {
        let k = KrigingInterpolator::default();
        assert_close!(k.variogram(0.0), 0.1, 1e-12);
        assert_close!(k.variogram(1.0), 1.1, 1e-12);
        assert_close!(k.variogram(5.0), 1.1, 1e-12);
        assert!(k.variogram(0.3) < k.variogram(0.6));
    }

    #[test]
    fn test_center_is_mean() {
        assert_close!(KrigingInterpolator::default().interpolate(&STEPPED, CENTER), 25.0, 1e-9);
    }

    #[test]
    fn test_exact_corners() {
        let k = KrigingInterpolator::default();
        assert_eq!(k.interpolate(&STEPPED, [0.0, 0.0]), 10.0);
        assert_eq!(k.interpolate(&STEPPED, [0.0, 1.0]), 20.0);
        assert_eq!(k.interpolate(&STEPPED, [1.0, 0.0]), 30.0);
        assert_eq!(k.interpolate(&STEPPED, [1.0, 1.0]), 40.0);
    }

    #[test]
    fn test_near_corner_leans_toward_it() {
        let v = KrigingInterpolator::default().interpolate(&STEPPED, [0.2, 0.2]);
        assert!(v > 10.0 && v < 25.0, "{v}");
        assert_close!(v, 22.145_528_528, 1e-6);
    }

    #[test]
    fn test_parameters_change_result() {
        let base = KrigingInterpolator::new(1.0, 1.0, 0.1).interpolate(&STEPPED, [0.2, 0.2]);
        let short_range = KrigingInterpolator::new(1.0, 0.5, 0.1).interpolate(&STEPPED, [0.2, 0.2]);
        let big_nugget = KrigingInterpolator::new(1.0, 1.0, 0.5).interpolate(&STEPPED, [0.2, 0.2]);
        assert!((base - short_range).abs() > 1e-3);
        assert!((base - big_nugget).abs() > 1e-3);
    }
}
