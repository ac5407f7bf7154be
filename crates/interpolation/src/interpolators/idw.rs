use serde::{Deserialize, Serialize};

use super::{corner_distances, Interpolator, CORNER_EPSILON};

/// Inverse distance weighting in normalized cell space.
///
/// Each corner weighs `1 / distance^power`; larger powers favour the
/// closest corner more strongly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdwInterpolator {
    pub power: f64,
}

impl IdwInterpolator {
    pub fn new(power: f64) -> Self {
        Self { power }
    }
}

impl Default for IdwInterpolator {
    fn default() -> Self {
        Self { power: 2.0 }
    }
}

impl Interpolator for IdwInterpolator {
    fn interpolate(&self, corners: &[f64; 4], weights: [f64; 2]) -> f64 {
        let mut weight_sum = 0.0;
        let mut value_sum = 0.0;

        for (value, distance) in corners.iter().zip(corner_distances(weights)) {
            if distance < CORNER_EPSILON {
                return *value;
            }
            let weight = 1.0 / distance.powf(self.power);
            weight_sum += weight;
            value_sum += weight * value;
        }

        value_sum / weight_sum
    }

    fn name(&self) -> &'static str {
        "idw"
    }
}
