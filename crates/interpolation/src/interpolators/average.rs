use super::Interpolator;

/// Arithmetic mean of the corners, ignoring position.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageInterpolator;

impl Interpolator for AverageInterpolator {
    fn interpolate(&self, corners: &[f64; 4], _weights: [f64; 2]) -> f64 {
        corners.iter().sum::<f64>() / corners.len() as f64
    }

    fn name(&self) -> &'static str {
        "average"
    }
}
