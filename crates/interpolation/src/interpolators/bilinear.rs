use super::Interpolator;

/// Weighted blend along columns, then rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearInterpolator;

impl Interpolator for BilinearInterpolator {
    fn interpolate(&self, corners: &[f64; 4], weights: [f64; 2]) -> f64 {
        let [row, col] = weights;
        let top = corners[0] * (1.0 - col) + corners[1] * col;
        let bottom = corners[2] * (1.0 - col) + corners[3] * col;
        top * (1.0 - row) + bottom * row
    }

    fn name(&self) -> &'static str {
        "bilinear"
    }
}
