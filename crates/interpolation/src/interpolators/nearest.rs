use super::Interpolator;

/// Value of the corner closest to the target. Exact halves go to the
/// higher row or column.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestInterpolator;

impl Interpolator for NearestInterpolator {
    fn interpolate(&self, corners: &[f64; 4], weights: [f64; 2]) -> f64 {
        let [row, col] = weights;
        match (row < 0.5, col < 0.5) {
            (true, true) => corners[0],
            (true, false) => corners[1],
            (false, true) => corners[2],
            (false, false) => corners[3],
        }
    }

    fn name(&self) -> &'static str {
        "nearest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::corners::{CENTER, STEPPED};

    #[test]
    fn test_quadrants() {
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, [0.2, 0.2]), 10.0);
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, [0.2, 0.8]), 20.0);
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, [0.8, 0.2]), 30.0);
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, [0.8, 0.8]), 40.0);
    }

    #[test]
    fn test_halves_round_up() {
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, CENTER), 40.0);
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, [0.5, 0.0]), 30.0);
        assert_eq!(NearestInterpolator.interpolate(&STEPPED, [0.0, 0.5]), 20.0);
    }
}
