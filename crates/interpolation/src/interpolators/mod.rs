//! Strategies combining four corner values into one.
//!
//! Every strategy receives the corner values in the order
//! `[(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)]` and the
//! target's fractional position `[row weight, column weight]`, both in
//! `[0, 1]` inside the cell.

mod average;
mod bilinear;
mod idw;
mod kriging;
mod nearest;

pub use average::AverageInterpolator;
pub use bilinear::BilinearInterpolator;
pub use idw::IdwInterpolator;
pub use kriging::KrigingInterpolator;
pub use nearest::NearestInterpolator;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InterpolationError;

/// Combine four corner values at a fractional cell position.
pub trait Interpolator: Send + Sync + fmt::Debug {
    fn interpolate(&self, corners: &[f64; 4], weights: [f64; 2]) -> f64;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Normalized distances from the target to each corner, in corner order.
pub(crate) fn corner_distances(weights: [f64; 2]) -> [f64; 4] {
    let [row, col] = weights;
    [
        row.hypot(col),
        row.hypot(1.0 - col),
        (1.0 - row).hypot(col),
        (1.0 - row).hypot(1.0 - col),
    ]
}

/// Distances below this snap to the corner value.
pub(crate) const CORNER_EPSILON: f64 = 1e-10;

/// Interpolation method selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    #[default]
    Bilinear,
    Nearest,
    Average,
    Idw,
    Kriging,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bilinear => "bilinear",
            Self::Nearest => "nearest",
            Self::Average => "average",
            Self::Idw => "idw",
            Self::Kriging => "kriging",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = InterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bilinear" | "linear" => Ok(Self::Bilinear),
            "nearest" | "nearest_neighbor" => Ok(Self::Nearest),
            "average" | "mean" => Ok(Self::Average),
            "idw" => Ok(Self::Idw),
            "kriging" => Ok(Self::Kriging),
            other => Err(InterpolationError::config(format!(
                "unknown interpolation method {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{assert_close, corners};

    fn all() -> Vec<Box<dyn Interpolator>> {
        vec![
            Box::new(BilinearInterpolator),
            Box::new(NearestInterpolator),
            Box::new(AverageInterpolator),
            Box::new(IdwInterpolator::default()),
            Box::new(KrigingInterpolator::default()),
        ]
    }

    #[test]
    fn test_method_parse_and_display() {
        for method in [
            InterpolationMethod::Bilinear,
            InterpolationMethod::Nearest,
            InterpolationMethod::Average,
            InterpolationMethod::Idw,
            InterpolationMethod::Kriging,
        ] {
            assert_eq!(method.to_string().parse::<InterpolationMethod>().unwrap(), method);
        }
        assert_eq!("Linear".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Bilinear);
        assert!("cubic".parse::<InterpolationMethod>().is_err());
        assert_eq!(InterpolationMethod::default(), InterpolationMethod::Bilinear);
    }

    #[test]
    fn test_corner_distances() {
        let d = corner_distances([0.0, 0.0]);
        assert_eq!(d[0], 0.0);
        assert_eq!(d[1], 1.0);
        assert_eq!(d[2], 1.0);
        assert_close!(d[3], std::f64::consts::SQRT_2, 1e-15);
    }

    #[test]
    fn test_flat_field_is_preserved() {
        for interpolator in all() {
            for weights in [[0.0, 0.0], corners::CENTER, [0.3, 0.9], [1.0, 1.0]] {
                assert_close!(interpolator.interpolate(&corners::FLAT, weights), 7.5, 1e-12);
            }
        }
    }

    #[test]
    fn test_results_stay_within_corner_range() {
        for interpolator in all() {
            for weights in [[0.1, 0.2], [0.5, 0.5], [0.9, 0.3], [0.0, 0.7]] {
                let v = interpolator.interpolate(&corners::STEPPED, weights);
                assert!((10.0..=40.0).contains(&v), "{}: {v}", interpolator.name());
            }
        }
    }
}
