//! Vincenty's inverse solution on the WGS-84 ellipsoid.
//!
//! The iteration refines the longitude difference on the auxiliary
//! sphere (λ) until two successive estimates agree to 1e-12 radians.
//! Nearly antipodal points may never settle; in that case the caller
//! gets an explicit non-converged result and decides the fallback.

use std::f64::consts::{PI, TAU};

/// WGS-84 semi-major axis in metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS-84 semi-minor axis in metres.
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Iteration budget used by [`vincenty`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Distance returned by [`vincenty`] when the iteration does not converge.
pub const NON_CONVERGENCE: f64 = -1.0;

const LAMBDA_EPSILON: f64 = 1e-12;
const ANTIPODAL_EPSILON: f64 = 1e-12;

/// Outcome of a bounded Vincenty iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    /// Distance in kilometres computed from the last λ estimate.
    pub distance_km: f64,
    /// Whether successive λ estimates agreed within tolerance.
    pub converged: bool,
    /// Iterations actually performed.
    pub iterations: usize,
}

/// Geodesic distance in kilometres, or [`NON_CONVERGENCE`] if the
/// iteration does not settle within [`DEFAULT_MAX_ITERATIONS`].
pub fn vincenty(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let result = vincenty_iterations(lat1, lon1, lat2, lon2, DEFAULT_MAX_ITERATIONS);
    if result.converged {
        result.distance_km
    } else {
        tracing::trace!(
            lat1,
            lon1,
            lat2,
            lon2,
            iterations = result.iterations,
            "vincenty did not converge"
        );
        NON_CONVERGENCE
    }
}

/// Auxiliary-sphere quantities from one λ step.
#[derive(Debug, Clone, Copy, Default)]
struct Step {
    sin_sigma: f64,
    cos_sigma: f64,
    sigma: f64,
    cos_sq_alpha: f64,
    cos_2sigma_m: f64,
}

impl Step {
    /// Ellipsoidal distance in kilometres for this step.
    fn distance_km(&self) -> f64 {
        let u_sq = self.cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
        let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let c2m = self.cos_2sigma_m;
        let delta_sigma = b
            * self.sin_sigma
            * (c2m
                + b / 4.0
                    * (self.cos_sigma * (-1.0 + 2.0 * c2m * c2m)
                        - b / 6.0
                            * c2m
                            * (-3.0 + 4.0 * self.sin_sigma * self.sin_sigma)
                            * (-3.0 + 4.0 * c2m * c2m)));

        WGS84_B * a * (self.sigma - delta_sigma) / 1000.0
    }
}

/// Run at most `max_iterations` λ refinements and report the estimate.
///
/// With a truncated budget (3-5 iterations) the distance is not exact but
/// preserves ordering between nearby candidates, which is all the nearest
/// cell search needs.
pub fn vincenty_iterations(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    max_iterations: usize,
) -> Convergence {
    let u1 = ((1.0 - WGS84_F) * lat1.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * lat2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let l = (lon2 - lon1).to_radians();

    // Exact antipodes: the geodesic runs over a pole (α = 0, σ = π).
    let wrapped = (l + PI).rem_euclid(TAU) - PI;
    if (lat1 + lat2).abs().to_radians() < ANTIPODAL_EPSILON
        && (wrapped.abs() - PI).abs() < ANTIPODAL_EPSILON
    {
        let step = Step {
            sin_sigma: 0.0,
            cos_sigma: -1.0,
            sigma: PI,
            cos_sq_alpha: 1.0,
            cos_2sigma_m: -1.0 + 2.0 * sin_u1 * sin_u1,
        };
        return Convergence {
            distance_km: step.distance_km(),
            converged: true,
            iterations: 0,
        };
    }

    let mut lambda = l;
    let mut step = Step::default();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;

        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let t1 = cos_u2 * sin_lambda;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;

        step.sin_sigma = (t1 * t1 + t2 * t2).sqrt();
        step.cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;

        let sin_alpha = if step.sin_sigma == 0.0 {
            if step.cos_sigma > 0.0 {
                // Coincident points
                return Convergence {
                    distance_km: 0.0,
                    converged: true,
                    iterations,
                };
            }
            0.0
        } else {
            cos_u1 * cos_u2 * sin_lambda / step.sin_sigma
        };

        step.sigma = step.sin_sigma.atan2(step.cos_sigma);
        step.cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Equatorial line: cos²α = 0
        step.cos_2sigma_m = if step.cos_sq_alpha != 0.0 {
            step.cos_sigma - 2.0 * sin_u1 * sin_u2 / step.cos_sq_alpha
        } else {
            0.0
        };
        if step.cos_2sigma_m.is_nan() {
            step.cos_2sigma_m = 0.0;
        }

        let c = WGS84_F / 16.0 * step.cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * step.cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (step.sigma
                    + c * step.sin_sigma
                        * (step.cos_2sigma_m
                            + c * step.cos_sigma * (-1.0 + 2.0 * step.cos_2sigma_m * step.cos_2sigma_m)));

        if (lambda - previous).abs() < LAMBDA_EPSILON {
            converged = true;
            break;
        }
    }

    Convergence {
        distance_km: step.distance_km(),
        converged,
        iterations,
    }
}
