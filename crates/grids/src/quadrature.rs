//! Gaussian quadrature latitudes.
//!
//! The latitudes of an order-`N` Gaussian grid are the arcsines of the `2N`
//! roots of the Legendre polynomial `P_2N`. Roots are refined by Newton's
//! method from a Chebyshev-like initial guess.

use std::f64::consts::PI;

/// Newton iteration budget per root.
pub const MAX_NEWTON_ITERATIONS: usize = 10;

/// Step size below which a root is considered converged.
pub const NEWTON_TOLERANCE: f64 = 1e-15;

/// Legendre polynomial `P_n(x)` by the three-term recurrence.
pub fn legendre(n: usize, x: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => x,
        _ => {
            let mut previous = 1.0;
            let mut current = x;
            for k in 2..=n {
                let k = k as f64;
                let next = ((2.0 * k - 1.0) * x * current - (k - 1.0) * previous) / k;
                previous = current;
                current = next;
            }
            current
        }
    }
}

/// Derivative `P'_n(x)`, valid for `|x| != 1`.
pub fn legendre_derivative(n: usize, x: f64) -> f64 {
    match n {
        0 => 0.0,
        1 => 1.0,
        _ => n as f64 * (x * legendre(n, x) - legendre(n - 1, x)) / (x * x - 1.0),
    }
}

/// The `i`-th root of `P_n` counted from +1, with its convergence flag.
pub fn legendre_root(n: usize, i: usize) -> (f64, bool) {
    let mut x = (PI * (4 * i + 3) as f64 / (4 * n + 2) as f64).cos();

    for _ in 0..MAX_NEWTON_ITERATIONS {
        let dx = -legendre(n, x) / legendre_derivative(n, x);
        x += dx;
        if dx.abs() < NEWTON_TOLERANCE {
            return (x, true);
        }
    }
    (x, false)
}

/// `n` quadrature latitudes in degrees, ordered north to south.
///
/// The northern half is solved and mirrored, so `lat[i] == -lat[n - 1 - i]`
/// holds exactly.
pub fn gaussian_latitudes(n: usize) -> Vec<f64> {
    let mut latitudes = vec![0.0; n];
    let mut unconverged = 0usize;

    for i in 0..n / 2 {
        let (x, converged) = legendre_root(n, i);
        if !converged {
            unconverged += 1;
        }
        let lat = x.asin().to_degrees();
        latitudes[i] = lat;
        latitudes[n - 1 - i] = -lat;
    }

    // Odd counts have a root at the equator.
    if n % 2 == 1 {
        latitudes[n / 2] = 0.0;
    }

    if unconverged > 0 {
        tracing::debug!(n, unconverged, "legendre roots stopped at iteration budget");
    }

    latitudes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legendre_low_orders() {
        for x in [-0.9, -0.3, 0.0, 0.4, 0.8] {
            assert!((legendre(2, x) - (3.0 * x * x - 1.0) / 2.0).abs() < 1e-14);
            assert!((legendre(3, x) - (5.0 * x * x * x - 3.0 * x) / 2.0).abs() < 1e-14);
            assert!((legendre_derivative(2, x) - 3.0 * x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_roots_are_zeros() {
        for i in 0..32 {
            let (x, converged) = legendre_root(64, i);
            assert!(converged, "root {i}");
            assert!(legendre(64, x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_f48_latitudes() {
        let lats = gaussian_latitudes(96);
        assert_eq!(lats.len(), 96);
        assert!((lats[0] - 88.572169).abs() < 1e-6);
        assert!((lats[1] - 86.722531).abs() < 1e-6);
        assert!((lats[2] - 84.861970).abs() < 1e-6);
        assert!((lats[47] - 0.932630).abs() < 1e-6);
        assert_eq!(lats[95], -lats[0]);
    }

    #[test]
    fn test_o32_latitudes() {
        let lats = gaussian_latitudes(64);
        assert!((lats[0] - 87.863_798_839_232_67).abs() < 1e-9);
        assert!((lats[1] - 85.096_526_988_317_32).abs() < 1e-9);
        assert!((lats[31] - 1.395_306_910_819_495_8).abs() < 1e-9);
    }

    #[test]
    fn test_strictly_descending_and_symmetric() {
        for n in [2, 3, 8, 17, 64, 160] {
            let lats = gaussian_latitudes(n);
            assert!(lats.windows(2).all(|w| w[0] > w[1]), "n = {n}");
            for i in 0..n {
                assert_eq!(lats[i], -lats[n - 1 - i]);
            }
            assert!(lats[0] < 90.0);
        }
    }

    #[test]
    fn test_odd_count_has_equator() {
        let lats = gaussian_latitudes(3);
        assert_eq!(lats[1], 0.0);
        assert!((lats[0] - 50.768_479_516_407_74).abs() < 1e-9);
    }
}
