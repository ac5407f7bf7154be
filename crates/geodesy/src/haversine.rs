//! Great-circle distance on a spherical earth.

/// Mean earth radius used by the spherical model, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point() {
        assert_eq!(haversine(31.2, 121.5, 31.2, 121.5), 0.0);
    }

    #[test]
    fn test_quarter_meridian() {
        // Equator to pole is a quarter of the circumference
        let d = haversine(0.0, 0.0, 90.0, 0.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((d - expected).abs() < 1e-9);
    }

    #[test]
    fn test_antipodes() {
        let d = haversine(0.0, 0.0, 0.0, 180.0);
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_longitude_periodicity() {
        let a = haversine(10.0, -170.0, 12.0, 170.0);
        let b = haversine(10.0, 190.0, 12.0, 170.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_shanghai_beijing() {
        let d = haversine(31.2304, 121.4737, 39.9042, 116.4074);
        assert!((d - 1067.0).abs() < 5.0, "got {d}");
    }
}
