//! Common test fixtures.
//!
//! Grid parameters are plain tuples so this crate does not depend on the
//! crates it helps test.

/// Lat/lon grid parameters: `(min_lat, max_lat, min_lon, max_lon, lat_step, lon_step)`.
pub type LatLonParams = (f64, f64, f64, f64, f64, f64);

/// Common grid definitions for testing.
pub mod grid {
    use super::LatLonParams;

    /// GFS global grid (0.25 degree resolution, 721 x 1440)
    pub const GFS_0P25: LatLonParams = (-90.0, 90.0, 0.0, 359.75, 0.25, 0.25);

    /// GFS global grid (1 degree resolution, 181 x 360)
    pub const GFS_1P00: LatLonParams = (-90.0, 90.0, 0.0, 359.0, 1.0, 1.0);

    /// Global grid starting at the antimeridian
    pub const GLOBAL_DATELINE: LatLonParams = (-90.0, 90.0, -180.0, 179.5, 0.5, 0.5);

    /// East Asia regional grid (does not wrap)
    pub const EAST_ASIA: LatLonParams = (15.0, 55.0, 70.0, 140.0, 0.5, 0.5);

    /// Tiny 3 x 4 grid for hand-checked index arithmetic
    pub const TINY: LatLonParams = (0.0, 10.0, 0.0, 30.0, 5.0, 10.0);

    /// Gaussian short names exercised across the suite
    pub const GAUSSIAN_NAMES: [&str; 4] = ["F48", "N32", "O32", "O8"];
}

/// Reference places on the GFS 0.25° grid.
pub mod places {
    /// A named location with its expected standard-scan index.
    #[derive(Debug, Clone, Copy)]
    pub struct Place {
        pub name: &'static str,
        pub lat: f64,
        pub lon: f64,
        /// Row-major, north-to-south, west-to-east index on `GFS_0P25`.
        pub gfs_index: usize,
    }

    pub const LONDON: Place = Place {
        name: "London",
        lat: 51.5,
        lon: -0.13,
        gfs_index: 223_199,
    };

    pub const NEW_YORK: Place = Place {
        name: "New York",
        lat: 40.75,
        lon: -74.0,
        gfs_index: 284_824,
    };

    pub const BEIJING: Place = Place {
        name: "Beijing",
        lat: 39.9,
        lon: 116.4,
        gfs_index: 288_466,
    };

    pub const TOKYO: Place = Place {
        name: "Tokyo",
        lat: 35.7,
        lon: 139.7,
        gfs_index: 313_039,
    };

    pub const SYDNEY: Place = Place {
        name: "Sydney",
        lat: -33.9,
        lon: 151.2,
        gfs_index: 714_845,
    };

    pub const EQUATOR_DATELINE: Place = Place {
        name: "Equator at 180",
        lat: 0.0,
        lon: 180.0,
        gfs_index: 360 * 1440 + 720,
    };

    pub const ALL: [Place; 6] = [LONDON, NEW_YORK, BEIJING, TOKYO, SYDNEY, EQUATOR_DATELINE];
}

/// Corner values and weights used by interpolator tests.
pub mod corners {
    /// Corners in order (row, col), (row, col+1), (row+1, col), (row+1, col+1)
    pub const STEPPED: [f64; 4] = [10.0, 20.0, 30.0, 40.0];

    /// Identical corners: every interpolator must return this value.
    pub const FLAT: [f64; 4] = [7.5, 7.5, 7.5, 7.5];

    pub const CENTER: [f64; 2] = [0.5, 0.5];
}
