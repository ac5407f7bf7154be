//! Geodesic distance between latitude/longitude points.
//!
//! Two models are provided:
//! - [`haversine`]: closed-form great-circle distance on a sphere of
//!   radius 6371 km. Never fails.
//! - [`vincenty`]: iterative inverse solution on the WGS-84 ellipsoid.
//!   Accurate to millimetres when it converges; signals non-convergence
//!   with [`NON_CONVERGENCE`].
//!
//! Grid lookups only need the *ordering* of distances, so they call
//! [`vincenty_iterations`] with a small budget and use whatever estimate
//! the truncated iteration produced.

pub mod haversine;
pub mod vincenty;

pub use haversine::{haversine, EARTH_RADIUS_KM};
pub use vincenty::{
    vincenty, vincenty_iterations, Convergence, DEFAULT_MAX_ITERATIONS, NON_CONVERGENCE,
};
