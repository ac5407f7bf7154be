//! Geodetic sampling grids.
//!
//! This crate describes where the points of a global field live and how
//! they are serialized:
//! - [`layout`]: uniform lat/lon grids and regular, reduced and
//!   octahedral Gaussian grids behind the [`Grid`] trait
//! - [`ScanMode`] and the [`codec`] functions mapping (row, column) to a
//!   linear index and back
//! - [`nearest`]: bracketing search refined by geodesic distance
//! - [`GridCache`]: memoized, single-flight grid construction
//!
//! # Example
//!
//! ```
//! use grids::{GridCache, GridSpec, ScanMode, grid_index};
//!
//! let cache = GridCache::new();
//! let grid = cache.get_or_build(&"O32".parse::<GridSpec>().unwrap()).unwrap();
//! let index = grid_index(grid.as_ref(), 0.0, 0.0, ScanMode::default());
//! assert!(index.is_some());
//! ```

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod nearest;
pub mod quadrature;
pub mod scan_mode;
pub mod spec;

pub use cache::{CacheStats, GridCache};
pub use codec::{grid_index, grid_index_from_indices, grid_indices, grid_point, guess_grid_index};
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use layout::{
    GeoPoint, Grid, GridLayout, LatLonGrid, OctahedralGaussian, ReducedGaussian, RegularGaussian,
};
pub use nearest::{find_nearest_indices, NearestGrids, NEAREST_ITERATIONS};
pub use quadrature::gaussian_latitudes;
pub use scan_mode::ScanMode;
pub use spec::GridSpec;
