//! Interpolation of gridded fields at arbitrary coordinates.
//!
//! A [`GridInterpolator`] finds the grid cell around a target point, reads
//! its four corner values through a [`ValueReader`], and combines them with
//! one of the [`Interpolator`] strategies using the target's fractional
//! position inside the cell.
//!
//! Corner order is fixed across the crate:
//! `[(row, col), (row, col + 1), (row + 1, col), (row + 1, col + 1)]`, with
//! weights `[row fraction, column fraction]`.

pub mod config;
pub mod error;
pub mod grid;
pub mod interpolators;
pub mod reader;

pub use config::InterpolationConfig;
pub use error::{InterpolationError, ReaderError, Result};
pub use grid::GridInterpolator;
pub use interpolators::{
    AverageInterpolator, BilinearInterpolator, IdwInterpolator, InterpolationMethod, Interpolator,
    KrigingInterpolator, NearestInterpolator,
};
pub use reader::{ValueReader, VecReader};
