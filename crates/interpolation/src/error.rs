//! Error types for interpolation.

use thiserror::Error;

/// Failures reported by a [`ValueReader`](crate::ValueReader).
#[derive(Error, Debug)]
pub enum ReaderError {
    /// No value stored for this time step and index.
    #[error("no value for time step {time_step} at grid index {grid_index}")]
    NotFound { time_step: usize, grid_index: usize },

    /// Any other failure of the underlying store.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl ReaderError {
    /// Create a NotFound error.
    pub fn not_found(time_step: usize, grid_index: usize) -> Self {
        Self::NotFound {
            time_step,
            grid_index,
        }
    }
}

/// Errors that can occur while interpolating.
#[derive(Error, Debug)]
pub enum InterpolationError {
    /// A corner value could not be read.
    #[error("reader error: {0}")]
    Reader(#[from] ReaderError),

    /// The target is not enclosed by a cell of the grid.
    #[error("point ({lat}, {lon}) is outside the grid")]
    OutsideGrid { lat: f64, lon: f64 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl InterpolationError {
    /// Create an OutsideGrid error.
    pub fn outside_grid(lat: f64, lon: f64) -> Self {
        Self::OutsideGrid { lat, lon }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for interpolation operations.
pub type Result<T> = std::result::Result<T, InterpolationError>;
