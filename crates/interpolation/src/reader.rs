//! Source of raw field values.

use std::sync::Arc;

use crate::error::ReaderError;

/// Reads one stored value by time step and linear grid index.
///
/// Implementations decide where values live; the interpolator only ever
/// asks for indices produced by the grid codec.
pub trait ValueReader {
    fn read_value_at(&self, time_step: usize, grid_index: usize) -> Result<f64, ReaderError>;
}

impl<R: ValueReader + ?Sized> ValueReader for &R {
    fn read_value_at(&self, time_step: usize, grid_index: usize) -> Result<f64, ReaderError> {
        (**self).read_value_at(time_step, grid_index)
    }
}

impl<R: ValueReader + ?Sized> ValueReader for Arc<R> {
    fn read_value_at(&self, time_step: usize, grid_index: usize) -> Result<f64, ReaderError> {
        (**self).read_value_at(time_step, grid_index)
    }
}

impl<R: ValueReader + ?Sized> ValueReader for Box<R> {
    fn read_value_at(&self, time_step: usize, grid_index: usize) -> Result<f64, ReaderError> {
        (**self).read_value_at(time_step, grid_index)
    }
}

/// In-memory values, one `Vec` per time step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecReader {
    steps: Vec<Vec<f64>>,
}

impl VecReader {
    pub fn new(steps: Vec<Vec<f64>>) -> Self {
        Self { steps }
    }

    /// A single time step.
    pub fn from_field(field: Vec<f64>) -> Self {
        Self { steps: vec![field] }
    }

    /// Append a time step and return its number.
    pub fn push_step(&mut self, field: Vec<f64>) -> usize {
        self.steps.push(field);
        self.steps.len() - 1
    }

    pub fn time_steps(&self) -> usize {
        self.steps.len()
    }
}

impl ValueReader for VecReader {
    fn read_value_at(&self, time_step: usize, grid_index: usize) -> Result<f64, ReaderError> {
        self.steps
            .get(time_step)
            .and_then(|field| field.get(grid_index))
            .copied()
            .ok_or_else(|| ReaderError::not_found(time_step, grid_index))
    }
}
