//! Error types for grid construction and configuration.

use thiserror::Error;

/// Errors that can occur while building or naming grids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Construction parameters that cannot describe a grid.
    #[error("invalid grid spec: {0}")]
    InvalidSpec(String),

    /// A short grid name or cache key that does not parse.
    #[error("cannot parse grid spec: {0}")]
    ParseSpec(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// Create an InvalidSpec error.
    pub fn invalid_spec(msg: impl Into<String>) -> Self {
        Self::InvalidSpec(msg.into())
    }

    /// Create a ParseSpec error.
    pub fn parse_spec(msg: impl Into<String>) -> Self {
        Self::ParseSpec(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
