//! Shared test utilities for the geogrid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Canonical grid parameters and reference places with known indices
//! - Synthetic field and query-point generators
//! - A tolerance assertion macro for floating point results
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_close, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Assert that two floating point values differ by less than a tolerance.
///
/// # Usage
///
/// ```
/// use test_utils::assert_close;
///
/// assert_close!(0.1 + 0.2, 0.3, 1e-12);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let actual: f64 = $actual;
        let expected: f64 = $expected;
        let tolerance: f64 = $tolerance;
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {} within {} of {}, got {}",
            stringify!($actual),
            tolerance,
            expected,
            actual
        );
    }};
}
