//! Shared test utilities for the atmosphere profile workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic meteogram payloads shaped like the provider's JSON
//! - Generators for plausible per-level columns
//! - Common fixtures (locations, instants)
//! - Approximate float assertions
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
//! use test_utils::{assert_approx_eq, MeteogramFixture};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Tolerance used by [`assert_approx_eq!`] when none is given, in the
/// units of the compared values (metres, pascals, kelvin, m/s).
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Assert two quantities agree within a tolerance.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(altitude, 100.0016, 1e-3);
/// assert_approx_eq!(pressure, 100_000.0); // DEFAULT_TOLERANCE
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($actual:expr, $expected:expr) => {
        $crate::assert_approx_eq!($actual, $expected, $crate::DEFAULT_TOLERANCE)
    };
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance): (f64, f64, f64) =
            ($actual as f64, $expected as f64, $tolerance as f64);
        let off_by = (actual - expected).abs();
        if off_by.is_nan() || off_by > tolerance {
            panic!(
                "assertion failed: {} = {:?}, expected {:?} within {:?} (off by {:?})",
                stringify!($actual),
                actual,
                expected,
                tolerance,
                off_by
            );
        }
    }};
}

/// Macro asserting an angle in degrees lies in `[0, 360)`.
#[macro_export]
macro_rules! assert_bearing {
    ($deg:expr) => {{
        let deg: f64 = $deg as f64;
        if !(0.0..360.0).contains(&deg) {
            panic!("assertion failed: bearing `{:?}` not in [0, 360)", deg);
        }
    }};
}
