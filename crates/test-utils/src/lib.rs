//! Shared test utilities for the loran-grid workspace.
//!
//! Provides approximate-equality macros and station/region fixtures drawn
//! from the 9960 Northeast US chain.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;

pub use fixtures::*;

/// Macro for approximate floating-point equality assertions.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of geographic points.
///
/// ```ignore
/// use test_utils::assert_points_approx_eq;
///
/// assert_points_approx_eq!(a, b, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_points_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        $crate::assert_approx_eq!($left.lat, $right.lat, $epsilon);
        $crate::assert_approx_eq!($left.lon, $right.lon, $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_points_approx_eq_passes() {
        let a = loran_common::GeoPoint {
            lat: 42.0000001,
            lon: -76.0000001,
        };
        let b = loran_common::GeoPoint {
            lat: 42.0,
            lon: -76.0,
        };
        assert_points_approx_eq!(a, b, 1e-6);
    }
}
