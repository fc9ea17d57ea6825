//! Great-circle geometry on a spherical Earth.
//!
//! All LORAN grid math works in terms of three primitives: the distance
//! between two points, the initial bearing from one point to another, and the
//! forward projection of a point along a bearing. Everything operates on a
//! sphere with the mean Earth radius; the propagation-speed uncertainty in
//! the grid model dominates the ellipsoidal correction at chart scales.

pub mod sphere;

pub use sphere::{bearing, destination, distance, EARTH_RADIUS_M};
