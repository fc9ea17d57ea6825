//! Error types for geographic inputs.

use thiserror::Error;

/// A malformed geographic input.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("invalid bearing: {0} degrees")]
    InvalidBearing(f64),

    #[error("invalid distance: {0} meters")]
    InvalidDistance(f64),

    #[error(
        "invalid extent: ({min_lat}, {min_lon}) to ({max_lat}, {max_lon}) \
         has a min corner past its max corner"
    )]
    InvalidExtent {
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
    },
}
