//! Error types for grid generation.

use loran_common::GeoError;
use thiserror::Error;

/// Errors that can occur while building a hyperbolic grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// A malformed geographic input.
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    /// Rejected at setup time, before any solving begins.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No valid hyperbola exists for a station pair.
    #[error("degenerate geometry: master {master} and secondary {secondary} coincide")]
    DegenerateGeometry { master: String, secondary: String },
}

impl GridError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
