//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;
use crate::geo::GeoPoint;

/// A geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox (boundary inclusive).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
            && self.min_lon <= other.max_lon
            && self.max_lon >= other.min_lon
    }

    /// Grow the box by a buffer amount in degrees on every side.
    pub fn expand(&self, buffer_deg: f64) -> Self {
        Self {
            min_lat: self.min_lat - buffer_deg,
            min_lon: self.min_lon - buffer_deg,
            max_lat: self.max_lat + buffer_deg,
            max_lon: self.max_lon + buffer_deg,
        }
    }

    /// Center of the box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }

    /// The four corners, in SW, SE, NW, NE order.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint {
                lat: self.min_lat,
                lon: self.min_lon,
            },
            GeoPoint {
                lat: self.min_lat,
                lon: self.max_lon,
            },
            GeoPoint {
                lat: self.max_lat,
                lon: self.min_lon,
            },
            GeoPoint {
                lat: self.max_lat,
                lon: self.max_lon,
            },
        ]
    }

    /// Validate corner coordinates and extent ordering.
    pub fn validate(&self) -> Result<(), GeoError> {
        for corner in self.corners() {
            corner.validate()?;
        }
        if self.min_lat > self.max_lat || self.min_lon > self.max_lon {
            return Err(GeoError::InvalidExtent {
                min_lat: self.min_lat,
                min_lon: self.min_lon,
                max_lat: self.max_lat,
                max_lon: self.max_lon,
            });
        }
        Ok(())
    }
}
