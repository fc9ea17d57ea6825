//! Geographic point type.

use serde::{Deserialize, Serialize};

use crate::error::GeoError;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        let point = Self { lat, lon };
        point.validate()?;
        Ok(point)
    }

    /// Check that latitude is in [-90, 90] and longitude in [-180, 180].
    pub fn validate(&self) -> Result<(), GeoError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let p = GeoPoint::new(42.714088, -76.825919).unwrap();
        assert_eq!(p.lat, 42.714088);
        assert_eq!(p.lon, -76.825919);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(-91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.5).is_err());
        assert!(GeoPoint::new(0.0, -200.0).is_err());
    }

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_poles_and_antimeridian_are_valid() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
    }
}
