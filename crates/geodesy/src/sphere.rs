//! Spherical distance, bearing and destination calculations.

use loran_common::{GeoError, GeoPoint};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_229.0;

/// Great-circle distance between two points in meters (haversine form).
///
/// Identical points return exactly 0.0; the haversine formulation stays
/// well-conditioned for both nearby and near-antipodal inputs.
pub fn distance(a: GeoPoint, b: GeoPoint) -> Result<f64, GeoError> {
    a.validate()?;
    b.validate()?;

    if a == b {
        return Ok(0.0);
    }

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().clamp(0.0, 1.0).asin();

    Ok(EARTH_RADIUS_M * c)
}

/// Initial bearing from `a` to `b` in degrees, normalized to [0, 360).
pub fn bearing(a: GeoPoint, b: GeoPoint) -> Result<f64, GeoError> {
    a.validate()?;
    b.validate()?;

    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    Ok(y.atan2(x).to_degrees().rem_euclid(360.0))
}

/// Project `p` forward along `bearing_deg` by `distance_m` meters.
///
/// The result longitude is normalized to [-180, 180); latitude is clamped to
/// the valid range against rounding at the poles.
pub fn destination(p: GeoPoint, bearing_deg: f64, distance_m: f64) -> Result<GeoPoint, GeoError> {
    p.validate()?;
    if !bearing_deg.is_finite() {
        return Err(GeoError::InvalidBearing(bearing_deg));
    }
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err(GeoError::InvalidDistance(distance_m));
    }

    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let lat1 = p.lat.to_radians();
    let lon1 = p.lon.to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Ok(GeoPoint {
        lat: lat2.to_degrees().clamp(-90.0, 90.0),
        lon: (lon2.to_degrees() + 180.0).rem_euclid(360.0) - 180.0,
    })
}
