//! Signal propagation timing model.

use crate::error::{GridError, Result};

/// Speed of light in vacuum, meters per second.
pub const SPEED_OF_LIGHT_M_PER_S: f64 = 299_792_458.0;

/// Refractive-index adjustment for near-surface ground-wave propagation.
pub const ATMOSPHERIC_REFRACTION: f64 = 1.0003;

/// Default ground-wave propagation speed in meters per second.
pub fn default_ground_wave_speed() -> f64 {
    SPEED_OF_LIGHT_M_PER_S / ATMOSPHERIC_REFRACTION
}

/// Converts station distances into expected time differences.
#[derive(Debug, Clone, Copy)]
pub struct Propagation {
    speed_m_per_us: f64,
}

impl Propagation {
    /// Build from a speed in meters per second; must be strictly positive.
    pub fn new(speed_m_per_s: f64) -> Result<Self> {
        if !speed_m_per_s.is_finite() || speed_m_per_s <= 0.0 {
            return Err(GridError::invalid_configuration(format!(
                "propagation speed must be positive, got {speed_m_per_s} m/s"
            )));
        }
        Ok(Self {
            speed_m_per_us: speed_m_per_s * 1e-6,
        })
    }

    /// Effective speed in meters per microsecond.
    pub fn speed_m_per_us(&self) -> f64 {
        self.speed_m_per_us
    }

    /// Expected published TD in microseconds for a receiver at the given
    /// distances from the master and secondary stations.
    pub fn time_difference(
        &self,
        master_dist_m: f64,
        secondary_dist_m: f64,
        coding_delay_us: f64,
    ) -> f64 {
        (secondary_dist_m - master_dist_m) / self.speed_m_per_us + coding_delay_us
    }

    /// Distance difference (secondary minus master, meters) implied by a
    /// published TD value.
    pub fn range_difference(&self, td_us: f64, coding_delay_us: f64) -> f64 {
        (td_us - coding_delay_us) * self.speed_m_per_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_speed() {
        assert!(Propagation::new(0.0).is_err());
        assert!(Propagation::new(-299_700_000.0).is_err());
        assert!(Propagation::new(f64::NAN).is_err());
    }

    #[test]
    fn test_time_difference_on_bisector_is_the_coding_delay() {
        let p = Propagation::new(299_700_000.0).unwrap();
        assert_eq!(p.time_difference(120_000.0, 120_000.0, 11_000.0), 11_000.0);
    }

    #[test]
    fn test_time_difference_scales_with_range() {
        let p = Propagation::new(299_700_000.0).unwrap();
        // 299.7 meters of range difference is one microsecond.
        let td = p.time_difference(0.0, 299.7, 0.0);
        assert!((td - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_range_difference_inverts_time_difference() {
        let p = Propagation::new(299_700_000.0).unwrap();
        let td = p.time_difference(50_000.0, 125_000.0, 26_000.0);
        let k = p.range_difference(td, 26_000.0);
        assert!((k - 75_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_ground_wave_speed_is_below_vacuum() {
        let v = default_ground_wave_speed();
        assert!(v < SPEED_OF_LIGHT_M_PER_S);
        assert!(v > 0.999 * SPEED_OF_LIGHT_M_PER_S);
    }
}
