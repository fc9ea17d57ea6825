//! Run configuration: solver tuning plus the chain and region definition.
//!
//! The configuration is built once at startup, validated eagerly, and passed
//! by reference into every component; nothing here is mutated after load.

use loran_common::{BoundingBox, Chain, ChainPair, TdSequence};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::propagation::default_ground_wave_speed;

/// Numeric tuning for the hyperbola solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Accepted TD residual for an emitted point, microseconds.
    pub tolerance_us: f64,
    /// Target spacing between consecutive polyline points, meters.
    pub step_m: f64,
    /// Newton iteration cap per point.
    pub max_iterations: u32,
    /// Safety cap on emitted points per branch direction.
    pub max_points: usize,
    /// Minimum TD-gradient magnitude (unitless, in [0, 2]) below which a
    /// point counts as degenerate and is skipped.
    pub min_gradient: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            tolerance_us: 0.1,
            step_m: 5_000.0,
            max_iterations: 32,
            max_points: 4096,
            min_gradient: 1e-3,
        }
    }
}

impl SolverParams {
    /// Validate the solver tuning.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance_us.is_finite() && self.tolerance_us > 0.0) {
            return Err(GridError::invalid_configuration(format!(
                "tolerance_us must be positive, got {}",
                self.tolerance_us
            )));
        }
        if !(self.step_m.is_finite() && self.step_m > 0.0) {
            return Err(GridError::invalid_configuration(format!(
                "step_m must be positive, got {}",
                self.step_m
            )));
        }
        if self.max_iterations == 0 {
            return Err(GridError::invalid_configuration(
                "max_iterations must be at least 1",
            ));
        }
        if self.max_points < 2 {
            return Err(GridError::invalid_configuration(
                "max_points must be at least 2",
            ));
        }
        if !(self.min_gradient.is_finite() && self.min_gradient > 0.0) {
            return Err(GridError::invalid_configuration(format!(
                "min_gradient must be positive, got {}",
                self.min_gradient
            )));
        }
        Ok(())
    }
}

/// Complete, immutable configuration for one grid-generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Area of interest the grid is clipped to.
    pub region: BoundingBox,
    /// Ground-wave propagation speed, meters per second.
    #[serde(default = "default_ground_wave_speed")]
    pub propagation_speed_m_per_s: f64,
    #[serde(default)]
    pub solver: SolverParams,
    pub chains: Vec<Chain>,
}

impl GridConfig {
    /// Eager validation; every failure surfaces here, before any solving.
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        if !(self.propagation_speed_m_per_s.is_finite() && self.propagation_speed_m_per_s > 0.0) {
            return Err(GridError::invalid_configuration(format!(
                "propagation speed must be positive, got {} m/s",
                self.propagation_speed_m_per_s
            )));
        }
        self.solver.validate()?;
        if self.chains.is_empty() {
            return Err(GridError::invalid_configuration("no chains configured"));
        }
        for chain in &self.chains {
            validate_chain(chain)?;
        }
        Ok(())
    }
}

fn validate_chain(chain: &Chain) -> Result<()> {
    chain.master.position.validate()?;
    if chain.pairs.is_empty() {
        return Err(GridError::invalid_configuration(format!(
            "chain {} has no secondary pairs",
            chain.id
        )));
    }
    for pair in &chain.pairs {
        validate_pair(chain, pair)?;
    }
    Ok(())
}

fn validate_pair(chain: &Chain, pair: &ChainPair) -> Result<()> {
    pair.secondary.position.validate()?;
    if pair.secondary.position == chain.master.position {
        return Err(GridError::invalid_configuration(format!(
            "chain {}: secondary {} coincides with the master station",
            chain.id, pair.secondary.id
        )));
    }
    if !pair.coding_delay_us.is_finite() {
        return Err(GridError::invalid_configuration(format!(
            "chain {}: secondary {} has a non-finite coding delay",
            chain.id, pair.secondary.id
        )));
    }
    validate_tds(chain, pair)
}

fn validate_tds(chain: &Chain, pair: &ChainPair) -> Result<()> {
    let context = || format!("chain {}, secondary {}", chain.id, pair.secondary.id);
    match &pair.tds {
        TdSequence::Range {
            start_us,
            step_us,
            count,
        } => {
            if !start_us.is_finite() || !(step_us.is_finite() && *step_us > 0.0) {
                return Err(GridError::invalid_configuration(format!(
                    "{}: TD range needs a finite start and a positive step",
                    context()
                )));
            }
            if *count == 0 {
                return Err(GridError::invalid_configuration(format!(
                    "{}: empty TD sequence",
                    context()
                )));
            }
        }
        TdSequence::Explicit(values) => {
            if values.is_empty() {
                return Err(GridError::invalid_configuration(format!(
                    "{}: empty TD sequence",
                    context()
                )));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(GridError::invalid_configuration(format!(
                    "{}: non-finite TD value",
                    context()
                )));
            }
        }
        TdSequence::Auto { step_us, buffer_us } => {
            if !(step_us.is_finite() && *step_us > 0.0) {
                return Err(GridError::invalid_configuration(format!(
                    "{}: auto TD family needs a positive step",
                    context()
                )));
            }
            if !(buffer_us.is_finite() && *buffer_us >= 0.0) {
                return Err(GridError::invalid_configuration(format!(
                    "{}: auto TD buffer must be non-negative",
                    context()
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loran_common::{GeoPoint, Station, StationRole};

    fn test_chain() -> Chain {
        Chain {
            id: "9960".to_string(),
            name: None,
            gri: Some(9960),
            master: Station::new(
                "M",
                GeoPoint {
                    lat: 42.714088,
                    lon: -76.825919,
                },
                StationRole::Master,
            ),
            pairs: vec![ChainPair {
                secondary: Station::new(
                    "X",
                    GeoPoint {
                        lat: 41.253346,
                        lon: -69.977371,
                    },
                    StationRole::Secondary,
                ),
                coding_delay_us: 26_969.93,
                tds: TdSequence::default(),
            }],
        }
    }

    fn test_config() -> GridConfig {
        GridConfig {
            region: BoundingBox::new(25.0, -82.0, 47.0, -67.0),
            propagation_speed_m_per_s: default_ground_wave_speed(),
            solver: SolverParams::default(),
            chains: vec![test_chain()],
        }
    }

    #[test]
    fn test_default_params_validate() {
        assert!(SolverParams::default().validate().is_ok());
    }

    #[test]
    fn test_params_reject_bad_values() {
        let mut params = SolverParams::default();
        params.tolerance_us = 0.0;
        assert!(params.validate().is_err());

        params = SolverParams::default();
        params.step_m = -1.0;
        assert!(params.validate().is_err());

        params = SolverParams::default();
        params.max_iterations = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_config_validates() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_speed() {
        let mut config = test_config();
        config.propagation_speed_m_per_s = 0.0;
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_rejects_no_chains() {
        let mut config = test_config();
        config.chains.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_master_secondary_collision() {
        let mut config = test_config();
        let master_pos = config.chains[0].master.position;
        config.chains[0].pairs[0].secondary.position = master_pos;
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_rejects_empty_td_sequence() {
        let mut config = test_config();
        config.chains[0].pairs[0].tds = TdSequence::Explicit(vec![]);
        assert!(config.validate().is_err());

        config.chains[0].pairs[0].tds = TdSequence::Range {
            start_us: 26_000.0,
            step_us: 100.0,
            count: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_bad_station_coordinates() {
        let mut config = test_config();
        config.chains[0].master.position.lat = 99.0;
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let json = r#"{
            "region": {"min_lat": 25.0, "min_lon": -82.0, "max_lat": 47.0, "max_lon": -67.0},
            "chains": [{
                "id": "9960",
                "master": {
                    "id": "M",
                    "position": {"lat": 42.714088, "lon": -76.825919},
                    "role": "master"
                },
                "pairs": [{
                    "secondary": {
                        "id": "X",
                        "position": {"lat": 41.253346, "lon": -69.977371},
                        "role": "secondary"
                    },
                    "coding_delay_us": 26969.93
                }]
            }]
        }"#;
        let config: GridConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.solver, SolverParams::default());
        assert!(config.propagation_speed_m_per_s > 299_000_000.0);
        assert!(config.validate().is_ok());
    }
}
