//! LORAN-C chain and station definitions.
//!
//! A chain is one master transmitter and a handful of secondaries sharing a
//! synchronized pulse group. Each master/secondary pairing produces a family
//! of hyperbolic lines of position, one per published TD value.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Role of a transmitter within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationRole {
    Master,
    Secondary,
}

/// A LORAN-C transmitter site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Short designator, e.g. "M", "W", "X", "Y".
    pub id: String,
    /// Site name, e.g. "Seneca, NY".
    #[serde(default)]
    pub name: Option<String>,
    pub position: GeoPoint,
    pub role: StationRole,
}

impl Station {
    pub fn new(id: impl Into<String>, position: GeoPoint, role: StationRole) -> Self {
        Self {
            id: id.into(),
            name: None,
            position,
            role,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One master/secondary pairing and the TD family drawn for it.
///
/// The master is carried by the owning [`Chain`], so every pair in a chain
/// shares it by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainPair {
    pub secondary: Station,
    /// Offset added to the raw propagation difference to form the published
    /// TD values for this secondary, microseconds.
    pub coding_delay_us: f64,
    #[serde(default)]
    pub tds: TdSequence,
}

/// A named LORAN-C chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    /// Chain identifier, conventionally the GRI designator, e.g. "9960".
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Group repetition interval in tens of microseconds.
    #[serde(default)]
    pub gri: Option<u32>,
    pub master: Station,
    pub pairs: Vec<ChainPair>,
}

/// The family of TD values to draw for one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TdSequence {
    /// Evenly spaced family: `start_us`, `start_us + step_us`, ...
    Range {
        start_us: f64,
        step_us: f64,
        count: usize,
    },
    /// Explicit list of TD values, microseconds.
    Explicit(Vec<f64>),
    /// Derive a family covering the run's region, aligned to step multiples.
    Auto {
        #[serde(default = "default_auto_step")]
        step_us: f64,
        /// Extra padding on both ends of the derived band, microseconds.
        #[serde(default = "default_auto_buffer")]
        buffer_us: f64,
    },
}

fn default_auto_step() -> f64 {
    100.0
}

fn default_auto_buffer() -> f64 {
    2000.0
}

impl Default for TdSequence {
    fn default() -> Self {
        Self::Auto {
            step_us: default_auto_step(),
            buffer_us: default_auto_buffer(),
        }
    }
}

impl TdSequence {
    /// Expand to the ascending, de-duplicated value list where no geometric
    /// context is needed. `Auto` families depend on the region and are
    /// resolved by the grid assembler instead.
    pub fn explicit_values(&self) -> Option<Vec<f64>> {
        match self {
            Self::Range {
                start_us,
                step_us,
                count,
            } => Some(
                (0..*count)
                    .map(|i| start_us + i as f64 * step_us)
                    .collect(),
            ),
            Self::Explicit(values) => {
                let mut values = values.clone();
                values.sort_by(|a, b| a.total_cmp(b));
                values.dedup();
                Some(values)
            }
            Self::Auto { .. } => None,
        }
    }
}
