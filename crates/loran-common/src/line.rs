//! Grid line output type.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// One hyperbolic line of position: the polyline produced for a single
/// (master/secondary pair, TD value) combination.
///
/// Lines are never mutated after assembly; the clipper and any serialization
/// layer consume them read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub chain_id: String,
    pub secondary_id: String,
    /// The constant TD this line traces, microseconds.
    pub td_us: f64,
    /// Ordered walk along the curve.
    pub points: Vec<GeoPoint>,
}

impl GridLine {
    pub fn new(
        chain_id: impl Into<String>,
        secondary_id: impl Into<String>,
        td_us: f64,
        points: Vec<GeoPoint>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            secondary_id: secondary_id.into(),
            td_us,
            points,
        }
    }

    /// Identifier of the owning pair, e.g. "9960_X".
    pub fn pair_id(&self) -> String {
        format!("{}_{}", self.chain_id, self.secondary_id)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
