//! GeoJSON encoding of grid lines.
//!
//! One LineString feature per clipped grid line, tagged with the chain,
//! secondary and TD value so chart styling can key off them.

use loran_common::GridLine;
use serde::{Deserialize, Serialize};

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,
    pub features: Vec<Feature>,
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,
    pub geometry: Geometry,
    pub properties: LineProperties,
}

/// GeoJSON geometry types emitted by the grid generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString {
        /// Array of [longitude, latitude] coordinate pairs.
        coordinates: Vec<[f64; 2]>,
    },
}

/// Styling and identification properties of one grid line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineProperties {
    pub chain: String,
    pub secondary: String,
    pub td: f64,
    /// Chart label, e.g. "26900 µs".
    pub label: String,
}

/// Encode grid lines as a FeatureCollection. Lines too short to draw are
/// dropped.
pub fn feature_collection(lines: &[GridLine]) -> FeatureCollection {
    FeatureCollection {
        type_: "FeatureCollection".to_string(),
        features: lines
            .iter()
            .filter(|line| line.points.len() >= 2)
            .map(feature)
            .collect(),
    }
}

fn feature(line: &GridLine) -> Feature {
    Feature {
        type_: "Feature".to_string(),
        geometry: Geometry::LineString {
            coordinates: line.points.iter().map(|p| [p.lon, p.lat]).collect(),
        },
        properties: LineProperties {
            chain: line.chain_id.clone(),
            secondary: line.secondary_id.clone(),
            td: line.td_us,
            label: format!("{:.0} µs", line.td_us),
        },
    }
}
