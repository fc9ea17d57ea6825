//! Common types shared across the loran-grid workspace.

pub mod bbox;
pub mod chain;
pub mod error;
pub mod geo;
pub mod line;

pub use bbox::BoundingBox;
pub use chain::{Chain, ChainPair, Station, StationRole, TdSequence};
pub use error::GeoError;
pub use geo::GeoPoint;
pub use line::GridLine;
