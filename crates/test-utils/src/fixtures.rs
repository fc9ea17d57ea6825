//! Station and region fixtures shared across tests.
//!
//! Station positions and delays are those of the real 9960 Northeast US
//! chain.

use loran_common::{Chain, ChainPair, TdSequence};

/// Common region fixtures.
pub mod regions {
    use loran_common::BoundingBox;

    /// Atlantic seaboard, Florida to Maine.
    pub fn atlantic_seaboard() -> BoundingBox {
        BoundingBox::new(25.0, -82.0, 47.0, -67.0)
    }

    /// Gulf of Maine approaches.
    pub fn gulf_of_maine() -> BoundingBox {
        BoundingBox::new(42.0, -72.0, 46.0, -66.0)
    }

    /// A region far from any fixture station (mid-Pacific).
    pub fn mid_pacific() -> BoundingBox {
        BoundingBox::new(-5.0, -160.0, 5.0, -150.0)
    }
}

/// Stations of the 9960 Northeast US chain.
pub mod stations {
    use loran_common::{GeoPoint, Station, StationRole};

    /// Master at Seneca, NY.
    pub fn seneca() -> Station {
        Station::new(
            "M",
            GeoPoint {
                lat: 42.714088,
                lon: -76.825919,
            },
            StationRole::Master,
        )
        .with_name("Seneca, NY")
    }

    /// Secondary W at Caribou, ME.
    pub fn caribou() -> Station {
        Station::new(
            "W",
            GeoPoint {
                lat: 46.807585,
                lon: -67.926989,
            },
            StationRole::Secondary,
        )
        .with_name("Caribou, ME")
    }

    /// Secondary X at Nantucket, MA.
    pub fn nantucket() -> Station {
        Station::new(
            "X",
            GeoPoint {
                lat: 41.253346,
                lon: -69.977371,
            },
            StationRole::Secondary,
        )
        .with_name("Nantucket, MA")
    }

    /// Secondary Y at Carolina Beach, NC.
    pub fn carolina_beach() -> Station {
        Station::new(
            "Y",
            GeoPoint {
                lat: 34.062836,
                lon: -77.912806,
            },
            StationRole::Secondary,
        )
        .with_name("Carolina Beach, NC")
    }
}

/// Published TD offsets for the 9960 secondaries, microseconds.
pub mod delays {
    pub const CARIBOU_W: f64 = 13_797.20;
    pub const NANTUCKET_X: f64 = 26_969.93;
    pub const CAROLINA_BEACH_Y: f64 = 42_221.64;
}

/// The 9960 Northeast US chain with W, X and Y secondaries and auto TD
/// families.
pub fn chain_9960() -> Chain {
    Chain {
        id: "9960".to_string(),
        name: Some("Northeast U.S.".to_string()),
        gri: Some(9960),
        master: stations::seneca(),
        pairs: vec![
            ChainPair {
                secondary: stations::caribou(),
                coding_delay_us: delays::CARIBOU_W,
                tds: TdSequence::default(),
            },
            ChainPair {
                secondary: stations::nantucket(),
                coding_delay_us: delays::NANTUCKET_X,
                tds: TdSequence::default(),
            },
            ChainPair {
                secondary: stations::carolina_beach(),
                coding_delay_us: delays::CAROLINA_BEACH_Y,
                tds: TdSequence::default(),
            },
        ],
    }
}

/// A single-pair chain with explicit TD values, for focused solver tests.
pub fn chain_9960_x_only(tds: Vec<f64>) -> Chain {
    Chain {
        id: "9960".to_string(),
        name: None,
        gri: Some(9960),
        master: stations::seneca(),
        pairs: vec![ChainPair {
            secondary: stations::nantucket(),
            coding_delay_us: delays::NANTUCKET_X,
            tds: TdSequence::Explicit(tds),
        }],
    }
}
