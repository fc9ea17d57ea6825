//! Sample configuration covering the Atlantic seaboard with the 9960
//! Northeast US chain.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use loran_common::{BoundingBox, Chain, ChainPair, GeoPoint, Station, StationRole, TdSequence};
use loran_solver::{default_ground_wave_speed, GridConfig, SolverParams};

/// The 9960 Northeast US chain: Seneca master with the Caribou, Nantucket
/// and Carolina Beach secondaries.
pub fn sample_config() -> GridConfig {
    let master = Station::new(
        "M",
        GeoPoint {
            lat: 42.714088,
            lon: -76.825919,
        },
        StationRole::Master,
    )
    .with_name("Seneca, NY");

    let secondary = |id: &str, name: &str, lat: f64, lon: f64, coding_delay_us: f64| ChainPair {
        secondary: Station::new(id, GeoPoint { lat, lon }, StationRole::Secondary).with_name(name),
        coding_delay_us,
        tds: TdSequence::default(),
    };

    GridConfig {
        region: BoundingBox::new(25.0, -82.0, 47.0, -67.0),
        propagation_speed_m_per_s: default_ground_wave_speed(),
        solver: SolverParams::default(),
        chains: vec![Chain {
            id: "9960".to_string(),
            name: Some("Northeast U.S.".to_string()),
            gri: Some(9960),
            master,
            pairs: vec![
                secondary("W", "Caribou, ME", 46.807585, -67.926989, 13_797.20),
                secondary("X", "Nantucket, MA", 41.253346, -69.977371, 26_969.93),
                secondary("Y", "Carolina Beach, NC", 34.062836, -77.912806, 42_221.64),
            ],
        }],
    }
}

/// Serialize the sample configuration to `path`, creating parent directories
/// as needed.
pub fn write_sample_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let encoded = serde_json::to_string_pretty(&sample_config())?;
    fs::write(path, encoded).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
