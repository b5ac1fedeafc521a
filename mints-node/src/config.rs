//! Node configuration
//!
//! Everything the firmware kept in module globals: which sensor supplies
//! climate, which one is the particle counter, where the climate store lives
//! and which calibration model to load.
//!
//! ```json
//! {
//!   "node_id": "00:1e:06:10:c2:e7",
//!   "climate_sensor_id": "BME280V2",
//!   "store_dir": "/home/teamlary/mintsDataTmp",
//!   "model_path": "/home/teamlary/models/pm25.json"
//! }
//! ```
//!
//! Omitted keys take their defaults.

use std::path::{Path, PathBuf};

use mints_core::{constants::validity::CLIMATE_FRESHNESS_SECS, GateThresholds};
use serde::{Deserialize, Serialize};

use crate::errors::{NodeError, NodeResult};

/// Identity used when the node has no usable MAC address
pub const UNKNOWN_NODE_ID: &str = "xxxxxxxx";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    /// Node identity, usually the MAC address
    pub node_id: String,
    /// Sensor whose readings supply climate
    pub climate_sensor_id: String,
    /// Particle counter sensor
    pub pm_sensor_id: String,
    /// Record type the corrected record is published under
    pub record_type: String,
    /// Root directory of the climate store
    pub store_dir: PathBuf,
    /// Exported calibration model, if any
    pub model_path: Option<PathBuf>,
    /// Maximum climate reading age (s)
    pub freshness_secs: f64,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            node_id: UNKNOWN_NODE_ID.to_string(),
            climate_sensor_id: "BME280V2".to_string(),
            pm_sensor_id: "IPS7100".to_string(),
            record_type: "IPS7100MC".to_string(),
            store_dir: PathBuf::from("mintsDataTmp"),
            model_path: None,
            freshness_secs: CLIMATE_FRESHNESS_SECS,
        }
    }
}

impl CorrectionConfig {
    /// Parse a JSON configuration
    pub fn from_json(text: &str) -> NodeResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &Path) -> NodeResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    fn validate(&self) -> NodeResult<()> {
        if self.freshness_secs.is_nan() || self.freshness_secs <= 0.0 {
            return Err(NodeError::Config(format!(
                "freshness_secs must be positive, got {}",
                self.freshness_secs
            )));
        }
        if self.climate_sensor_id == self.pm_sensor_id {
            return Err(NodeError::Config(
                "climate and particle sensors must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Store key for this node
    pub fn node_identity(&self) -> String {
        normalize_node_id(&self.node_id)
    }

    /// Gate thresholds with the configured freshness window
    pub fn gate_thresholds(&self) -> GateThresholds {
        GateThresholds {
            freshness_secs: self.freshness_secs,
            ..GateThresholds::default()
        }
    }
}

/// MAC address without separators, lower-cased
pub fn normalize_node_id(raw: &str) -> String {
    let id: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ':')
        .collect::<String>()
        .to_lowercase();
    if id.is_empty() {
        UNKNOWN_NODE_ID.to_string()
    } else {
        id
    }
}
