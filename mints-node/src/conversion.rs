//! Incoming sensor records
//!
//! Replay files and the node's reader loops hand over one record per line:
//!
//! ```json
//! {"sensorID": "IPS7100", "dateTime": "2024-05-01 12:00:00.000000", "fields": {"pc0_1": 100, ..}}
//! ```

use chrono::NaiveDateTime;
use mints_schemas::{Fields, RecordError};
use serde::{Deserialize, Serialize};

/// One reading as produced by a sensor driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Driver's sensor ID
    #[serde(rename = "sensorID")]
    pub sensor_id: String,
    /// When the reading was taken
    #[serde(rename = "dateTime", with = "mints_schemas::timestamp")]
    pub date_time: NaiveDateTime,
    /// Named values
    pub fields: Fields,
}

impl SensorRecord {
    /// Parse one JSON line
    pub fn from_json_line(line: &str) -> Result<Self, RecordError> {
        serde_json::from_str(line).map_err(|e| RecordError::Malformed(e.to_string()))
    }
}
