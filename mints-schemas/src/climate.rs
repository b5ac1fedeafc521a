//! Climate Readings
//!
//! Two kinds of climate source feed the correction. They name the same
//! quantities differently, so each is normalized into [`ClimateReading`]
//! before it is stored:
//!
//! | Source     | temperature      | pressure                          | humidity           | dew point  |
//! |------------|------------------|-----------------------------------|--------------------|------------|
//! | `BME280V2` | `temperature`    | `pressure`                        | `humidity`         | `dewPoint` |
//! | `WIMDA`    | `airTemperature` | `barrometricPressureBars` × 1000  | `relativeHumidity` | `dewPoint` |
//!
//! The WIMDA pressure key keeps the sentence parser's spelling.

use chrono::NaiveDateTime;
use mints_core::ClimateConditions;
use serde::{Deserialize, Serialize};

use crate::{
    fields::{self, Fields},
    RecordError,
};

/// Latest climate reading for a node, as persisted by the climate store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateReading {
    /// When the reading was taken
    #[serde(with = "crate::timestamp")]
    pub date_time: NaiveDateTime,
    /// Air temperature (°C)
    pub temperature: f64,
    /// Barometric pressure (hPa for BME280, mbar for WIMDA)
    pub pressure: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Dew point (°C)
    pub dew_point: f64,
}

impl ClimateReading {
    /// The values the validity gate and growth law need
    pub fn conditions(&self) -> ClimateConditions {
        ClimateConditions {
            temperature: self.temperature,
            humidity: self.humidity,
            dew_point: self.dew_point,
            pressure: self.pressure,
        }
    }
}

/// Known climate source shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateSource {
    /// Ambient pressure/humidity/temperature sensor
    Bme280,
    /// Weather station MDA sentence
    Wimda,
}

impl ClimateSource {
    /// Source shape for a sensor ID, if it is a climate source
    pub fn from_sensor_id(sensor_id: &str) -> Option<Self> {
        match sensor_id {
            "BME280V2" | "BME280" => Some(Self::Bme280),
            "WIMDA" => Some(Self::Wimda),
            _ => None,
        }
    }

    /// Canonical sensor ID
    pub fn sensor_id(&self) -> &'static str {
        match self {
            Self::Bme280 => "BME280V2",
            Self::Wimda => "WIMDA",
        }
    }

    /// Map raw sensor fields to a [`ClimateReading`]
    pub fn normalize(
        &self,
        fields: &Fields,
        date_time: NaiveDateTime,
    ) -> Result<ClimateReading, RecordError> {
        let reading = match self {
            Self::Bme280 => ClimateReading {
                date_time,
                temperature: fields::number(fields, "temperature")?,
                pressure: fields::number(fields, "pressure")?,
                humidity: fields::number(fields, "humidity")?,
                dew_point: fields::number(fields, "dewPoint")?,
            },
            Self::Wimda => ClimateReading {
                date_time,
                temperature: fields::number(fields, "airTemperature")?,
                pressure: fields::number(fields, "barrometricPressureBars")? * 1000.0,
                humidity: fields::number(fields, "relativeHumidity")?,
                dew_point: fields::number(fields, "dewPoint")?,
            },
        };
        Ok(reading)
    }
}
