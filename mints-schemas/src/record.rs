//! Corrected particulate-matter record
//!
//! The published record keeps raw-record column names for the corrected
//! values, so downstream consumers read `pc2_5`/`pm2_5` regardless of whether
//! the correction ran. The validity flags say whether it did.
//!
//! Field order is part of the contract: it becomes the CSV column order.

use chrono::NaiveDateTime;
use mints_core::{
    constants::validity::MISSING_CLIMATE_SENTINEL, MassConcentrations, ValidityFlags,
};
use serde::{Deserialize, Serialize};

use crate::climate::ClimateReading;

/// Output record for one particle-counter reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedRecord {
    #[serde(rename = "dateTime", with = "crate::timestamp")]
    pub date_time: NaiveDateTime,

    pub pc0_1: i64,
    pub pc0_3: i64,
    pub pc0_5: i64,
    pub pc1_0: i64,
    pub pc2_5: i64,
    pub pc5_0: i64,
    pub pc10_0: i64,

    pub pm0_1: f64,
    pub pm0_3: f64,
    pub pm0_5: f64,
    pub pm1_0: f64,
    pub pm2_5: f64,
    pub pm5_0: f64,
    pub pm10_0: f64,

    /// Calibrated PM2.5, or `pm2_5` when no calibration was applied
    #[serde(rename = "pm2_5ML")]
    pub pm2_5_ml: f64,

    pub temperature: f64,
    pub pressure: f64,
    pub humidity: f64,
    #[serde(rename = "dewPoint")]
    pub dew_point: f64,

    #[serde(rename = "climateNullValidity", with = "flag")]
    pub climate_null_validity: bool,
    #[serde(rename = "climateDateTimeValidity", with = "flag")]
    pub climate_date_time_validity: bool,
    #[serde(rename = "climateValidity", with = "flag")]
    pub climate_validity: bool,
    #[serde(rename = "humidityValidity", with = "flag")]
    pub humidity_validity: bool,
    #[serde(rename = "dewPointValidity", with = "flag")]
    pub dew_point_validity: bool,
    #[serde(rename = "mlValidity", with = "flag")]
    pub ml_validity: bool,
}

/// Inputs gathered while processing one particle record
#[derive(Debug, Clone, Copy)]
pub struct RecordParts<'a> {
    pub date_time: NaiveDateTime,
    /// Corrected counts, or raw counts when bypassed
    pub counts: &'a [f64; 7],
    /// Corrected masses, or raw masses when bypassed
    pub masses: &'a MassConcentrations,
    pub pm2_5_ml: f64,
    pub ml_applied: bool,
    pub climate: Option<&'a ClimateReading>,
    pub flags: ValidityFlags,
}

impl CorrectedRecord {
    /// Assemble the published record
    ///
    /// Counts are rounded half-to-even. Climate columns carry the sentinel
    /// when no reading was available.
    pub fn assemble(parts: RecordParts<'_>) -> Self {
        let [pc0_1, pc0_3, pc0_5, pc1_0, pc2_5, pc5_0, pc10_0] =
            parts.counts.map(|count| count.round_ties_even() as i64);
        let [pm0_1, pm0_3, pm0_5, pm1_0, pm2_5, pm5_0, pm10_0] = *parts.masses.values();

        let (temperature, pressure, humidity, dew_point) = match parts.climate {
            Some(c) => (c.temperature, c.pressure, c.humidity, c.dew_point),
            None => (
                MISSING_CLIMATE_SENTINEL,
                MISSING_CLIMATE_SENTINEL,
                MISSING_CLIMATE_SENTINEL,
                MISSING_CLIMATE_SENTINEL,
            ),
        };

        Self {
            date_time: parts.date_time,
            pc0_1,
            pc0_3,
            pc0_5,
            pc1_0,
            pc2_5,
            pc5_0,
            pc10_0,
            pm0_1,
            pm0_3,
            pm0_5,
            pm1_0,
            pm2_5,
            pm5_0,
            pm10_0,
            pm2_5_ml: parts.pm2_5_ml,
            temperature,
            pressure,
            humidity,
            dew_point,
            climate_null_validity: parts.flags.climate_present,
            climate_date_time_validity: parts.flags.climate_fresh,
            climate_validity: parts.flags.climate_plausible,
            humidity_validity: parts.flags.humidity_sufficient,
            dew_point_validity: parts.flags.near_saturation,
            ml_validity: parts.ml_applied,
        }
    }

    /// Particle counts in bin order
    pub fn counts(&self) -> [i64; 7] {
        [
            self.pc0_1, self.pc0_3, self.pc0_5, self.pc1_0, self.pc2_5, self.pc5_0, self.pc10_0,
        ]
    }

    /// Mass concentrations in cut order
    pub fn masses(&self) -> [f64; 7] {
        [
            self.pm0_1, self.pm0_3, self.pm0_5, self.pm1_0, self.pm2_5, self.pm5_0, self.pm10_0,
        ]
    }

    /// Gate flags carried by the record
    pub fn flags(&self) -> ValidityFlags {
        ValidityFlags {
            climate_present: self.climate_null_validity,
            climate_fresh: self.climate_date_time_validity,
            climate_plausible: self.climate_validity,
            humidity_sufficient: self.humidity_validity,
            near_saturation: self.dew_point_validity,
        }
    }
}

/// Validity flags travel as 0/1 integers
mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::custom(format!("validity flag must be 0 or 1, got {other}"))),
        }
    }
}
