//! Validity Gate for the Humidity Correction
//!
//! ## Overview
//!
//! The correction moves particles between bins based on the humidity they
//! were measured at. Applying it with a stale, broken, or irrelevant climate
//! reading does more harm than publishing the raw counts, so every PM record
//! passes through this gate first.
//!
//! ## Checks
//!
//! ```text
//! present ──► plausible ──► fresh ──┬──► humidity > 40 %
//!                                   └──► T − dew point < 2.5 °C
//! ```
//!
//! A check only runs when every check to its left passed; a check that did
//! not run is recorded as failed. The humidity and dew-point checks are
//! independent of each other, so a record in dry-but-humid air still reports
//! `humidity_sufficient = true` alongside `near_saturation = false`.
//!
//! All five flags are published with every record, corrected or not, so a
//! downstream consumer can tell *why* a record was left uncorrected.
//!
//! The gate keeps no state between records.

use crate::{
    constants::validity::{
        CLIMATE_FRESHNESS_SECS, CORRECTION_MIN_HUMIDITY_PCT, SATURATION_DEW_SPREAD_C,
    },
    traits::Validator,
    validators::{HumidityValidator, TemperatureValidator},
};

/// Climate values paired with a particle record
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClimateConditions {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Dew point (°C)
    pub dew_point: f64,
    /// Barometric pressure
    pub pressure: f64,
}

impl ClimateConditions {
    /// Temperature minus dew point (°C)
    pub fn dew_spread(&self) -> f64 {
        self.temperature - self.dew_point
    }
}

/// Outcome of each gate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidityFlags {
    /// A climate reading exists
    pub climate_present: bool,
    /// The reading is younger than the freshness window
    pub climate_fresh: bool,
    /// Temperature and humidity are physically plausible
    pub climate_plausible: bool,
    /// Humidity is high enough for growth to matter
    pub humidity_sufficient: bool,
    /// Air is close to saturation
    pub near_saturation: bool,
}

impl ValidityFlags {
    /// Whether the correction should be applied
    pub fn all_pass(&self) -> bool {
        self.climate_present
            && self.climate_fresh
            && self.climate_plausible
            && self.humidity_sufficient
            && self.near_saturation
    }

    /// First failed check, for diagnostics
    pub fn bypass_reason(&self) -> Option<&'static str> {
        if !self.climate_present {
            Some("no climate reading")
        } else if !self.climate_plausible {
            Some("climate reading implausible")
        } else if !self.climate_fresh {
            Some("climate reading stale")
        } else if !self.humidity_sufficient {
            Some("humidity too low")
        } else if !self.near_saturation {
            Some("air not near saturation")
        } else {
            None
        }
    }
}

/// Thresholds applied by the gate
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateThresholds {
    /// Maximum climate reading age (s, exclusive)
    pub freshness_secs: f64,
    /// Minimum humidity (%, exclusive)
    pub min_humidity: f64,
    /// Maximum temperature minus dew point (°C, exclusive)
    pub max_dew_spread: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            freshness_secs: CLIMATE_FRESHNESS_SECS,
            min_humidity: CORRECTION_MIN_HUMIDITY_PCT,
            max_dew_spread: SATURATION_DEW_SPREAD_C,
        }
    }
}

/// Decides whether a particle record gets corrected
#[derive(Debug, Clone, Default)]
pub struct ValidityGate {
    thresholds: GateThresholds,
    temperature: TemperatureValidator,
    humidity: HumidityValidator,
}

impl ValidityGate {
    /// Gate with custom thresholds and the standard plausibility limits
    pub fn new(thresholds: GateThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Thresholds in use
    pub fn thresholds(&self) -> &GateThresholds {
        &self.thresholds
    }

    /// Evaluate every check for one particle record.
    ///
    /// `age_secs` is the PM record time minus the climate reading time.
    pub fn evaluate(&self, climate: Option<&ClimateConditions>, age_secs: f64) -> ValidityFlags {
        let mut flags = ValidityFlags::default();

        let Some(climate) = climate else {
            return flags;
        };
        flags.climate_present = true;

        flags.climate_plausible = self.temperature.validate(climate.temperature).is_ok()
            && self.humidity.validate(climate.humidity).is_ok();
        if !flags.climate_plausible {
            return flags;
        }

        flags.climate_fresh = age_secs < self.thresholds.freshness_secs;
        if !flags.climate_fresh {
            return flags;
        }

        flags.humidity_sufficient = climate.humidity > self.thresholds.min_humidity;
        flags.near_saturation = climate.dew_spread() < self.thresholds.max_dew_spread;

        flags
    }
}
