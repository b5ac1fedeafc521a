//! Climate Validity Thresholds
//!
//! A correction is only meaningful when the climate reading paired with the
//! particle record is recent, physically plausible, and describes air humid
//! enough for hygroscopic growth to matter.

/// Maximum age of a climate reading paired with a PM record (s).
pub const CLIMATE_FRESHNESS_SECS: f64 = 300.0;

/// Lowest plausible ambient temperature for the node (°C).
pub const PLAUSIBLE_TEMP_MIN_C: f64 = -20.0;

/// Highest plausible ambient temperature for the node (°C).
pub const PLAUSIBLE_TEMP_MAX_C: f64 = 50.0;

/// Lowest plausible relative humidity (%).
pub const PLAUSIBLE_HUMIDITY_MIN_PCT: f64 = 0.0;

/// Highest plausible relative humidity (%).
pub const PLAUSIBLE_HUMIDITY_MAX_PCT: f64 = 100.0;

/// Humidity above which particle growth is corrected (%, exclusive).
pub const CORRECTION_MIN_HUMIDITY_PCT: f64 = 40.0;

/// Temperature minus dew point below which air counts as near saturation (°C, exclusive).
///
/// Earlier firmware drafts used 50 °C here, which let almost every record
/// through. 2.5 °C is the value deployed with the final correction module.
pub const SATURATION_DEW_SPREAD_C: f64 = 2.5;

/// Value published for climate fields when no climate reading exists.
pub const MISSING_CLIMATE_SENTINEL: f64 = -100.0;
