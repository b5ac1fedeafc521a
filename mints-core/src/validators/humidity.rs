//! Relative humidity plausibility
//!
//! Relative humidity is a percentage of saturation, so anything outside
//! 0..100 % is a sensor fault. Supersaturation in fog never shows up on a
//! capacitive sensor as more than 100 %.

use crate::{
    constants::validity::{PLAUSIBLE_HUMIDITY_MAX_PCT, PLAUSIBLE_HUMIDITY_MIN_PCT},
    errors::{CorrectionError, CorrectionResult},
    traits::{Validatable, Validator, ValidatorConstraints},
};

use super::utils;

/// Humidity validator for relative humidity percentage
#[derive(Debug, Clone)]
pub struct HumidityValidator {
    /// Minimum valid RH%
    min_percent: f64,

    /// Maximum valid RH%
    max_percent: f64,
}

impl Default for HumidityValidator {
    fn default() -> Self {
        Self {
            min_percent: PLAUSIBLE_HUMIDITY_MIN_PCT,
            max_percent: PLAUSIBLE_HUMIDITY_MAX_PCT,
        }
    }
}

impl Validator for HumidityValidator {
    type Value = f64;

    fn validate(&self, value: Self::Value) -> CorrectionResult<()> {
        if !value.is_valid() {
            return Err(CorrectionError::InvalidValue);
        }
        utils::check_range(value, self.min_percent, self.max_percent)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_percent,
            max_value: self.max_percent,
        }
    }
}
