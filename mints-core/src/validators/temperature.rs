//! Temperature plausibility
//!
//! The node is deployed outdoors in a temperate climate. Readings outside
//! -20..50 °C point at a failed sensor or a corrupted sentence rather than
//! weather.

use crate::{
    constants::validity::{PLAUSIBLE_TEMP_MAX_C, PLAUSIBLE_TEMP_MIN_C},
    errors::{CorrectionError, CorrectionResult},
    traits::{Validatable, Validator, ValidatorConstraints},
};

use super::utils;

/// Temperature validator for Celsius readings
#[derive(Debug, Clone)]
pub struct TemperatureValidator {
    /// Minimum plausible temperature in Celsius
    min_celsius: f64,

    /// Maximum plausible temperature in Celsius
    max_celsius: f64,
}

impl Default for TemperatureValidator {
    fn default() -> Self {
        Self {
            min_celsius: PLAUSIBLE_TEMP_MIN_C,
            max_celsius: PLAUSIBLE_TEMP_MAX_C,
        }
    }
}

impl TemperatureValidator {
    /// Create validator with custom limits
    pub fn new_with_limits(min: f64, max: f64) -> Self {
        // Sanity check: can't have min > max
        let (min, max) = if min > max { (max, min) } else { (min, max) };

        Self {
            min_celsius: min.max(-273.15), // Can't go below absolute zero
            max_celsius: max,
        }
    }
}

impl Validator for TemperatureValidator {
    type Value = f64;

    fn validate(&self, value: Self::Value) -> CorrectionResult<()> {
        if !value.is_valid() {
            return Err(CorrectionError::InvalidValue);
        }
        utils::check_range(value, self.min_celsius, self.max_celsius)
    }

    fn constraints(&self) -> ValidatorConstraints {
        ValidatorConstraints {
            min_value: self.min_celsius,
            max_value: self.max_celsius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_temperature() {
        let validator = TemperatureValidator::default();
        assert!(validator.validate(22.5).is_ok());
        assert!(validator.validate(-20.0).is_ok());
        assert!(validator.validate(50.0).is_ok());
    }

    #[test]
    fn temperature_out_of_range() {
        let validator = TemperatureValidator::default();
        assert!(matches!(
            validator.validate(-20.1),
            Err(CorrectionError::OutOfRange { .. })
        ));
        assert!(validator.validate(55.0).is_err());
        assert_eq!(validator.validate(f64::NAN), Err(CorrectionError::InvalidValue));
    }

    #[test]
    fn custom_limits_are_ordered() {
        let validator = TemperatureValidator::new_with_limits(40.0, -400.0);
        let constraints = validator.constraints();
        assert_eq!(constraints.min_value, -273.15);
        assert_eq!(constraints.max_value, 40.0);
    }
}
