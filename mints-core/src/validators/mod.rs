//! Plausibility Validators for Climate Readings
//!
//! ## Overview
//!
//! The humidity correction is only as good as the climate reading paired
//! with the particle record. A BME280 with a wet membrane or a weather
//! station sentence with a dropped digit can report -40 °C or 140 % RH, and
//! correcting particle counts with those numbers would move mass into the
//! wrong bins. These validators decide whether a reading is physically
//! plausible for an outdoor urban node.
//!
//! ## Limits
//!
//! | Quantity    | Min     | Max     | Source                          |
//! |-------------|---------|---------|---------------------------------|
//! | Temperature | -20 °C  | 50 °C   | deployment climate envelope     |
//! | Humidity    | 0 %     | 100 %   | definition of relative humidity |
//!
//! Both bounds are inclusive.
//!
//! ## Usage Example
//!
//! ```rust
//! use mints_core::validators::{TemperatureValidator, HumidityValidator};
//! use mints_core::traits::Validator;
//!
//! let temperature = TemperatureValidator::default();
//! let humidity = HumidityValidator::default();
//!
//! temperature.validate(25.0)?;
//! humidity.validate(60.0)?;
//! assert!(humidity.validate(101.0).is_err());
//! # Ok::<(), mints_core::CorrectionError>(())
//! ```

mod temperature;
mod humidity;
mod utils;

pub use temperature::TemperatureValidator;
pub use humidity::HumidityValidator;
