//! Model input row

use mints_core::ClimateConditions;

use crate::{MlError, MlResult};

/// Number of model inputs
pub const FEATURE_COUNT: usize = 6;

/// Column names, in the order the model expects them
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "cor_pm2_5",
    "temperature",
    "pressure",
    "humidity",
    "dewPoint",
    "temp_dew",
];

/// One row of model inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow([f64; FEATURE_COUNT]);

impl FeatureRow {
    /// Build the row for a corrected PM2.5 and its climate reading
    pub fn new(cor_pm2_5: f64, climate: &ClimateConditions) -> Self {
        Self([
            cor_pm2_5,
            climate.temperature,
            climate.pressure,
            climate.humidity,
            climate.dew_point,
            climate.dew_spread(),
        ])
    }

    /// Row from raw values in column order
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// All values in column order
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Value of one column
    pub fn get(&self, index: usize) -> MlResult<f64> {
        self.0.get(index).copied().ok_or(MlError::InvalidFeature(index))
    }

    /// Fails on the first NaN or infinite column
    pub fn check_finite(&self) -> MlResult<()> {
        match self.0.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(MlError::NonFiniteFeature(FEATURE_NAMES[i])),
            None => Ok(()),
        }
    }
}
