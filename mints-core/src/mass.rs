//! Count-to-mass conversion.
//!
//! Each cut's mass concentration is cumulative: PM2.5 includes every
//! particle below 2.5 µm, so `pm[i] = pm[i - 1] + m[i] · pc[i]`.

use crate::constants::{bins::{BIN_COUNT, PM2_5_INDEX}, mass::MASS_COEFFICIENTS};

/// Seven cumulative mass concentrations, PM0.1 through PM10.0 (µg/m³)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassConcentrations([f64; BIN_COUNT]);

impl MassConcentrations {
    /// Wrap already-computed concentrations, e.g. the counter's own values
    pub fn new(values: [f64; BIN_COUNT]) -> Self {
        Self(values)
    }

    /// Concentrations in cut order
    pub fn values(&self) -> &[f64; BIN_COUNT] {
        &self.0
    }

    /// PM2.5 concentration
    pub fn pm2_5(&self) -> f64 {
        self.0[PM2_5_INDEX]
    }
}

/// Converts particle counts to cumulative mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassConverter {
    coefficients: [f64; BIN_COUNT],
}

impl Default for MassConverter {
    fn default() -> Self {
        Self { coefficients: MASS_COEFFICIENTS }
    }
}

impl MassConverter {
    /// Cumulative mass for each cut
    pub fn convert(&self, counts: &[f64; BIN_COUNT]) -> MassConcentrations {
        let mut values = [0.0; BIN_COUNT];
        let mut total = 0.0;
        for (i, (count, coefficient)) in counts.iter().zip(self.coefficients.iter()).enumerate() {
            total += coefficient * count;
            values[i] = total;
        }
        MassConcentrations(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_cut_has_no_predecessor() {
        let masses = MassConverter::default().convert(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(masses.values()[0], MASS_COEFFICIENTS[0]);
        assert!(masses.values().iter().all(|&m| m == MASS_COEFFICIENTS[0]));
    }

    #[test]
    fn accumulates_over_cuts() {
        let masses = MassConverter::default().convert(&[100.0, 50.0, 30.0, 20.0, 10.0, 5.0, 2.0]);
        let expected_pm10 = 2.884683423470211;
        assert!((masses.values()[6] - expected_pm10).abs() < 1e-12);
        assert!((masses.pm2_5() - 0.16039828453267665).abs() < 1e-12);
    }
}
