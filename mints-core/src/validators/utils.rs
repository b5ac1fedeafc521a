//! Common validation utilities shared by the climate validators.

use crate::errors::{CorrectionError, CorrectionResult};

/// Check if a value is within the specified inclusive range
pub fn check_range(value: f64, min: f64, max: f64) -> CorrectionResult<()> {
    if value < min || value > max {
        Err(CorrectionError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}
