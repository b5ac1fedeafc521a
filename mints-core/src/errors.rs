//! Error Types for the Humidity Correction Pipeline
//!
//! ## Design Philosophy
//!
//! The correction core runs once per particle-counter record, on the node
//! itself, so its errors follow the same rules as the rest of the embedded
//! stack:
//!
//! 1. **Small Size**: every variant carries at most three `f64` values.
//! 2. **No Heap Allocation**: messages are `&'static str` only.
//! 3. **Copy Semantics**: errors are returned by value from hot paths.
//!
//! ## Error Categories
//!
//! ### Input Violations
//! - `InvalidValue`: NaN or infinity in a count or climate field
//! - `NegativeCount`: a particle count below zero
//! - `OutOfRange`: climate value outside the limits a validator enforces
//!
//! ### Model Violations
//! - `SaturatedHumidity`: relative humidity at or above 100 % reached the
//!   growth model, where the growth factor diverges
//!
//! Degenerate geometry inside the reconstruction or the remapping (a zero
//! width bin, coincident boundaries) is *not* an error: the affected
//! sub-term contributes zero and the pipeline continues.
//!
//! ## Memory Layout
//!
//! ```text
//! CorrectionError size = 32 bytes
//! ├── Discriminant: 8 bytes (padded)
//! └── Largest variant (OutOfRange): 24 bytes
//! ```

use thiserror_no_std::Error;

/// Result type for correction operations
pub type CorrectionResult<T> = Result<T, CorrectionError>;

/// Correction errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CorrectionError {
    /// Value outside the limits enforced by a validator
    #[error("Value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// The offending reading
        value: f64,
        /// Lower limit (inclusive)
        min: f64,
        /// Upper limit (inclusive)
        max: f64,
    },

    /// Particle count below zero
    #[error("Particle count {count} in bin {bin} is negative")]
    NegativeCount {
        /// Bin index, 0 = PC0.1 through 6 = PC10.0
        bin: usize,
        /// The offending count
        count: f64,
    },

    /// Relative humidity too high for the growth model
    #[error("Relative humidity {rh}% saturates the growth model")]
    SaturatedHumidity {
        /// Effective relative humidity handed to the model
        rh: f64,
    },

    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid value: not a valid number")]
    InvalidValue,
}

#[cfg(feature = "defmt")]
impl defmt::Format for CorrectionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { value, min, max } =>
                defmt::write!(fmt, "Value {} outside [{}, {}]", value, min, max),
            Self::NegativeCount { bin, count } =>
                defmt::write!(fmt, "Bin {} count {} negative", bin, count),
            Self::SaturatedHumidity { rh } =>
                defmt::write!(fmt, "RH {}% saturates growth model", rh),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
        }
    }
}
