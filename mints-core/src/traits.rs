//! Core traits for validators
//!
//! These traits define the interface the climate validators implement.
//! Keep them simple - the gate runs once per particle record on the node.

use crate::errors::CorrectionResult;

/// Core validator trait - implement this for each climate quantity
pub trait Validator {
    /// The type of value this validator handles
    type Value;

    /// Validate a single reading
    fn validate(&self, value: Self::Value) -> CorrectionResult<()>;

    /// Get the limits this validator enforces
    fn constraints(&self) -> ValidatorConstraints;
}

/// Limits enforced by a validator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatorConstraints {
    /// Minimum valid value (inclusive)
    pub min_value: f64,

    /// Maximum valid value (inclusive)
    pub max_value: f64,
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
