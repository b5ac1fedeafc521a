//! Constants for the MINTS Correction Core
//!
//! Every number the correction pipeline depends on is defined here, with its
//! unit and where it comes from. Calibration values are reproduced verbatim
//! from the deployed firmware; they are not derived from physical inputs.
//!
//! ## Organization
//!
//! Constants are grouped by pipeline stage:
//! - **Bins**: diameter boundaries of the particle counter
//! - **Growth**: hygroscopic growth model parameters
//! - **Mass**: count-to-mass conversion coefficients
//! - **Validity**: thresholds gating whether a correction applies
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units

/// Particle counter bin geometry.
pub mod bins;

/// Hygroscopic growth model parameters.
pub mod growth;

/// Count-to-mass conversion coefficients.
pub mod mass;

/// Climate validity thresholds.
pub mod validity;

// Re-export commonly used constants for convenience
pub use bins::{BIN_COUNT, NODE_COUNT, WET_BOUNDARIES_NM, CUT_DIAMETERS_NM, BIN_LABELS};
pub use growth::{GROWTH_EXPONENT_K, HUMIDITY_DERATING, MAX_EFFECTIVE_RH_PCT};
pub use mass::MASS_COEFFICIENTS;
pub use validity::{
    CLIMATE_FRESHNESS_SECS, PLAUSIBLE_TEMP_MIN_C, PLAUSIBLE_TEMP_MAX_C,
    PLAUSIBLE_HUMIDITY_MIN_PCT, PLAUSIBLE_HUMIDITY_MAX_PCT,
    CORRECTION_MIN_HUMIDITY_PCT, SATURATION_DEW_SPREAD_C, MISSING_CLIMATE_SENTINEL,
};
