//! Hygroscopic Growth Parameters
//!
//! Ambient aerosol takes up water and swells as humidity rises. The node
//! uses a single-parameter kappa-style growth law:
//!
//! ```text
//! D_dry = D_wet / (1 + k · RH / (100 − RH))^(1/3)
//! ```

/// Growth exponent `k` of the hygroscopic growth law (dimensionless).
///
/// Representative of mixed urban aerosol.
pub const GROWTH_EXPONENT_K: f64 = 0.62;

/// Scale applied to the measured RH before the growth law (dimensionless).
///
/// The climate sensor sits in a warmer enclosure than the optical chamber of
/// the particle counter, so its reading is de-rated.
pub const HUMIDITY_DERATING: f64 = 0.7;

/// Upper clamp on the effective RH handed to the growth law (%).
///
/// The growth factor diverges as RH approaches 100 %.
pub const MAX_EFFECTIVE_RH_PCT: f64 = 98.0;

/// RH at which the growth law is undefined (%).
pub const SATURATION_RH_PCT: f64 = 100.0;
