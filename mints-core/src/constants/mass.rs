//! Count-to-Mass Coefficients
//!
//! Mass per counted particle for each bin (µg/m³ per count), combining
//! particle density and a shape factor for the bin's representative
//! diameter. These are empirical calibration constants shipped with the
//! node; they are reproduced verbatim and not re-derived.

use super::bins::BIN_COUNT;

/// Mass coefficient of each bin, PC0.1 through PC10.0.
#[allow(clippy::approx_constant)]
pub const MASS_COEFFICIENTS: [f64; BIN_COUNT] = [
    8.355696123812269e-07,
    2.2560825222215327e-05,
    0.00010446111749483851,
    0.0008397941861044865,
    0.013925696906339288,
    0.12597702778750686,
    1.0472,
];
