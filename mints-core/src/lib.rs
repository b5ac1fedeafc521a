//! Humidity correction engine for MINTS particulate-matter sensors
//!
//! Optical particle counters size particles *as they are*, and at high
//! humidity soluble aerosol is swollen with water. This crate reconstructs
//! the dry-equivalent size distribution from the counter's seven wet bins
//! and recomputes mass concentrations from it.
//!
//! Pipeline, per particle record:
//!
//! 1. [`validity::ValidityGate`] decides whether the paired climate reading
//!    allows a correction at all.
//! 2. [`distribution::DensityHistogram`] turns counts into a piecewise-linear
//!    density over nine wet diameter nodes.
//! 3. [`growth::HygroscopicGrowth`] shrinks the nodes to dry diameters.
//! 4. [`remap::BinRemapper`] integrates the shifted density over the original
//!    cut diameters.
//! 5. [`mass::MassConverter`] accumulates mass per cut.
//!
//! Key constraints:
//! - Runs on the node, once per record, with no heap allocation
//! - `no_std` without the `std` feature
//! - Degenerate geometry never panics; it contributes zero
//!
//! ```no_run
//! use mints_core::{HumidityCorrection, ParticleCountBins, ValidityGate, ClimateConditions};
//!
//! let gate = ValidityGate::default();
//! let climate = ClimateConditions { temperature: 10.0, humidity: 60.0, dew_point: 9.0, pressure: 1000.0 };
//! let bins = ParticleCountBins::new([100.0, 50.0, 30.0, 20.0, 10.0, 5.0, 2.0]).unwrap();
//!
//! if gate.evaluate(Some(&climate), 0.0).all_pass() {
//!     let corrected = HumidityCorrection::default().apply(&bins, climate.humidity).unwrap();
//!     // publish corrected.masses
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod constants;
pub mod correction;
pub mod distribution;
pub mod errors;
pub mod growth;
pub mod mass;
pub mod math;
pub mod remap;
pub mod traits;
pub mod validators;
pub mod validity;

// Public API
pub use correction::{CorrectedParticles, HumidityCorrection};
pub use distribution::{DensityHistogram, ParticleCountBins};
pub use errors::{CorrectionError, CorrectionResult};
pub use growth::{DryBoundaries, HygroscopicGrowth};
pub use mass::{MassConcentrations, MassConverter};
pub use remap::BinRemapper;
pub use traits::{Validator, Validatable};
pub use validity::{ClimateConditions, GateThresholds, ValidityFlags, ValidityGate};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
