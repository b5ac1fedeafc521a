//! Physics-only humidity correction
//!
//! Chains the four stages for one particle record:
//!
//! ```text
//! counts ─► DensityHistogram ─► DryBoundaries(RH) ─► BinRemapper ─► MassConverter
//! ```
//!
//! The validity gate and the optional calibrated refinement sit outside this
//! type; by the time `apply` is called the caller has decided the record
//! should be corrected.

use crate::{
    constants::bins::BIN_COUNT,
    distribution::{DensityHistogram, ParticleCountBins},
    errors::CorrectionResult,
    growth::HygroscopicGrowth,
    mass::{MassConcentrations, MassConverter},
    remap::BinRemapper,
};

/// Dry-equivalent counts and masses for one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedParticles {
    /// Corrected counts, PC0.1 through PC10.0
    pub counts: [f64; BIN_COUNT],
    /// Cumulative masses computed from the corrected counts
    pub masses: MassConcentrations,
    /// RH the growth law was evaluated at (%)
    pub effective_humidity: f64,
}

/// The reconstruction, growth, remap and mass stages in sequence
#[derive(Debug, Clone, Default)]
pub struct HumidityCorrection {
    growth: HygroscopicGrowth,
    remapper: BinRemapper,
    mass: MassConverter,
}

impl HumidityCorrection {
    /// Correct raw counts measured at `measured_humidity` (% RH from the climate sensor)
    pub fn apply(
        &self,
        bins: &ParticleCountBins,
        measured_humidity: f64,
    ) -> CorrectionResult<CorrectedParticles> {
        let effective_humidity = self.growth.effective_humidity(measured_humidity);
        let dry = self
            .growth
            .dry_boundaries(effective_humidity)
            .inspect_err(|e| log_warn!("Growth law rejected {}% RH: {:?}", effective_humidity, e))?;

        let histogram = DensityHistogram::reconstruct(bins);
        let counts = self.remapper.remap(&histogram, &dry);
        let masses = self.mass.convert(&counts);

        log_debug!(
            "Corrected counts at {}% effective RH: {:?}",
            effective_humidity, counts
        );

        Ok(CorrectedParticles { counts, masses, effective_humidity })
    }
}
